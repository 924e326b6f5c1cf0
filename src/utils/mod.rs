pub mod address;
pub mod amount;

pub use address::{addresses_equal, SUI_COIN_TYPE};
pub use amount::{from_mist, to_mist, Number, SUI_DECIMALS};
