pub mod sui_client;
pub mod transaction_builder;
pub mod transaction_signer;

pub use sui_client::{SuiRpc, SuiRpcClient};
pub use transaction_builder::{Argument, BuilderCall, Command, UnsignedTransaction};
pub use transaction_signer::{SignedTransaction, TransactionSigner};
