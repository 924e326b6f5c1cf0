//! 资产描述：原生币、代币与 NFT
//!
//! 只读查询直接转发到节点；`transfer` 校验后返回持有未签名交易的 `TransactionSigner`

pub mod coin;
pub mod nft;
pub mod token;

pub use coin::Coin;
pub use nft::{Nft, NftMetadata};
pub use token::Token;
