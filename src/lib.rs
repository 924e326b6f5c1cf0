//! IronCore Sui - Sui 链适配层
//!
//! 为多链抽象层提供统一的 coin / token / NFT / 交易记录接口，
//! 查询与交易构建都交给 Sui 全节点的 JSON-RPC 完成

pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod provider;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{Result, SuiError};
pub use provider::Provider;

pub mod prelude {
    pub use crate::{
        assets::{Coin, Nft, Token},
        config::{Config, NetworkConfig},
        domain::{AssetDirection, TransactionStatus, TransactionType},
        error::{Result, SuiError},
        models::{
            AssetTransaction, AssetTransfer, CoinTransaction, ContractTransaction, NftTransaction,
            TokenTransaction, Transaction, WaitOptions, WaitOutcome,
        },
        provider::Provider,
        service::{SuiRpc, TransactionSigner},
        utils::amount::Number,
    };
}
