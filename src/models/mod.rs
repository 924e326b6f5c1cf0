//! 交易记录模型
//!
//! `Transaction` 负责取数与通用字段，各资产记录在其上解析接收方与转账值，
//! 并通过 `AssetTransfer` 共享同一套转账校验流程。

pub mod coin_transaction;
pub mod contract_transaction;
pub mod nft_transaction;
pub mod raw;
pub mod token_transaction;
pub mod transaction;

use async_trait::async_trait;

pub use coin_transaction::CoinTransaction;
pub use contract_transaction::ContractTransaction;
pub use nft_transaction::NftTransaction;
pub use token_transaction::TokenTransaction;
pub use transaction::{InputKind, Transaction, WaitOptions, WaitOutcome};

use crate::{
    domain::transaction_status::{AssetDirection, TransactionStatus, TransactionType},
    error::Result,
    utils::address::addresses_equal,
};

/// 可按预期转账进行校验的交易记录
#[async_trait]
pub trait AssetTransfer: Send + Sync {
    /// 预期转账值的类型（金额或对象 ID）
    type Value: Send + Sync + 'static;

    fn transaction(&self) -> &Transaction;

    async fn receiver(&self) -> Result<String>;

    async fn sender(&self) -> Result<String> {
        self.transaction().signer().await
    }

    /// 链上转账值是否与预期一致
    async fn value_matches(&self, expected: &Self::Value) -> Result<bool>;

    /// 依次校验：状态 → 转账值 → 对应方向的地址
    async fn verify_transfer(
        &self,
        direction: AssetDirection,
        address: &str,
        expected: Self::Value,
    ) -> Result<TransactionStatus> {
        if self.transaction().status().await? == TransactionStatus::Pending {
            return Ok(TransactionStatus::Pending);
        }

        if !self.value_matches(&expected).await? {
            return Ok(TransactionStatus::Failed);
        }

        let party = match direction {
            AssetDirection::Incoming => self.receiver().await?,
            AssetDirection::Outgoing => self.sender().await?,
        };

        if !addresses_equal(&party, address) {
            return Ok(TransactionStatus::Failed);
        }

        Ok(TransactionStatus::Confirmed)
    }
}

/// 按分类结果包装后的交易记录
#[derive(Debug, Clone)]
pub enum AssetTransaction {
    General(Transaction),
    Coin(CoinTransaction),
    Token(TokenTransaction),
    Nft(NftTransaction),
    Contract(ContractTransaction),
}

impl AssetTransaction {
    /// 拉取数据并按交易类型包装（复用已缓存的数据）
    pub async fn classify(transaction: Transaction) -> Result<Self> {
        Ok(match transaction.transaction_type().await? {
            TransactionType::General => Self::General(transaction),
            TransactionType::Coin => Self::Coin(CoinTransaction::from_transaction(transaction)),
            TransactionType::Token => Self::Token(TokenTransaction::from_transaction(transaction)),
            TransactionType::Nft => Self::Nft(NftTransaction::from_transaction(transaction)),
            TransactionType::Contract => {
                Self::Contract(ContractTransaction::from_transaction(transaction))
            }
        })
    }

    pub fn transaction(&self) -> &Transaction {
        match self {
            Self::General(tx) => tx,
            Self::Coin(tx) => tx.transaction(),
            Self::Token(tx) => tx.transaction(),
            Self::Nft(tx) => tx.transaction(),
            Self::Contract(tx) => tx.transaction(),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::General(_) => TransactionType::General,
            Self::Coin(_) => TransactionType::Coin,
            Self::Token(_) => TransactionType::Token,
            Self::Nft(_) => TransactionType::Nft,
            Self::Contract(_) => TransactionType::Contract,
        }
    }
}
