//! 原生 SUI 转账记录

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    error::{Result, SuiError},
    models::{transaction::Transaction, AssetTransfer},
    utils::amount::{from_mist, Number, SUI_DECIMALS},
};

#[derive(Debug, Clone)]
pub struct CoinTransaction {
    inner: Transaction,
}

impl CoinTransaction {
    pub fn from_transaction(inner: Transaction) -> Self {
        Self { inner }
    }

    /// 转账金额（SUI）
    pub async fn amount(&self) -> Result<Number> {
        let mist = self.inner.first_amount_input().await?;
        let mist = u64::try_from(mist).map_err(|_| SuiError::InvalidAmount)?;
        Ok(Number::new(from_mist(mist), SUI_DECIMALS))
    }
}

#[async_trait]
impl AssetTransfer for CoinTransaction {
    type Value = Decimal;

    fn transaction(&self) -> &Transaction {
        &self.inner
    }

    async fn receiver(&self) -> Result<String> {
        self.inner.first_address_input().await
    }

    async fn value_matches(&self, expected: &Decimal) -> Result<bool> {
        Ok(self.amount().await?.matches(*expected))
    }
}
