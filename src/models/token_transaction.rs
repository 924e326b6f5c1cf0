//! 代币（非原生 Coin<T>）转账记录

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    assets::token::Token,
    error::Result,
    models::{contract_transaction::ContractTransaction, transaction::Transaction, AssetTransfer},
    utils::amount::{from_base_units, Number},
};

#[derive(Debug, Clone)]
pub struct TokenTransaction {
    contract: ContractTransaction,
}

impl TokenTransaction {
    pub fn from_transaction(inner: Transaction) -> Self {
        Self {
            contract: ContractTransaction::from_transaction(inner),
        }
    }

    /// 代币类型
    pub async fn address(&self) -> Result<String> {
        self.contract.address().await
    }

    /// 按代币自身精度换算的转账金额
    pub async fn amount(&self) -> Result<Number> {
        let units = self.contract.transaction().first_amount_input().await?;
        let token = Token::new(
            self.address().await?,
            self.contract.transaction().provider().clone(),
        );
        let decimals = token.decimals().await?;

        Ok(Number::new(from_base_units(units, decimals)?, decimals))
    }
}

#[async_trait]
impl AssetTransfer for TokenTransaction {
    type Value = Decimal;

    fn transaction(&self) -> &Transaction {
        self.contract.transaction()
    }

    async fn receiver(&self) -> Result<String> {
        self.contract.transaction().first_address_input().await
    }

    async fn value_matches(&self, expected: &Decimal) -> Result<bool> {
        Ok(self.amount().await?.matches(*expected))
    }
}
