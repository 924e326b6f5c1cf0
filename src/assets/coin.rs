//! 原生币 SUI

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::{Result, SuiError},
    provider::Provider,
    service::{transaction_builder::UnsignedTransaction, transaction_signer::TransactionSigner},
    utils::amount::{from_base_units, parse_units, to_mist, Number, SUI_DECIMALS},
};

#[derive(Debug, Clone)]
pub struct Coin {
    provider: Arc<Provider>,
}

impl Coin {
    pub fn new(provider: Arc<Provider>) -> Self {
        Self { provider }
    }

    pub fn from_instance() -> Result<Self> {
        Ok(Self::new(Provider::instance()?))
    }

    pub fn name(&self) -> &'static str {
        "Sui"
    }

    pub fn symbol(&self) -> &'static str {
        "SUI"
    }

    pub fn decimals(&self) -> u32 {
        SUI_DECIMALS
    }

    pub async fn balance(&self, owner: &str) -> Result<Number> {
        let balance = self.provider.client().get_balance(owner, None).await?;
        let value = from_base_units(parse_units(&balance.total_balance), SUI_DECIMALS)?;
        Ok(Number::new(value, SUI_DECIMALS))
    }

    /// 构建 SUI 转账：从 gas 币拆出金额后转给接收方
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        amount: Decimal,
    ) -> Result<TransactionSigner> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SuiError::InvalidAmount);
        }

        // 不足 1 Mist 的正数金额
        let mist = to_mist(amount)?;
        if mist == 0 && !amount.is_zero() {
            return Err(SuiError::InvalidAmount);
        }

        if amount > self.balance(sender).await?.value() {
            return Err(SuiError::InsufficientBalance);
        }

        let mut tx = UnsignedTransaction::new();
        let coin = tx.split_coins(tx.gas(), vec![mist]);
        tx.transfer_objects(vec![coin], receiver);

        Ok(TransactionSigner::new(tx, self.provider.clone()))
    }
}
