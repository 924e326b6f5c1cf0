//! 非原生代币（Coin<T> 类型）

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use crate::{
    error::{Result, SuiError},
    models::raw::{CoinMetadata, CoinStruct},
    provider::Provider,
    service::{transaction_builder::UnsignedTransaction, transaction_signer::TransactionSigner},
    utils::amount::{from_base_units, parse_units, to_base_units, Number},
};

const COIN_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct Token {
    address: String,
    provider: Arc<Provider>,
    metadata: OnceCell<CoinMetadata>,
}

impl Token {
    /// `address` 为代币类型，例如 `0x…::usdc::USDC`
    pub fn new(address: impl Into<String>, provider: Arc<Provider>) -> Self {
        Self {
            address: address.into(),
            provider,
            metadata: OnceCell::new(),
        }
    }

    pub fn from_instance(address: impl Into<String>) -> Result<Self> {
        Ok(Self::new(address, Provider::instance()?))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// 链上元数据，首次成功获取后缓存
    pub async fn metadata(&self) -> Result<&CoinMetadata> {
        self.metadata
            .get_or_try_init(|| async {
                self.provider
                    .client()
                    .get_coin_metadata(&self.address)
                    .await?
                    .ok_or_else(|| {
                        SuiError::rpc(format!("Coin metadata not found for {}", self.address))
                    })
            })
            .await
    }

    pub async fn name(&self) -> Result<String> {
        Ok(self.metadata().await?.name.clone())
    }

    pub async fn symbol(&self) -> Result<String> {
        Ok(self.metadata().await?.symbol.clone())
    }

    pub async fn decimals(&self) -> Result<u32> {
        Ok(u32::from(self.metadata().await?.decimals))
    }

    pub async fn balance(&self, owner: &str) -> Result<Number> {
        let decimals = self.decimals().await?;
        let balance = self
            .provider
            .client()
            .get_balance(owner, Some(&self.address))
            .await?;

        let value = from_base_units(parse_units(&balance.total_balance), decimals)?;
        Ok(Number::new(value, decimals))
    }

    pub async fn total_supply(&self) -> Result<Number> {
        let decimals = self.decimals().await?;
        let supply = self.provider.client().get_total_supply(&self.address).await?;

        let value = from_base_units(parse_units(&supply.value), decimals)?;
        Ok(Number::new(value, decimals))
    }

    pub async fn allowance(&self, _owner: &str, _spender: &str) -> Result<Number> {
        Err(SuiError::NotImplemented("allowance"))
    }

    pub async fn approve(
        &self,
        _owner: &str,
        _spender: &str,
        _amount: Decimal,
    ) -> Result<TransactionSigner> {
        Err(SuiError::NotImplemented("approve"))
    }

    pub async fn transfer_from(
        &self,
        _spender: &str,
        _owner: &str,
        _receiver: &str,
        _amount: Decimal,
    ) -> Result<TransactionSigner> {
        Err(SuiError::NotImplemented("transfer_from"))
    }

    /// 构建代币转账
    ///
    /// 有单个币对象足够支付时直接拆分；否则把所有币合并到第一个后再拆分
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        amount: Decimal,
    ) -> Result<TransactionSigner> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SuiError::InvalidAmount);
        }

        if amount > self.balance(sender).await?.value() {
            return Err(SuiError::InsufficientBalance);
        }

        let units = to_base_units(amount, self.decimals().await?)?;
        // 低于代币精度的正数金额截断后为 0
        if units == 0 && !amount.is_zero() {
            return Err(SuiError::InvalidAmount);
        }
        let units_u64 = u64::try_from(units).map_err(|_| SuiError::InvalidAmount)?;

        let coins = self.coins(sender).await?;
        let Some(first) = coins.first() else {
            return Err(SuiError::InsufficientBalance);
        };

        let mut tx = UnsignedTransaction::new();

        if let Some(coin) = coins.iter().find(|coin| coin.balance_units() >= units) {
            let part = tx.split_coins(tx.object(&coin.coin_object_id), vec![units_u64]);
            tx.transfer_objects(vec![part], receiver);
        } else {
            let primary = tx.object(&first.coin_object_id);
            if coins.len() > 1 {
                let sources = coins[1..]
                    .iter()
                    .map(|coin| tx.object(&coin.coin_object_id))
                    .collect();
                tx.merge_coins(primary.clone(), sources);
            }
            let part = tx.split_coins(primary, vec![units_u64]);
            tx.transfer_objects(vec![part], receiver);
        }

        tracing::debug!(
            coin_type = %self.address,
            coin_objects = coins.len(),
            amount = %amount,
            "Built Sui token transfer"
        );

        Ok(TransactionSigner::new(tx, self.provider.clone()))
    }

    /// 发送方持有的该类型全部币对象
    async fn coins(&self, owner: &str) -> Result<Vec<CoinStruct>> {
        let mut coins = Vec::new();
        let mut cursor = None;

        loop {
            let page = self
                .provider
                .client()
                .get_coins(owner, Some(&self.address), cursor.clone(), Some(COIN_PAGE_LIMIT))
                .await?;

            // 游标未前进，视为重复页
            if cursor.is_some() && page.next_cursor == cursor {
                tracing::warn!(coin_type = %self.address, "Coin page cursor did not advance");
                break;
            }
            coins.extend(page.data);

            if !page.has_next_page || page.next_cursor.is_none() {
                break;
            }
            cursor = page.next_cursor;
        }

        Ok(coins)
    }
}
