//! 合约交互记录

use crate::{
    error::Result,
    models::transaction::Transaction,
    utils::address::{coin_type_param, is_native_coin_object},
};

#[derive(Debug, Clone)]
pub struct ContractTransaction {
    inner: Transaction,
}

impl ContractTransaction {
    pub fn from_transaction(inner: Transaction) -> Self {
        Self { inner }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.inner
    }

    /// 交互的合约类型
    ///
    /// 跳过 `published` 变更与原生 SUI 币对象，取第一个其余对象变更的类型；
    /// `Coin<T>` 取出 `T`。没有符合条件的变更时返回 "0x"。
    pub async fn address(&self) -> Result<String> {
        let Some(data) = self.inner.data().await? else {
            return Ok("0x".to_string());
        };

        let address = data
            .object_changes
            .iter()
            .flatten()
            .filter(|change| !change.is_published())
            .filter_map(|change| change.object_type.as_deref())
            .find(|object_type| !is_native_coin_object(object_type))
            .map(coin_type_param);

        Ok(address.unwrap_or_else(|| "0x".to_string()))
    }
}
