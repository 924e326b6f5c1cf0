//! NFT 对象转移记录

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        raw::TransactionInput,
        transaction::{InputKind, Transaction},
        AssetTransfer,
    },
};

#[derive(Debug, Clone)]
pub struct NftTransaction {
    inner: Transaction,
}

impl NftTransaction {
    pub fn from_transaction(inner: Transaction) -> Self {
        Self { inner }
    }

    /// 被转移的 NFT 对象 ID（第一个 owned object 输入）
    pub async fn nft_id(&self) -> Result<String> {
        Ok(self
            .inner
            .inputs_by_kind(InputKind::Object, Some("immOrOwnedObject"))
            .await?
            .into_iter()
            .next()
            .and_then(|input: TransactionInput| input.object_id)
            .unwrap_or_default())
    }
}

#[async_trait]
impl AssetTransfer for NftTransaction {
    type Value = String;

    fn transaction(&self) -> &Transaction {
        &self.inner
    }

    async fn receiver(&self) -> Result<String> {
        self.inner.first_address_input().await
    }

    async fn value_matches(&self, expected: &String) -> Result<bool> {
        Ok(self.nft_id().await? == *expected)
    }
}
