//! NFT（Move 结构体类型的对象集合）

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    error::{Result, SuiError},
    models::raw::owner_address,
    provider::Provider,
    service::{
        sui_client::ObjectDataOptions, transaction_builder::UnsignedTransaction,
        transaction_signer::TransactionSigner,
    },
    utils::{
        address::{addresses_equal, truncate_address},
        amount::Number,
    },
};

const OWNED_OBJECTS_LIMIT: u32 = 50;

/// 从对象内容字段解析出的 NFT 元数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub owner: String,
    pub symbol: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Nft {
    address: String,
    provider: Arc<Provider>,
    metadata: RwLock<HashMap<String, NftMetadata>>,
}

impl Nft {
    /// `address` 为 NFT 的结构体类型，例如 `0x…::nft::TestNFT`
    pub fn new(address: impl Into<String>, provider: Arc<Provider>) -> Self {
        Self {
            address: address.into(),
            provider,
            metadata: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_instance(address: impl Into<String>) -> Result<Self> {
        Ok(Self::new(address, Provider::instance()?))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// 读取对象元数据，成功后按对象 ID 缓存；非 Move 对象返回 `None`
    pub async fn metadata(&self, object_id: Option<&str>) -> Result<Option<NftMetadata>> {
        let object_id = object_id.unwrap_or(&self.address);

        if let Some(cached) = self.metadata.read().await.get(object_id) {
            return Ok(Some(cached.clone()));
        }

        let response = self
            .provider
            .client()
            .get_object(object_id, ObjectDataOptions::content_and_owner())
            .await?;

        let Some(object) = response.data else {
            return Ok(None);
        };
        let Some(content) = object.content.as_ref().filter(|c| c.is_move_object()) else {
            return Ok(None);
        };

        let name = content.field_str("name").unwrap_or_default();
        let metadata = NftMetadata {
            owner: object
                .owner
                .as_ref()
                .and_then(owner_address)
                .unwrap_or_default(),
            symbol: content
                .field_str("symbol")
                .unwrap_or_else(|| name.clone()),
            description: content
                .field_str("description")
                .unwrap_or_else(|| name.clone()),
            image: content
                .field_str("image")
                .or_else(|| content.field_str("url"))
                .or_else(|| content.field_str("image_url")),
            name,
        };

        self.metadata
            .write()
            .await
            .insert(object_id.to_string(), metadata.clone());

        Ok(Some(metadata))
    }

    pub async fn name(&self, object_id: Option<&str>) -> Result<String> {
        Ok(self.metadata(object_id).await?.map(|m| m.name).unwrap_or_default())
    }

    pub async fn symbol(&self, object_id: Option<&str>) -> Result<String> {
        Ok(self
            .metadata(object_id)
            .await?
            .map(|m| m.symbol)
            .unwrap_or_default())
    }

    pub async fn description(&self, object_id: Option<&str>) -> Result<String> {
        Ok(self
            .metadata(object_id)
            .await?
            .map(|m| m.description)
            .unwrap_or_default())
    }

    pub async fn owner(&self, token_id: &str) -> Result<String> {
        Ok(self
            .metadata(Some(token_id))
            .await?
            .map(|m| m.owner)
            .unwrap_or_default())
    }

    pub async fn token_uri(&self, token_id: &str) -> Result<String> {
        Ok(self
            .metadata(Some(token_id))
            .await?
            .and_then(|m| m.image)
            .unwrap_or_default())
    }

    /// 持有该类型对象的数量（最多统计一页）
    pub async fn balance(&self, owner: &str) -> Result<Number> {
        let filter = serde_json::json!({ "StructType": self.address });
        let page = self
            .provider
            .client()
            .get_owned_objects(owner, Some(filter), None, Some(OWNED_OBJECTS_LIMIT))
            .await?;

        Ok(Number::new(page.data.len().into(), 0))
    }

    pub async fn approved(&self, _token_id: &str) -> Result<Option<String>> {
        Err(SuiError::NotImplemented("approved"))
    }

    pub async fn approve(
        &self,
        _owner: &str,
        _spender: &str,
        _token_id: &str,
    ) -> Result<TransactionSigner> {
        Err(SuiError::NotImplemented("approve"))
    }

    pub async fn transfer_from(
        &self,
        _spender: &str,
        _owner: &str,
        _receiver: &str,
        _token_id: &str,
    ) -> Result<TransactionSigner> {
        Err(SuiError::NotImplemented("transfer_from"))
    }

    /// 构建 NFT 转移；发送方必须持有该类型对象且是该对象的当前所有者
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        token_id: &str,
    ) -> Result<TransactionSigner> {
        if self.balance(sender).await?.value() <= rust_decimal::Decimal::ZERO {
            return Err(SuiError::InsufficientBalance);
        }

        let owner = self.owner(token_id).await?;
        if !addresses_equal(&owner, sender) {
            tracing::warn!(
                token_id = %token_id,
                owner = %truncate_address(&owner),
                sender = %truncate_address(sender),
                "NFT transfer rejected: sender is not the owner"
            );
            return Err(SuiError::UnauthorizedAddress);
        }

        let mut tx = UnsignedTransaction::new();
        let object = tx.object(token_id);
        tx.transfer_objects(vec![object], receiver);

        Ok(TransactionSigner::new(tx, self.provider.clone()))
    }
}
