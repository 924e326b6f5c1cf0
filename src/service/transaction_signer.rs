//! 交易签名与广播

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::{
    domain::keypair::SuiKeypair,
    error::{Result, SuiError},
    provider::Provider,
    service::transaction_builder::UnsignedTransaction,
};

/// 已签名交易（base64 交易字节 + 序列化签名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx_bytes: String,
    pub signature: String,
}

/// 包装一个未签名交易，负责签名与提交
#[derive(Debug)]
pub struct TransactionSigner {
    provider: Arc<Provider>,
    raw: UnsignedTransaction,
    signed: Option<SignedTransaction>,
}

impl TransactionSigner {
    pub fn new(raw: UnsignedTransaction, provider: Arc<Provider>) -> Self {
        Self {
            provider,
            raw,
            signed: None,
        }
    }

    pub fn raw_data(&self) -> &UnsignedTransaction {
        &self.raw
    }

    pub fn signed_data(&self) -> Option<&SignedTransaction> {
        self.signed.as_ref()
    }

    /// 用私钥签名；未设置发送方时使用私钥对应的地址
    pub async fn sign(&mut self, private_key: &str) -> Result<&mut Self> {
        let keypair = SuiKeypair::from_secret(private_key)?;
        self.raw.set_sender_if_not_set(keypair.address());

        let gas_budget = self.provider.rpc_config().gas_budget;
        let built = self.raw.build(self.provider.client(), gas_budget).await?;

        let bytes = BASE64
            .decode(&built.tx_bytes)
            .map_err(|e| SuiError::rpc(format!("Invalid transaction bytes from node: {}", e)))?;

        self.signed = Some(SignedTransaction {
            signature: keypair.sign_transaction(&bytes),
            tx_bytes: built.tx_bytes,
        });

        tracing::debug!(sender = %keypair.address(), "Sui transaction signed");
        Ok(self)
    }

    /// 提交已签名交易，返回交易摘要
    pub async fn send(&self) -> Result<String> {
        let signed = self.signed.as_ref().ok_or(SuiError::NotSigned)?;

        let response = self
            .provider
            .client()
            .execute_transaction_block(&signed.tx_bytes, vec![signed.signature.clone()])
            .await?;

        Ok(response.digest)
    }
}
