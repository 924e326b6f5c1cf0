// Sui 链客户端 - JSON-RPC 实现
// 对外只暴露 `SuiRpc` 接口，适配层所有组件都通过该接口访问节点

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config::RpcConfig,
    error::Result,
    models::raw::{
        Balance, CoinMetadata, CoinPage, ExecuteTransactionResponse, ObjectsPage,
        SuiObjectResponse, Supply, TransactionBlockResponse, TransactionBytes,
    },
    service::transaction_builder::BuilderCall,
};

/// `sui_getTransactionBlock` 的展示选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockOptions {
    pub show_input: bool,
    pub show_effects: bool,
    pub show_events: bool,
    pub show_raw_input: bool,
    pub show_balance_changes: bool,
    pub show_object_changes: bool,
}

impl TransactionBlockOptions {
    /// 交易记录需要的全部字段
    pub fn full() -> Self {
        Self {
            show_input: true,
            show_effects: true,
            show_events: true,
            show_raw_input: true,
            show_balance_changes: true,
            show_object_changes: true,
        }
    }
}

/// `sui_getObject` 的展示选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    pub show_type: bool,
    pub show_owner: bool,
    pub show_content: bool,
}

impl ObjectDataOptions {
    pub fn content_and_owner() -> Self {
        Self {
            show_type: true,
            show_owner: true,
            show_content: true,
        }
    }
}

/// Sui 链客户端接口
#[async_trait]
pub trait SuiRpc: Send + Sync {
    async fn get_balance(&self, owner: &str, coin_type: Option<&str>) -> Result<Balance>;

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>>;

    async fn get_total_supply(&self, coin_type: &str) -> Result<Supply>;

    async fn get_coins(
        &self,
        owner: &str,
        coin_type: Option<&str>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<CoinPage>;

    /// `filter` 为 Sui 的对象过滤器，例如 `{"StructType": "0x…::nft::TestNFT"}`
    async fn get_owned_objects(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<ObjectsPage>;

    async fn get_object(
        &self,
        object_id: &str,
        options: ObjectDataOptions,
    ) -> Result<SuiObjectResponse>;

    async fn get_transaction_block(
        &self,
        digest: &str,
        options: TransactionBlockOptions,
    ) -> Result<TransactionBlockResponse>;

    async fn get_latest_checkpoint_sequence_number(&self) -> Result<u64>;

    async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signatures: Vec<String>,
    ) -> Result<ExecuteTransactionResponse>;

    /// 交给节点的交易构建接口生成未签名交易
    async fn build_transaction(&self, call: &BuilderCall) -> Result<TransactionBytes>;

    /// 等待交易被节点索引
    ///
    /// 超时返回 `Ok(None)`；查询本身的错误（交易尚不存在）视为"未就绪"继续轮询
    async fn wait_for_transaction(
        &self,
        digest: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Option<TransactionBlockResponse>> {
        let deadline = Instant::now() + timeout;

        loop {
            match self
                .get_transaction_block(digest, TransactionBlockOptions::full())
                .await
            {
                Ok(tx) if tx.transaction.is_some() => return Ok(Some(tx)),
                Ok(_) => {
                    tracing::debug!(digest = %digest, "Transaction indexed without body yet");
                }
                Err(e) => {
                    tracing::debug!(digest = %digest, error = %e, "Transaction not yet available");
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }
}

/// 基于 reqwest 的 Sui JSON-RPC 客户端
pub struct SuiRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(rpc_url: impl Into<String>, config: &RpcConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client: client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn shared(rpc_url: impl Into<String>, config: &RpcConfig) -> Arc<dyn SuiRpc> {
        Arc::new(Self::new(rpc_url, config))
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// 发送 JSON-RPC 请求并解析 result
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> anyhow::Result<T> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method = %method, id = id, endpoint = %self.rpc_url, "Sending Sui RPC request");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to call Sui RPC method {}", method))?;

        if !response.status().is_success() {
            anyhow::bail!("RPC call {} failed with status: {}", method, response.status());
        }

        let mut json: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Sui RPC response for {}", method))?;

        crate::infrastructure::rpc_validator::validate_rpc_response(&json)
            .with_context(|| format!("Invalid RPC response for {}", method))?;

        let result = json.get_mut("result").map(Value::take).unwrap_or(Value::Null);

        serde_json::from_value(result)
            .with_context(|| format!("Failed to decode result of {}", method))
    }
}

#[async_trait]
impl SuiRpc for SuiRpcClient {
    async fn get_balance(&self, owner: &str, coin_type: Option<&str>) -> Result<Balance> {
        Ok(self
            .call("suix_getBalance", serde_json::json!([owner, coin_type]))
            .await?)
    }

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>> {
        Ok(self
            .call("suix_getCoinMetadata", serde_json::json!([coin_type]))
            .await?)
    }

    async fn get_total_supply(&self, coin_type: &str) -> Result<Supply> {
        Ok(self
            .call("suix_getTotalSupply", serde_json::json!([coin_type]))
            .await?)
    }

    async fn get_coins(
        &self,
        owner: &str,
        coin_type: Option<&str>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<CoinPage> {
        Ok(self
            .call(
                "suix_getCoins",
                serde_json::json!([owner, coin_type, cursor, limit]),
            )
            .await?)
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<ObjectsPage> {
        let query = serde_json::json!({
            "filter": filter,
            "options": ObjectDataOptions::content_and_owner(),
        });

        Ok(self
            .call(
                "suix_getOwnedObjects",
                serde_json::json!([owner, query, cursor, limit]),
            )
            .await?)
    }

    async fn get_object(
        &self,
        object_id: &str,
        options: ObjectDataOptions,
    ) -> Result<SuiObjectResponse> {
        Ok(self
            .call("sui_getObject", serde_json::json!([object_id, options]))
            .await?)
    }

    async fn get_transaction_block(
        &self,
        digest: &str,
        options: TransactionBlockOptions,
    ) -> Result<TransactionBlockResponse> {
        Ok(self
            .call("sui_getTransactionBlock", serde_json::json!([digest, options]))
            .await?)
    }

    async fn get_latest_checkpoint_sequence_number(&self) -> Result<u64> {
        // 节点以字符串返回 BigInt<u64>
        let raw: String = self
            .call("sui_getLatestCheckpointSequenceNumber", serde_json::json!([]))
            .await?;

        raw.parse::<u64>()
            .map_err(|e| crate::error::SuiError::rpc(format!("Invalid checkpoint number: {}", e)))
    }

    async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signatures: Vec<String>,
    ) -> Result<ExecuteTransactionResponse> {
        let options = serde_json::json!({ "showEffects": true });

        let result: ExecuteTransactionResponse = self
            .call(
                "sui_executeTransactionBlock",
                serde_json::json!([tx_bytes, signatures, options, "WaitForLocalExecution"]),
            )
            .await?;

        tracing::info!(digest = %result.digest, "Sui transaction submitted");

        Ok(result)
    }

    async fn build_transaction(&self, call: &BuilderCall) -> Result<TransactionBytes> {
        let (method, params) = call.to_rpc_request();
        Ok(self.call(method, params).await?)
    }
}
