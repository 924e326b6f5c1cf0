//! 测试辅助模块
//! 内存版 SuiRpc 与交易夹具

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use ironcore_sui::{
    config::{NetworkConfig, RpcConfig},
    error::{Result, SuiError},
    models::raw::{
        Balance, CoinMetadata, CoinPage, CoinStruct, ExecuteTransactionResponse, ObjectsPage,
        Page, SuiObjectResponse, Supply, TransactionBlockResponse, TransactionBytes,
    },
    provider::Provider,
    service::{
        sui_client::{ObjectDataOptions, SuiRpc, TransactionBlockOptions},
        transaction_builder::BuilderCall,
    },
};
use serde_json::Value;

pub const SENDER: &str = "0x7d20dcdb2bca4f508ea9613994683eb4e76e9c4ed371169677c1be02aaf0b58e";
pub const RECEIVER: &str = "0x1d4b1a2d3f0e5c6b7a8998a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7";

pub const COIN_TX: &str = "38rQ6ThScL69gSLaWez9i8kj3CEw6eyqjkCoNPbcxPKN";
pub const TOKEN_TX: &str = "HbE4qCq2o5mTzR8wLk1JvXy3PnA7sD6fG9hU2cV5bN8M";
pub const NFT_TX: &str = "FqY8nB3vK6mR1tW9zX2cL5dP7sA4hJ0gE3uI6oN9qT2V";

pub const TOKEN_TYPE: &str =
    "0x2f6e1c5a3b9d7e4f8a0c2b6d1e5f9a3c7b4d8e0f2a6c1b5d9e3f7a0c4b8d2e6f::usdc::USDC";
pub const NFT_TYPE: &str =
    "0x6b2e8a4c0f7d3b9e5a1c6f2d8b4e0a7c3f9d5b1e6a2c8f4d0b7e3a9c5f1d6b2e::nft::TestNFT";
pub const NFT_ID: &str = "0x3e7a1c9f5b2d8e4a6c0f3b7d1e9a5c2f8b4d6e0a3c7f1b5e9d2a6c4f8b0e3d7a";

pub fn coin_transfer() -> TransactionBlockResponse {
    fixture(include_str!("../fixtures/coin_transfer.json"))
}

pub fn token_transfer() -> TransactionBlockResponse {
    fixture(include_str!("../fixtures/token_transfer.json"))
}

pub fn nft_transfer() -> TransactionBlockResponse {
    fixture(include_str!("../fixtures/nft_transfer.json"))
}

fn fixture(raw: &str) -> TransactionBlockResponse {
    serde_json::from_str(raw).expect("fixture must be valid transaction JSON")
}

/// 去掉执行结果，模拟尚未最终确认的交易
pub fn pending(mut tx: TransactionBlockResponse) -> TransactionBlockResponse {
    tx.effects = None;
    tx
}

pub fn usdc_metadata() -> CoinMetadata {
    CoinMetadata {
        decimals: 6,
        name: "USD Coin".into(),
        symbol: "USDC".into(),
        description: "Test USDC".into(),
        icon_url: None,
        id: None,
    }
}

pub fn coin(id: &str, coin_type: &str, balance: u64) -> CoinStruct {
    CoinStruct {
        coin_type: coin_type.into(),
        coin_object_id: id.into(),
        version: "1".into(),
        digest: "d".into(),
        balance: balance.to_string(),
    }
}

/// 带 Move 内容与所有者的对象
pub fn move_object(object_id: &str, owner: &str, fields: Value) -> SuiObjectResponse {
    serde_json::from_value(serde_json::json!({
        "data": {
            "objectId": object_id,
            "version": "1",
            "digest": "d",
            "type": NFT_TYPE,
            "owner": { "AddressOwner": owner },
            "content": {
                "dataType": "moveObject",
                "type": NFT_TYPE,
                "fields": fields,
            }
        }
    }))
    .expect("object JSON")
}

/// 内存版 Sui 节点
#[derive(Default)]
pub struct MockSuiRpc {
    transactions: Mutex<HashMap<String, TransactionBlockResponse>>,
    latest_checkpoint: Mutex<u64>,
    balances: Mutex<HashMap<(String, String), String>>,
    metadata: Mutex<HashMap<String, CoinMetadata>>,
    supply: Mutex<HashMap<String, String>>,
    coins: Mutex<HashMap<(String, String), Vec<CoinStruct>>>,
    owned_objects: Mutex<HashMap<(String, String), Vec<SuiObjectResponse>>>,
    objects: Mutex<HashMap<String, SuiObjectResponse>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    /// 交易查询在成功 N 次之后开始失败
    fail_transaction_after: Mutex<Option<usize>>,
    /// 分页接口始终返回同一个游标且声称还有下一页
    stuck_cursor: Mutex<bool>,
    pub built: Mutex<Vec<BuilderCall>>,
    pub executed: Mutex<Vec<(String, Vec<String>)>>,
    pub tx_bytes: Mutex<String>,
}

impl MockSuiRpc {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_transaction(&self, tx: TransactionBlockResponse) {
        self.transactions
            .lock()
            .unwrap()
            .insert(tx.digest.clone(), tx);
    }

    pub fn set_latest_checkpoint(&self, checkpoint: u64) {
        *self.latest_checkpoint.lock().unwrap() = checkpoint;
    }

    pub fn set_balance(&self, owner: &str, coin_type: &str, units: u128) {
        self.balances
            .lock()
            .unwrap()
            .insert((owner.into(), coin_type.into()), units.to_string());
    }

    pub fn set_metadata(&self, coin_type: &str, metadata: CoinMetadata) {
        self.metadata
            .lock()
            .unwrap()
            .insert(coin_type.into(), metadata);
    }

    pub fn set_supply(&self, coin_type: &str, units: u128) {
        self.supply
            .lock()
            .unwrap()
            .insert(coin_type.into(), units.to_string());
    }

    pub fn set_coins(&self, owner: &str, coin_type: &str, coins: Vec<CoinStruct>) {
        self.coins
            .lock()
            .unwrap()
            .insert((owner.into(), coin_type.into()), coins);
    }

    pub fn set_owned_objects(&self, owner: &str, struct_type: &str, objects: Vec<SuiObjectResponse>) {
        self.owned_objects
            .lock()
            .unwrap()
            .insert((owner.into(), struct_type.into()), objects);
    }

    pub fn set_object(&self, object_id: &str, object: SuiObjectResponse) {
        self.objects
            .lock()
            .unwrap()
            .insert(object_id.into(), object);
    }

    pub fn fail_transactions_after(&self, successes: usize) {
        *self.fail_transaction_after.lock().unwrap() = Some(successes);
    }

    pub fn repeat_page_cursor(&self) {
        *self.stuck_cursor.lock().unwrap() = true;
    }

    fn paginate<T: Clone>(&self, items: &[T], cursor: Option<String>, limit: Option<u32>) -> Page<T> {
        if *self.stuck_cursor.lock().unwrap() {
            return Page {
                data: items.to_vec(),
                next_cursor: Some("stuck".into()),
                has_next_page: true,
            };
        }
        paginate(items, cursor, limit)
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) -> usize {
        let mut calls = self.calls.lock().unwrap();
        let count = calls.entry(method).or_insert(0);
        *count += 1;
        *count
    }
}

#[async_trait]
impl SuiRpc for MockSuiRpc {
    async fn get_balance(&self, owner: &str, coin_type: Option<&str>) -> Result<Balance> {
        self.record("suix_getBalance");
        let coin_type = coin_type.unwrap_or("0x2::sui::SUI").to_string();
        let total = self
            .balances
            .lock()
            .unwrap()
            .get(&(owner.to_string(), coin_type.clone()))
            .cloned()
            .unwrap_or_else(|| "0".into());

        Ok(Balance {
            coin_type,
            coin_object_count: 1,
            total_balance: total,
        })
    }

    async fn get_coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>> {
        self.record("suix_getCoinMetadata");
        Ok(self.metadata.lock().unwrap().get(coin_type).cloned())
    }

    async fn get_total_supply(&self, coin_type: &str) -> Result<Supply> {
        self.record("suix_getTotalSupply");
        let value = self
            .supply
            .lock()
            .unwrap()
            .get(coin_type)
            .cloned()
            .unwrap_or_else(|| "0".into());
        Ok(Supply { value })
    }

    async fn get_coins(
        &self,
        owner: &str,
        coin_type: Option<&str>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<CoinPage> {
        self.record("suix_getCoins");
        let key = (
            owner.to_string(),
            coin_type.unwrap_or("0x2::sui::SUI").to_string(),
        );
        let coins = self.coins.lock().unwrap().get(&key).cloned().unwrap_or_default();
        Ok(self.paginate(&coins, cursor, limit))
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<String>,
        limit: Option<u32>,
    ) -> Result<ObjectsPage> {
        self.record("suix_getOwnedObjects");
        let struct_type = filter
            .as_ref()
            .and_then(|f| f.get("StructType"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let objects = self
            .owned_objects
            .lock()
            .unwrap()
            .get(&(owner.to_string(), struct_type))
            .cloned()
            .unwrap_or_default();
        Ok(self.paginate(&objects, cursor, limit))
    }

    async fn get_object(
        &self,
        object_id: &str,
        _options: ObjectDataOptions,
    ) -> Result<SuiObjectResponse> {
        self.record("sui_getObject");
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(object_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_transaction_block(
        &self,
        digest: &str,
        options: TransactionBlockOptions,
    ) -> Result<TransactionBlockResponse> {
        assert_eq!(options, TransactionBlockOptions::full());
        let attempt = self.record("sui_getTransactionBlock");

        if let Some(successes) = *self.fail_transaction_after.lock().unwrap() {
            if attempt > successes {
                return Err(SuiError::rpc("connection reset by peer"));
            }
        }

        Ok(self
            .transactions
            .lock()
            .unwrap()
            .get(digest)
            .cloned()
            .unwrap_or_else(|| TransactionBlockResponse {
                digest: digest.to_string(),
                ..Default::default()
            }))
    }

    async fn get_latest_checkpoint_sequence_number(&self) -> Result<u64> {
        self.record("sui_getLatestCheckpointSequenceNumber");
        Ok(*self.latest_checkpoint.lock().unwrap())
    }

    async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signatures: Vec<String>,
    ) -> Result<ExecuteTransactionResponse> {
        self.record("sui_executeTransactionBlock");
        self.executed
            .lock()
            .unwrap()
            .push((tx_bytes.to_string(), signatures));
        Ok(ExecuteTransactionResponse {
            digest: COIN_TX.into(),
            effects: None,
            confirmed_local_execution: Some(true),
        })
    }

    async fn build_transaction(&self, call: &BuilderCall) -> Result<TransactionBytes> {
        self.record(call.method());
        self.built.lock().unwrap().push(call.clone());
        Ok(TransactionBytes {
            tx_bytes: self.tx_bytes.lock().unwrap().clone(),
            gas: vec![],
            input_objects: vec![],
        })
    }
}

/// 以元素下标作为游标的分页，未给 limit 时为 50
fn paginate<T: Clone>(items: &[T], cursor: Option<String>, limit: Option<u32>) -> Page<T> {
    let start = cursor
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0)
        .min(items.len());
    let end = (start + limit.unwrap_or(50) as usize).min(items.len());
    let has_next_page = end < items.len();

    Page {
        data: items[start..end].to_vec(),
        next_cursor: has_next_page.then(|| end.to_string()),
        has_next_page,
    }
}

/// 按序号生成的币对象 ID
pub fn numbered_coin_id(index: usize) -> String {
    format!("0x{:064x}", index + 1)
}

/// 测试用 RPC 参数（短轮询）
pub fn fast_rpc_config() -> RpcConfig {
    RpcConfig {
        request_timeout_secs: 5,
        connect_timeout_secs: 1,
        gas_budget: 10_000_000,
        wait_poll_interval_ms: 10,
        wait_max_attempts: 5,
    }
}

/// 绑定到内存节点的测试网 Provider
pub fn provider_with(mock: Arc<MockSuiRpc>) -> Arc<Provider> {
    Arc::new(Provider::with_client(
        NetworkConfig::testnet(),
        fast_rpc_config(),
        mock,
    ))
}
