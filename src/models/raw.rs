//! Sui JSON-RPC 原始响应模型
//!
//! 只映射本适配层用到的字段，其余字段由 serde 忽略。
//! Sui 节点把 u64/u128 编码为十进制字符串，这里保留字符串，使用方按需解析。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::amount::parse_units;

// ============ 交易块 ============

/// `sui_getTransactionBlock` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default)]
    pub transaction: Option<TransactionBlockEnvelope>,
    #[serde(default)]
    pub raw_transaction: Option<String>,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
    #[serde(default)]
    pub balance_changes: Option<Vec<BalanceChange>>,
    #[serde(default)]
    pub timestamp_ms: Option<String>,
    #[serde(default)]
    pub checkpoint: Option<String>,
}

impl TransactionBlockResponse {
    pub fn object_change_count(&self) -> usize {
        self.object_changes.as_ref().map_or(0, Vec::len)
    }

    pub fn balance_change_count(&self) -> usize {
        self.balance_changes.as_ref().map_or(0, Vec::len)
    }

    pub fn sender(&self) -> Option<&str> {
        self.transaction.as_ref().map(|tx| tx.data.sender.as_str())
    }

    pub fn inputs(&self) -> Option<&[TransactionInput]> {
        self.transaction
            .as_ref()
            .and_then(|tx| tx.data.transaction.as_ref())
            .map(|kind| kind.inputs.as_slice())
    }

    pub fn execution_status(&self) -> Option<&str> {
        self.effects.as_ref().map(|e| e.status.status.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockEnvelope {
    pub data: TransactionBlockData,
    #[serde(default)]
    pub tx_signatures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockData {
    #[serde(default)]
    pub message_version: Option<String>,
    #[serde(default)]
    pub transaction: Option<TransactionKind>,
    pub sender: String,
    #[serde(default)]
    pub gas_data: Option<Value>,
}

/// 交易类型；非可编程交易（系统交易）没有 inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionKind {
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<TransactionInput>,
    #[serde(default)]
    pub transactions: Vec<Value>,
}

/// 可编程交易的输入参数
///
/// `pure`：`{"type":"pure","valueType":"address","value":"0x…"}`
/// `object`：`{"type":"object","objectType":"immOrOwnedObject","objectId":"0x…",…}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
}

impl TransactionInput {
    /// pure 参数值的字符串形式（数值可能被编码为字符串或数字）
    pub fn value_string(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub gas_used: GasCostSummary,
    #[serde(default)]
    pub executed_epoch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    #[serde(default)]
    pub computation_cost: String,
    #[serde(default)]
    pub storage_cost: String,
    #[serde(default)]
    pub storage_rebate: String,
    #[serde(default)]
    pub non_refundable_storage_fee: String,
}

impl GasCostSummary {
    pub fn computation(&self) -> u64 {
        parse_units(&self.computation_cost) as u64
    }

    pub fn storage(&self) -> u64 {
        parse_units(&self.storage_cost) as u64
    }

    pub fn rebate(&self) -> u64 {
        parse_units(&self.storage_rebate) as u64
    }
}

/// 对象变更（created / mutated / transferred / deleted / wrapped / published）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
}

impl ObjectChange {
    pub fn is_published(&self) -> bool {
        self.kind == "published"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    #[serde(default)]
    pub owner: Option<Value>,
    pub coin_type: String,
    pub amount: String,
}

/// 解析对象所有者：`{"AddressOwner": "0x…"}` / `{"ObjectOwner": "0x…"}`，
/// 共享对象与不可变对象没有地址所有者
pub fn owner_address(owner: &Value) -> Option<String> {
    owner
        .get("AddressOwner")
        .or_else(|| owner.get("ObjectOwner"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

// ============ 币与余额 ============

/// `suix_getBalance` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    #[serde(default)]
    pub coin_object_count: u64,
    pub total_balance: String,
}

/// `suix_getCoinMetadata` 响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMetadata {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// `suix_getTotalSupply` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub value: String,
}

/// 单个币对象
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinStruct {
    pub coin_type: String,
    pub coin_object_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub digest: String,
    pub balance: String,
}

impl CoinStruct {
    pub fn balance_units(&self) -> u128 {
        parse_units(&self.balance)
    }
}

/// 分页结果（`suix_getCoins` / `suix_getOwnedObjects`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next_cursor: None,
            has_next_page: false,
        }
    }
}

pub type CoinPage = Page<CoinStruct>;
pub type ObjectsPage = Page<SuiObjectResponse>;

// ============ 对象 ============

/// `sui_getObject` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
}

impl ObjectContent {
    pub fn is_move_object(&self) -> bool {
        self.data_type == "moveObject"
    }

    /// 读取字符串字段（URL 类型字段在 JSON 中也是字符串）
    pub fn field_str(&self, name: &str) -> Option<String> {
        self.fields
            .as_ref()?
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

// ============ 交易构建与执行 ============

/// 节点交易构建接口返回的未签名交易
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    pub tx_bytes: String,
    #[serde(default)]
    pub gas: Vec<Value>,
    #[serde(default)]
    pub input_objects: Vec<Value>,
}

/// `sui_executeTransactionBlock` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransactionResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub confirmed_local_execution: Option<bool>,
}
