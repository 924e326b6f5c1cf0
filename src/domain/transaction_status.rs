//! 统一交易状态定义
//! 与多链抽象层共享的状态、方向与类型枚举

use std::fmt;

use serde::{Deserialize, Serialize};

/// 链上转账记录的状态
/// ✅ Confirmed / Failed 为最终状态；链尚未最终确认时为 Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// 交易待确认
    Pending,

    /// 交易已确认
    Confirmed,

    /// 交易失败（链上执行失败，或与预期转账不符）
    Failed,
}

impl TransactionStatus {
    /// 获取状态描述
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "交易待确认",
            Self::Confirmed => "交易已确认",
            Self::Failed => "交易失败",
        }
    }

    /// 是否为最终状态（不可再转换）
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// 从节点返回的执行状态解析
    /// "success" → Confirmed，"failure" → Failed，其余（包括缺失）→ Pending
    pub fn from_execution_status(status: Option<&str>) -> Self {
        match status {
            Some("success") => Self::Confirmed,
            Some("failure") => Self::Failed,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 校验方视角下的资产流向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetDirection {
    /// 校验方为接收方
    Incoming,
    /// 校验方为发送方
    Outgoing,
}

/// 交易类型（由对象变更/余额变更数量推断）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    General,
    Nft,
    Coin,
    Token,
    Contract,
}

impl TransactionType {
    /// 按对象变更数和余额变更数分类
    ///
    /// 2 个对象变更 + 恰好 1 个余额变更 → NFT；2 个对象变更其余情况 → COIN；
    /// 3 个对象变更 → TOKEN；其余 → CONTRACT。
    /// 这是目前唯一的类型推断手段，复杂多对象交易下存在歧义，不要在没有新依据时扩展。
    pub fn classify(object_changes: usize, balance_changes: usize) -> Self {
        match object_changes {
            2 if balance_changes == 1 => Self::Nft,
            2 => Self::Coin,
            3 => Self::Token,
            _ => Self::Contract,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Nft => "nft",
            Self::Coin => "coin",
            Self::Token => "token",
            Self::Contract => "contract",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
