//! 统一错误定义
//!
//! Sui 适配层对外只暴露 `SuiError`，RPC 传输/解析错误在边界处统一归一为 `RpcRequest`

use thiserror::Error;

pub type Result<T, E = SuiError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiError {
    /// 转账金额为负
    #[error("Invalid amount")]
    InvalidAmount,

    /// 金额或对象数量超过持有量
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// 发送方不是对象当前所有者
    #[error("Unauthorized address")]
    UnauthorizedAddress,

    /// RPC 传输或解析失败
    #[error("RPC request error: {0}")]
    RpcRequest(String),

    #[error("Provider is not initialized")]
    ProviderNotInitialized,

    #[error("Provider is already initialized")]
    ProviderAlreadyInitialized,

    /// 链协议层面不存在的能力（例如 ERC-20 风格的 allowance）
    #[error("Method not implemented: {0}")]
    NotImplemented(&'static str),

    /// `send()` 在 `sign()` 之前调用
    #[error("Transaction is not signed")]
    NotSigned,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// 指令集无法映射到节点的交易构建接口
    #[error("Unsupported instruction set: {0}")]
    UnsupportedInstructionSet(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SuiError {
    /// 稳定的错误码（供上层多链库做映射）
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::InsufficientBalance => "insufficient_balance",
            Self::UnauthorizedAddress => "unauthorized_address",
            Self::RpcRequest(_) => "rpc_request_error",
            Self::ProviderNotInitialized => "provider_is_not_initialized",
            Self::ProviderAlreadyInitialized => "provider_is_already_initialized",
            Self::NotImplemented(_) => "not_implemented",
            Self::NotSigned => "transaction_not_signed",
            Self::InvalidPrivateKey(_) => "invalid_private_key",
            Self::UnsupportedInstructionSet(_) => "unsupported_instruction_set",
            Self::Config(_) => "config_error",
        }
    }

    /// 是否为调用方输入导致的校验错误（在任何网络构建调用之前抛出）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount | Self::InsufficientBalance | Self::UnauthorizedAddress
        )
    }

    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::RpcRequest(msg.into())
    }
}

// RPC 客户端内部使用 anyhow 携带上下文，跨边界时归一
impl From<anyhow::Error> for SuiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::warn!(error = ?err, "Sui RPC request failed");
        Self::RpcRequest(err.to_string())
    }
}

impl From<serde_json::Error> for SuiError {
    fn from(err: serde_json::Error) -> Self {
        Self::RpcRequest(format!("JSON decode error: {}", err))
    }
}
