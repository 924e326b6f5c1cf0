//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::chain_config::SuiNetwork;

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 网络配置（为空的 URL 使用对应网络的默认节点）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub testnet: bool,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub ws_url: Option<String>,
}

/// RPC 与交易参数配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// 交易 gas 预算（Mist）
    pub gas_budget: u64,
    /// 等待交易时的轮询间隔
    pub wait_poll_interval_ms: u64,
    /// 等待交易时的最大轮询次数
    pub wait_max_attempts: u32,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl NetworkConfig {
    pub fn testnet() -> Self {
        Self {
            testnet: true,
            rpc_url: None,
            ws_url: None,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            testnet: false,
            rpc_url: None,
            ws_url: None,
        }
    }

    pub fn network(&self) -> SuiNetwork {
        SuiNetwork::from_testnet_flag(self.testnet)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            testnet: std::env::var("SUI_NETWORK")
                .map(|v| v.eq_ignore_ascii_case("testnet"))
                .unwrap_or(false),
            rpc_url: std::env::var("SUI_RPC_URL").ok().filter(|v| !v.is_empty()),
            ws_url: std::env::var("SUI_WS_URL").ok().filter(|v| !v.is_empty()),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: std::env::var("SUI_RPC_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            connect_timeout_secs: std::env::var("SUI_RPC_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            gas_budget: std::env::var("SUI_GAS_BUDGET")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000_000), // 0.01 SUI
            wait_poll_interval_ms: std::env::var("SUI_WAIT_POLL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4000),
            wait_max_attempts: std::env::var("SUI_WAIT_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            network: NetworkConfig::default(),
            rpc: RpcConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        for url in [&self.network.rpc_url, &self.network.ws_url]
            .into_iter()
            .flatten()
        {
            if !url.starts_with("http://")
                && !url.starts_with("https://")
                && !url.starts_with("ws://")
                && !url.starts_with("wss://")
            {
                anyhow::bail!("Invalid node URL: {}", url);
            }
        }

        if self.rpc.gas_budget == 0 {
            anyhow::bail!("SUI_GAS_BUDGET must be greater than 0");
        }

        if self.rpc.wait_max_attempts == 0 {
            anyhow::bail!("SUI_WAIT_MAX_ATTEMPTS must be greater than 0");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
