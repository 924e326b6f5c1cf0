//! Sui 网络配置
//!
//! 主网 / 测试网节点的静态配置数据

use serde::{Deserialize, Serialize};

/// Sui 网络类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiNetwork {
    Mainnet,
    Testnet,
}

impl SuiNetwork {
    pub fn from_testnet_flag(testnet: bool) -> Self {
        if testnet {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }

    /// 该网络的默认节点
    pub fn default_node(&self) -> NodeConfig {
        match self {
            Self::Mainnet => NodeConfig {
                name: "Mainnet".to_string(),
                cluster: "mainnet".to_string(),
                rpc_url: "https://fullnode.mainnet.sui.io:443".to_string(),
                explorer_url: "https://suiscan.xyz/mainnet/".to_string(),
                ws_url: None,
            },
            Self::Testnet => NodeConfig {
                name: "Testnet".to_string(),
                cluster: "testnet".to_string(),
                rpc_url: "https://fullnode.testnet.sui.io:443".to_string(),
                explorer_url: "https://suiscan.xyz/testnet/".to_string(),
                ws_url: None,
            },
        }
    }
}

/// 节点配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub cluster: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub ws_url: Option<String>,
}

impl NodeConfig {
    /// 浏览器交易链接
    pub fn transaction_url(&self, digest: &str) -> String {
        format!("{}tx/{}", self.explorer_url, digest)
    }
}
