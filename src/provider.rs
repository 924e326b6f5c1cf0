//! 网络提供者
//!
//! 持有当前网络的节点配置与 RPC 客户端。进程内有一个可选的全局实例，
//! 组件既可以显式传入 `Arc<Provider>`，也可以通过 `Provider::instance()` 获取。

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use once_cell::sync::OnceCell;

use crate::{
    config::{Config, NetworkConfig, RpcConfig},
    domain::chain_config::{NodeConfig, SuiNetwork},
    error::{Result, SuiError},
    service::sui_client::{SuiRpc, SuiRpcClient},
};

static INSTANCE: OnceCell<RwLock<Arc<Provider>>> = OnceCell::new();

pub struct Provider {
    network: SuiNetwork,
    node: NodeConfig,
    rpc_config: RpcConfig,
    client: Arc<dyn SuiRpc>,
}

impl Provider {
    /// 按网络配置创建（使用默认 RPC 参数）
    pub fn new(network: NetworkConfig) -> Self {
        Self::with_rpc_config(network, RpcConfig::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_rpc_config(config.network.clone(), config.rpc.clone())
    }

    /// 校验配置后创建
    pub fn try_from_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SuiError::Config(format!("{:#}", e)))?;
        Ok(Self::from_config(config))
    }

    pub fn with_rpc_config(network: NetworkConfig, rpc_config: RpcConfig) -> Self {
        let node = resolve_node(&network);
        let client = SuiRpcClient::shared(node.rpc_url.clone(), &rpc_config);

        Self {
            network: network.network(),
            node,
            rpc_config,
            client,
        }
    }

    /// 使用自定义客户端（例如测试桩或带重试的包装）
    pub fn with_client(
        network: NetworkConfig,
        rpc_config: RpcConfig,
        client: Arc<dyn SuiRpc>,
    ) -> Self {
        Self {
            network: network.network(),
            node: resolve_node(&network),
            rpc_config,
            client,
        }
    }

    // ============ 全局实例 ============

    /// 创建并注册全局实例；已注册时返回 `ProviderAlreadyInitialized`
    pub fn initialize(network: NetworkConfig) -> Result<Arc<Provider>> {
        Self::install(Self::new(network))
    }

    /// 注册一个已构建好的实例为全局实例
    pub fn install(provider: Provider) -> Result<Arc<Provider>> {
        let provider = Arc::new(provider);
        INSTANCE
            .set(RwLock::new(provider.clone()))
            .map_err(|_| SuiError::ProviderAlreadyInitialized)?;

        tracing::info!(
            network = %provider.node.cluster,
            rpc_url = %provider.node.rpc_url,
            "Sui provider initialized"
        );
        Ok(provider)
    }

    /// 获取全局实例；未注册时返回 `ProviderNotInitialized`
    pub fn instance() -> Result<Arc<Provider>> {
        let lock = INSTANCE.get().ok_or(SuiError::ProviderNotInitialized)?;
        let guard = lock.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }

    /// 切换网络并替换全局实例，沿用当前实例的 RPC 参数；未注册时返回 `ProviderNotInitialized`
    pub fn update(network: NetworkConfig) -> Result<Arc<Provider>> {
        let rpc_config = {
            let lock = INSTANCE.get().ok_or(SuiError::ProviderNotInitialized)?;
            let guard = lock.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.rpc_config.clone()
        };

        Self::replace(Self::with_rpc_config(network, rpc_config))
    }

    /// 用给定实例替换全局实例；未注册时返回 `ProviderNotInitialized`
    pub fn replace(provider: Provider) -> Result<Arc<Provider>> {
        let lock = INSTANCE.get().ok_or(SuiError::ProviderNotInitialized)?;
        let provider = Arc::new(provider);
        {
            let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = provider.clone();
        }

        tracing::info!(network = %provider.node.cluster, "Sui provider updated");
        Ok(provider)
    }

    // ============ 访问器 ============

    pub fn client(&self) -> &dyn SuiRpc {
        self.client.as_ref()
    }

    pub fn shared_client(&self) -> Arc<dyn SuiRpc> {
        self.client.clone()
    }

    pub fn network(&self) -> SuiNetwork {
        self.network
    }

    pub fn is_testnet(&self) -> bool {
        self.network == SuiNetwork::Testnet
    }

    pub fn node(&self) -> &NodeConfig {
        &self.node
    }

    pub fn rpc_config(&self) -> &RpcConfig {
        &self.rpc_config
    }

    pub fn rpc_url(&self) -> &str {
        &self.node.rpc_url
    }

    pub fn explorer_url(&self) -> &str {
        &self.node.explorer_url
    }

    pub fn transaction_url(&self, digest: &str) -> String {
        self.node.transaction_url(digest)
    }

    // ============ 连通性检查 ============

    /// 通过 `rpc.discover` 检查节点是否可达；任何错误都视为不可达
    pub async fn check_rpc_connection(&self, url: Option<&str>) -> bool {
        let url = url.unwrap_or(&self.node.rpc_url);
        match probe_rpc(url, &self.rpc_config).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Sui RPC connection check failed");
                false
            }
        }
    }

    /// 未提供 WebSocket 订阅，始终视为可用
    pub async fn check_ws_connection(&self, _url: Option<&str>) -> bool {
        true
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("network", &self.network)
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// 配置中的 URL 优先，其余取网络默认值
fn resolve_node(network: &NetworkConfig) -> NodeConfig {
    let mut node = network.network().default_node();
    if let Some(rpc_url) = &network.rpc_url {
        node.rpc_url = rpc_url.clone();
    }
    if let Some(ws_url) = &network.ws_url {
        node.ws_url = Some(ws_url.clone());
    }
    node
}

async fn probe_rpc(url: &str, config: &RpcConfig) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
        .build()?;

    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "rpc.discover",
        "params": [],
    });

    let response = client.post(url).json(&payload).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    let json: serde_json::Value = response.json().await?;
    crate::infrastructure::rpc_validator::validate_rpc_response(&json)
}
