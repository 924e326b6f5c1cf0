//! 交易记录（基础）
//!
//! 按摘要懒加载 `sui_getTransactionBlock` 结果并缓存，所有派生字段都从缓存数据计算

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::{watch, OnceCell};

use crate::{
    config::RpcConfig,
    domain::transaction_status::{TransactionStatus, TransactionType},
    error::{Result, SuiError},
    models::raw::{TransactionBlockResponse, TransactionInput},
    provider::Provider,
    service::sui_client::TransactionBlockOptions,
    utils::amount::{from_mist, parse_units, Number, SUI_DECIMALS},
};

/// 交易输入的结构类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pure,
    Object,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Object => "object",
        }
    }
}

/// `wait` 的参数
#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub max_attempts: u32,
    /// 值变为 `true` 时提前结束等待
    pub cancel: Option<watch::Receiver<bool>>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(4000),
            max_attempts: 30,
            cancel: None,
        }
    }
}

impl WaitOptions {
    pub fn from_config(config: &RpcConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.wait_poll_interval_ms),
            max_attempts: config.wait_max_attempts.max(1),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn deadline(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_attempts)
    }
}

/// `wait` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// 交易达到最终状态
    Settled(TransactionStatus),
    /// 轮询次数用尽仍未确认
    TimedOut,
    /// 调用方取消
    Cancelled,
    /// 查询失败
    Error(SuiError),
}

impl WaitOutcome {
    /// 折叠为交易状态：错误视为失败，超时与取消视为待确认
    pub fn status(&self) -> TransactionStatus {
        match self {
            Self::Settled(status) => *status,
            Self::TimedOut | Self::Cancelled => TransactionStatus::Pending,
            Self::Error(_) => TransactionStatus::Failed,
        }
    }
}

/// 链上交易记录
#[derive(Debug, Clone)]
pub struct Transaction {
    id: String,
    provider: Arc<Provider>,
    data: OnceCell<Arc<TransactionBlockResponse>>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, provider: Arc<Provider>) -> Self {
        Self {
            id: id.into(),
            provider,
            data: OnceCell::new(),
        }
    }

    /// 使用全局 Provider
    pub fn from_instance(id: impl Into<String>) -> Result<Self> {
        Ok(Self::new(id, Provider::instance()?))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    /// 原始交易数据；节点未返回交易体时为 `None`，只缓存已有执行结果的数据
    pub async fn data(&self) -> Result<Option<Arc<TransactionBlockResponse>>> {
        if let Some(data) = self.data.get() {
            return Ok(Some(data.clone()));
        }

        let response = self
            .provider
            .client()
            .get_transaction_block(&self.id, TransactionBlockOptions::full())
            .await
            .map_err(|e| {
                tracing::error!(digest = %self.id, error = %e, "Failed to fetch Sui transaction");
                e
            })?;

        if response.transaction.is_none() {
            return Ok(None);
        }

        let data = Arc::new(response);

        // 尚无执行结果的交易不缓存，下次调用重新查询
        if data.execution_status().is_none() {
            return Ok(Some(data));
        }

        // 并发加载时以先写入者为准
        let _ = self.data.set(data.clone());
        Ok(Some(self.data.get().cloned().unwrap_or(data)))
    }

    pub async fn transaction_type(&self) -> Result<TransactionType> {
        Ok(match self.data().await? {
            Some(data) => {
                TransactionType::classify(data.object_change_count(), data.balance_change_count())
            }
            None => TransactionType::General,
        })
    }

    pub fn url(&self) -> String {
        self.provider.transaction_url(&self.id)
    }

    /// 发送方地址，无数据时为空字符串
    pub async fn signer(&self) -> Result<String> {
        Ok(self
            .data()
            .await?
            .and_then(|data| data.sender().map(str::to_string))
            .unwrap_or_default())
    }

    /// 手续费 = |存储费 + 计算费 - 存储退款|
    pub async fn fee(&self) -> Result<Number> {
        let Some(gas) = self
            .data()
            .await?
            .and_then(|data| data.effects.as_ref().map(|e| e.gas_used.clone()))
        else {
            return Ok(Number::zero(SUI_DECIMALS));
        };

        let total = from_mist(gas.storage()) + from_mist(gas.computation());
        let fee = (total - from_mist(gas.rebate())).abs();

        Ok(Number::new(fee, SUI_DECIMALS))
    }

    /// 所在检查点序号
    pub async fn block_number(&self) -> Result<u64> {
        Ok(self
            .data()
            .await?
            .and_then(|data| data.checkpoint.as_deref().map(parse_units))
            .map_or(0, |n| n as u64))
    }

    /// 时间戳（毫秒）
    pub async fn block_timestamp(&self) -> Result<u64> {
        Ok(self
            .data()
            .await?
            .and_then(|data| data.timestamp_ms.as_deref().map(parse_units))
            .map_or(0, |n| n as u64))
    }

    pub async fn block_datetime(&self) -> Result<Option<DateTime<Utc>>> {
        let millis = self.block_timestamp().await?;
        if millis == 0 {
            return Ok(None);
        }
        Ok(Utc.timestamp_millis_opt(millis as i64).single())
    }

    pub async fn confirmation_count(&self) -> Result<u64> {
        let block_number = self.block_number().await?;
        let latest = self
            .provider
            .client()
            .get_latest_checkpoint_sequence_number()
            .await?;

        Ok(latest.saturating_sub(block_number))
    }

    pub async fn status(&self) -> Result<TransactionStatus> {
        Ok(match self.data().await? {
            Some(data) => TransactionStatus::from_execution_status(data.execution_status()),
            None => TransactionStatus::Pending,
        })
    }

    /// 等待交易达到最终状态
    pub async fn wait(&self, options: WaitOptions) -> WaitOutcome {
        let mut cancel = options.cancel.clone();
        let client = self.provider.client();

        let indexed = tokio::select! {
            result = client.wait_for_transaction(&self.id, options.deadline(), options.poll_interval) => result,
            _ = cancelled(&mut cancel) => return WaitOutcome::Cancelled,
        };

        match indexed {
            Ok(Some(_)) => {}
            Ok(None) => return WaitOutcome::TimedOut,
            Err(e) => return WaitOutcome::Error(e),
        }

        for attempt in 1..=options.max_attempts {
            match self.status().await {
                Ok(TransactionStatus::Pending) => {
                    tracing::debug!(digest = %self.id, attempt, "Sui transaction still pending");
                }
                Ok(status) => return WaitOutcome::Settled(status),
                Err(e) => return WaitOutcome::Error(e),
            }

            if attempt == options.max_attempts {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(options.poll_interval) => {}
                _ = cancelled(&mut cancel) => return WaitOutcome::Cancelled,
            }
        }

        tracing::warn!(digest = %self.id, attempts = options.max_attempts, "Timed out waiting for Sui transaction");
        WaitOutcome::TimedOut
    }

    /// 按结构类型过滤交易输入
    ///
    /// `value_kind` 对 pure 输入匹配 `valueType`（`address`、`u64`…），
    /// 对 object 输入匹配 `objectType`（`immOrOwnedObject`、`sharedObject`）
    pub async fn inputs_by_kind(
        &self,
        kind: InputKind,
        value_kind: Option<&str>,
    ) -> Result<Vec<TransactionInput>> {
        let Some(data) = self.data().await? else {
            return Ok(Vec::new());
        };

        Ok(data
            .inputs()
            .unwrap_or_default()
            .iter()
            .filter(|input| input.kind == kind.as_str())
            .filter(|input| match value_kind {
                None => true,
                Some(expected) => {
                    let actual = match kind {
                        InputKind::Pure => input.value_type.as_deref(),
                        InputKind::Object => input.object_type.as_deref(),
                    };
                    actual == Some(expected)
                }
            })
            .cloned()
            .collect())
    }

    /// 第一个 pure address 输入（接收方）
    pub(crate) async fn first_address_input(&self) -> Result<String> {
        Ok(self
            .inputs_by_kind(InputKind::Pure, Some("address"))
            .await?
            .first()
            .and_then(TransactionInput::value_string)
            .unwrap_or_default())
    }

    /// 第一个 pure u64 输入（最小单位金额）
    pub(crate) async fn first_amount_input(&self) -> Result<u128> {
        Ok(self
            .inputs_by_kind(InputKind::Pure, Some("u64"))
            .await?
            .first()
            .and_then(TransactionInput::value_string)
            .map_or(0, |raw| parse_units(&raw)))
    }
}

/// 取消信号触发时完成；没有信号或发送端已关闭时永不完成
async fn cancelled(cancel: &mut Option<watch::Receiver<bool>>) {
    if let Some(rx) = cancel {
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
    std::future::pending::<()>().await
}
