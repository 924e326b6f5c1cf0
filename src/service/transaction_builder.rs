//! 未签名交易构建器
//!
//! 以可编程交易的指令形式（SplitCoins / MergeCoins / TransferObjects）描述转账，
//! 签名前降级为节点交易构建接口（`unsafe_paySui` / `unsafe_pay` / `unsafe_transferObject`）
//! 的调用，由节点完成 BCS 序列化和 gas 选择。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, SuiError},
    models::raw::TransactionBytes,
    service::sui_client::SuiRpc,
    utils::address::SUI_COIN_TYPE,
};

/// 每页拉取的币对象数
const COIN_PAGE_LIMIT: u32 = 50;

/// 指令参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    /// 支付 gas 的 SUI 币
    GasCoin,
    /// 交易输入对象
    Object(String),
    /// 第 N 条指令的结果
    Result(u16),
}

/// 可编程交易指令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SplitCoins {
        coin: Argument,
        amounts: Vec<u64>,
    },
    MergeCoins {
        destination: Argument,
        sources: Vec<Argument>,
    },
    TransferObjects {
        objects: Vec<Argument>,
        recipient: String,
    },
}

/// 未签名交易
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    sender: Option<String>,
    commands: Vec<Command>,
}

impl UnsignedTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    pub fn object(&self, object_id: impl Into<String>) -> Argument {
        Argument::Object(object_id.into())
    }

    /// 追加 SplitCoins，返回拆分结果的引用
    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<u64>) -> Argument {
        self.push(Command::SplitCoins { coin, amounts })
    }

    pub fn merge_coins(&mut self, destination: Argument, sources: Vec<Argument>) -> Argument {
        self.push(Command::MergeCoins {
            destination,
            sources,
        })
    }

    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        recipient: impl Into<String>,
    ) -> Argument {
        self.push(Command::TransferObjects {
            objects,
            recipient: recipient.into(),
        })
    }

    pub fn set_sender_if_not_set(&mut self, sender: impl Into<String>) {
        if self.sender.is_none() {
            self.sender = Some(sender.into());
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn push(&mut self, command: Command) -> Argument {
        let index = self.commands.len() as u16;
        self.commands.push(command);
        Argument::Result(index)
    }

    /// 将指令序列降级为节点构建调用
    ///
    /// `PaySui` 的输入币在 `build` 时按发送方持有的 SUI 币补全
    pub fn lower(&self, gas_budget: u64) -> Result<BuilderCall> {
        let signer = self
            .sender
            .clone()
            .ok_or_else(|| SuiError::UnsupportedInstructionSet("sender is not set".into()))?;

        match self.commands.as_slice() {
            [Command::SplitCoins {
                coin: Argument::GasCoin,
                amounts,
            }, Command::TransferObjects { objects, recipient }]
                if is_single_result(objects, 0) =>
            {
                Ok(BuilderCall::PaySui {
                    signer,
                    input_coins: Vec::new(),
                    recipients: vec![recipient.clone(); amounts.len()],
                    amounts: amounts.clone(),
                    gas_budget,
                })
            }
            [Command::SplitCoins {
                coin: Argument::Object(coin),
                amounts,
            }, Command::TransferObjects { objects, recipient }]
                if is_single_result(objects, 0) =>
            {
                Ok(BuilderCall::Pay {
                    signer,
                    input_coins: vec![coin.clone()],
                    recipients: vec![recipient.clone(); amounts.len()],
                    amounts: amounts.clone(),
                    gas: None,
                    gas_budget,
                })
            }
            [Command::MergeCoins {
                destination: Argument::Object(primary),
                sources,
            }, Command::SplitCoins {
                coin: Argument::Object(split_from),
                amounts,
            }, Command::TransferObjects { objects, recipient }]
                if primary == split_from && is_single_result(objects, 1) =>
            {
                let mut input_coins = vec![primary.clone()];
                for source in sources {
                    match source {
                        Argument::Object(id) => input_coins.push(id.clone()),
                        other => {
                            return Err(SuiError::UnsupportedInstructionSet(format!(
                                "merge source {:?} is not an owned coin",
                                other
                            )))
                        }
                    }
                }

                Ok(BuilderCall::Pay {
                    signer,
                    input_coins,
                    recipients: vec![recipient.clone(); amounts.len()],
                    amounts: amounts.clone(),
                    gas: None,
                    gas_budget,
                })
            }
            [Command::TransferObjects { objects, recipient }] => match objects.as_slice() {
                [Argument::Object(object_id)] => Ok(BuilderCall::TransferObject {
                    signer,
                    object_id: object_id.clone(),
                    gas: None,
                    gas_budget,
                    recipient: recipient.clone(),
                }),
                _ => Err(SuiError::UnsupportedInstructionSet(
                    "only a single owned object can be transferred".into(),
                )),
            },
            commands => Err(SuiError::UnsupportedInstructionSet(format!(
                "{} command(s) do not match a supported transfer shape",
                commands.len()
            ))),
        }
    }

    /// 降级并调用节点构建接口，返回待签名的交易字节
    pub async fn build(&self, client: &dyn SuiRpc, gas_budget: u64) -> Result<TransactionBytes> {
        let mut call = self.lower(gas_budget)?;

        if let BuilderCall::PaySui {
            signer,
            input_coins,
            ..
        } = &mut call
        {
            *input_coins = owned_coin_ids(client, signer, SUI_COIN_TYPE).await?;
            if input_coins.is_empty() {
                return Err(SuiError::InsufficientBalance);
            }
        }

        tracing::debug!(
            method = call.method(),
            commands = self.commands.len(),
            "Building Sui transaction"
        );

        client.build_transaction(&call).await
    }
}

fn is_single_result(objects: &[Argument], index: u16) -> bool {
    matches!(objects, [Argument::Result(i)] if *i == index)
}

/// 拉取地址持有的全部币对象 ID（自动翻页）
async fn owned_coin_ids(client: &dyn SuiRpc, owner: &str, coin_type: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut cursor = None;

    loop {
        let page = client
            .get_coins(owner, Some(coin_type), cursor.clone(), Some(COIN_PAGE_LIMIT))
            .await?;

        if cursor.is_some() && page.next_cursor == cursor {
            tracing::warn!(owner = %owner, coin_type = %coin_type, "Coin page cursor did not advance");
            break;
        }
        ids.extend(page.data.into_iter().map(|coin| coin.coin_object_id));

        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok(ids)
}

/// 节点交易构建接口调用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuilderCall {
    PaySui {
        signer: String,
        input_coins: Vec<String>,
        recipients: Vec<String>,
        amounts: Vec<u64>,
        gas_budget: u64,
    },
    Pay {
        signer: String,
        input_coins: Vec<String>,
        recipients: Vec<String>,
        amounts: Vec<u64>,
        gas: Option<String>,
        gas_budget: u64,
    },
    TransferObject {
        signer: String,
        object_id: String,
        gas: Option<String>,
        gas_budget: u64,
        recipient: String,
    },
}

impl BuilderCall {
    pub fn method(&self) -> &'static str {
        match self {
            Self::PaySui { .. } => "unsafe_paySui",
            Self::Pay { .. } => "unsafe_pay",
            Self::TransferObject { .. } => "unsafe_transferObject",
        }
    }

    /// JSON-RPC 方法名与参数（BigInt<u64> 以字符串传递）
    pub fn to_rpc_request(&self) -> (&'static str, Value) {
        let params = match self {
            Self::PaySui {
                signer,
                input_coins,
                recipients,
                amounts,
                gas_budget,
            } => serde_json::json!([
                signer,
                input_coins,
                recipients,
                stringify(amounts),
                gas_budget.to_string(),
            ]),
            Self::Pay {
                signer,
                input_coins,
                recipients,
                amounts,
                gas,
                gas_budget,
            } => serde_json::json!([
                signer,
                input_coins,
                recipients,
                stringify(amounts),
                gas,
                gas_budget.to_string(),
            ]),
            Self::TransferObject {
                signer,
                object_id,
                gas,
                gas_budget,
                recipient,
            } => serde_json::json!([signer, object_id, gas, gas_budget.to_string(), recipient]),
        };

        (self.method(), params)
    }
}

fn stringify(amounts: &[u64]) -> Vec<String> {
    amounts.iter().map(u64::to_string).collect()
}
