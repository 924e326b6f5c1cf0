//! Domain 模块
//!
//! 网络配置、交易状态枚举与密钥对

pub mod chain_config;
pub mod keypair;
pub mod transaction_status;

// 重新导出常用类型
pub use chain_config::{NodeConfig, SuiNetwork};
pub use keypair::SuiKeypair;
pub use transaction_status::{AssetDirection, TransactionStatus, TransactionType};
