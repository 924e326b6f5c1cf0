//! Sui 节点连通性检查
//!
//! 用法：sui_rpc_check [--config <path>] [--rpc-url <url>] [--testnet] [--tx <digest>]

use anyhow::{Context, Result};
use ironcore_sui::{
    config::Config,
    infrastructure::{logging::init_logging, rpc_validator::validate_digest},
    models::{AssetTransaction, AssetTransfer, Transaction},
    provider::Provider,
};

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    rpc_url: Option<String>,
    testnet: bool,
    digest: Option<String>,
}

fn args_from_env() -> Args {
    let mut parsed = Args::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config_path = args.next(),
            "--rpc-url" => parsed.rpc_url = args.next(),
            "--testnet" => parsed.testnet = true,
            "--tx" => parsed.digest = args.next(),
            _ => {}
        }
    }

    parsed
}

#[derive(Debug)]
struct CheckResult {
    name: String,
    ok: bool,
    detail: String,
}

impl CheckResult {
    fn ok(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            ok: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            ok: false,
            detail: detail.into(),
        }
    }
}

async fn describe_transaction(provider: &std::sync::Arc<Provider>, digest: &str) -> CheckResult {
    let name = "transaction";

    if let Err(e) = validate_digest(digest) {
        return CheckResult::fail(name, e.to_string());
    }

    let record = match AssetTransaction::classify(Transaction::new(digest, provider.clone())).await
    {
        Ok(record) => record,
        Err(e) => return CheckResult::fail(name, e.to_string()),
    };

    let tx = record.transaction();
    let summary = async {
        let status = tx.status().await?;
        let fee = tx.fee().await?;
        let checkpoint = tx.block_number().await?;
        let confirmations = tx.confirmation_count().await?;
        let receiver = match &record {
            AssetTransaction::Coin(t) => t.receiver().await?,
            AssetTransaction::Token(t) => t.receiver().await?,
            AssetTransaction::Nft(t) => t.receiver().await?,
            AssetTransaction::Contract(t) => t.address().await?,
            AssetTransaction::General(_) => String::new(),
        };

        Ok::<_, ironcore_sui::SuiError>(format!(
            "type={} status={} fee={} SUI checkpoint={} confirmations={} counterparty={} url={}",
            record.transaction_type(),
            status,
            fee,
            checkpoint,
            confirmations,
            receiver,
            tx.url()
        ))
    };

    match summary.await {
        Ok(detail) => CheckResult::ok(name, detail),
        Err(e) => CheckResult::fail(name, e.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = args_from_env();

    let mut config = Config::from_env_and_file(args.config_path.as_deref())
        .context("load configuration")?;
    if args.testnet {
        config.network.testnet = true;
    }
    if args.rpc_url.is_some() {
        config.network.rpc_url = args.rpc_url.clone();
    }
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let provider = Provider::install(Provider::try_from_config(&config)?)
        .context("initialize Sui provider")?;

    let mut results: Vec<CheckResult> = Vec::new();

    if provider.check_rpc_connection(None).await {
        results.push(CheckResult::ok("rpc.discover", "reachable"));
    } else {
        results.push(CheckResult::fail("rpc.discover", "unreachable"));
    }

    match provider
        .client()
        .get_latest_checkpoint_sequence_number()
        .await
    {
        Ok(checkpoint) => results.push(CheckResult::ok(
            "latest checkpoint",
            checkpoint.to_string(),
        )),
        Err(e) => results.push(CheckResult::fail("latest checkpoint", e.to_string())),
    }

    if let Some(digest) = args.digest.as_deref() {
        results.push(describe_transaction(&provider, digest).await);
    }

    println!(
        "Sui RPC smoke-check against: {} ({})",
        provider.rpc_url(),
        provider.node().name
    );
    let mut failures = 0usize;
    for r in &results {
        if r.ok {
            println!("[OK]   {:20} {}", r.name, r.detail);
        } else {
            failures += 1;
            println!("[FAIL] {:20} {}", r.name, r.detail);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} checks failed", failures);
    }

    Ok(())
}
