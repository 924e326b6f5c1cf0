// RPC响应校验模块 - 防止链上数据污染

use anyhow::Result;

/// 验证交易摘要格式（Base58 编码的 32 字节）
pub fn validate_digest(digest: &str) -> Result<String> {
    let bytes = bs58::decode(digest)
        .into_vec()
        .map_err(|e| anyhow::anyhow!("Invalid transaction digest encoding: {}", e))?;

    if bytes.len() != 32 {
        anyhow::bail!(
            "Invalid transaction digest length: expected 32 bytes, got {}",
            bytes.len()
        );
    }

    Ok(digest.to_string())
}

/// 验证RPC响应格式
pub fn validate_rpc_response(json: &serde_json::Value) -> Result<()> {
    // 检查是否有error字段
    if let Some(error) = json.get("error") {
        let error_code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
        let error_msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        anyhow::bail!("RPC error {}: {}", error_code, error_msg);
    }

    // 检查是否有result字段
    if json.get("result").is_none() {
        anyhow::bail!("Missing result field in RPC response");
    }

    // 检查jsonrpc版本
    if let Some(version) = json.get("jsonrpc") {
        if version.as_str() != Some("2.0") {
            anyhow::bail!("Unsupported JSON-RPC version: {:?}", version);
        }
    }

    Ok(())
}
