//! Sui Ed25519 密钥对
//!
//! 私钥支持三种输入：
//! - `suiprivkey1…`（Bech32，数据 = 标志字节 0x00 + 32 字节私钥）
//! - Base64（32 字节私钥，或带 0x00 标志的 33 字节）
//! - Hex（32 字节，可带 0x 前缀）

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use blake2::{digest::consts::U32, Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};
use zeroize::Zeroizing;

use crate::error::{Result, SuiError};

type Blake2b256 = Blake2b<U32>;

/// Ed25519 签名方案标志
pub const ED25519_FLAG: u8 = 0x00;

const SUI_PRIVATE_KEY_HRP: &str = "suiprivkey";

/// 意图前缀：TransactionData / V0 / Sui
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

pub struct SuiKeypair {
    signing_key: SigningKey,
}

impl SuiKeypair {
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    /// 解析私钥字符串
    pub fn from_secret(secret: &str) -> Result<Self> {
        let secret = secret.trim();
        let bytes = if secret.starts_with(SUI_PRIVATE_KEY_HRP) {
            decode_bech32(secret)?
        } else if let Some(bytes) = decode_hex(secret) {
            bytes
        } else {
            let decoded = Zeroizing::new(
                BASE64
                    .decode(secret)
                    .map_err(|_| SuiError::InvalidPrivateKey("unrecognized encoding".into()))?,
            );
            strip_flag(&decoded)?
        };

        Ok(Self::from_bytes(&bytes))
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// 地址 = 0x + hex(blake2b256(flag || pubkey))
    pub fn address(&self) -> String {
        let digest: [u8; 32] = Blake2b256::new()
            .chain_update([ED25519_FLAG])
            .chain_update(self.public_key_bytes())
            .finalize()
            .into();

        format!("0x{}", hex::encode(digest))
    }

    /// 对交易字节签名，返回序列化签名 base64(flag || sig || pubkey)
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest: [u8; 32] = Blake2b256::new()
            .chain_update(TRANSACTION_INTENT)
            .chain_update(tx_bytes)
            .finalize()
            .into();

        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key_bytes());

        BASE64.encode(serialized)
    }

    /// 导出为 `suiprivkey1…`
    pub fn to_sui_private_key(&self) -> Result<String> {
        let hrp = bech32::Hrp::parse(SUI_PRIVATE_KEY_HRP)
            .map_err(|e| SuiError::InvalidPrivateKey(e.to_string()))?;

        let mut data = Zeroizing::new(Vec::with_capacity(33));
        data.push(ED25519_FLAG);
        data.extend_from_slice(self.signing_key.as_bytes());

        bech32::encode::<bech32::Bech32>(hrp, &data)
            .map_err(|e| SuiError::InvalidPrivateKey(e.to_string()))
    }
}

impl std::fmt::Debug for SuiKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiKeypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

fn decode_bech32(secret: &str) -> Result<Zeroizing<[u8; 32]>> {
    let (hrp, data) =
        bech32::decode(secret).map_err(|e| SuiError::InvalidPrivateKey(e.to_string()))?;
    let data = Zeroizing::new(data);

    if hrp.as_str() != SUI_PRIVATE_KEY_HRP {
        return Err(SuiError::InvalidPrivateKey(format!(
            "unexpected prefix: {}",
            hrp
        )));
    }

    match data.split_first() {
        Some((&ED25519_FLAG, rest)) => to_array(rest),
        Some((flag, _)) => Err(SuiError::InvalidPrivateKey(format!(
            "unsupported signature scheme flag: {:#04x}",
            flag
        ))),
        None => Err(SuiError::InvalidPrivateKey("empty key".into())),
    }
}

fn decode_hex(secret: &str) -> Option<Zeroizing<[u8; 32]>> {
    let raw = secret.strip_prefix("0x").unwrap_or(secret);
    if raw.len() != 64 {
        return None;
    }
    let bytes = Zeroizing::new(hex::decode(raw).ok()?);
    to_array(&bytes).ok()
}

fn strip_flag(bytes: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
    match bytes.len() {
        32 => to_array(bytes),
        33 if bytes[0] == ED25519_FLAG => to_array(&bytes[1..]),
        33 => Err(SuiError::InvalidPrivateKey(format!(
            "unsupported signature scheme flag: {:#04x}",
            bytes[0]
        ))),
        n => Err(SuiError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            n
        ))),
    }
}

fn to_array(bytes: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| SuiError::InvalidPrivateKey(format!("expected 32 bytes, got {}", bytes.len())))?;
    Ok(Zeroizing::new(array))
}
