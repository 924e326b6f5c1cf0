//! Sui 地址与 Move 类型字符串工具

use std::sync::OnceLock;

use regex::Regex;

/// 原生币类型（短格式）
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// 原生币对象类型（短格式）
pub const SUI_COIN_OBJECT_TYPE: &str = "0x2::coin::Coin<0x2::sui::SUI>";

static COIN_TYPE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn coin_type_pattern() -> Option<&'static Regex> {
    COIN_TYPE_PATTERN
        .get_or_init(|| Regex::new(r"Coin<(.+)>").ok())
        .as_ref()
}

/// 地址比较（大小写不敏感）
pub fn addresses_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// 把 `0x2` 这样的短地址展开为 32 字节的规范十六进制形式
pub fn normalize_address(address: &str) -> String {
    let hex = address
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .to_lowercase();
    format!("0x{:0>64}", hex)
}

/// 规范化 Move 类型字符串中出现的所有地址
///
/// `0x2::coin::Coin<0x2::sui::SUI>` 与
/// `0x000…0002::coin::Coin<0x000…0002::sui::SUI>` 规范化后相同
pub fn normalize_type_tag(type_tag: &str) -> String {
    let mut out = String::with_capacity(type_tag.len());
    let mut rest = type_tag.trim();

    while let Some(pos) = rest.find("0x") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let hex_len = after
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(after.len());
        out.push_str(&normalize_address(&after[..hex_len]));
        rest = &after[hex_len..];
    }
    out.push_str(rest);
    out
}

/// 是否为原生 SUI 币对象类型
pub fn is_native_coin_object(object_type: &str) -> bool {
    normalize_type_tag(object_type) == normalize_type_tag(SUI_COIN_OBJECT_TYPE)
}

/// 从 `Coin<T>` 中提取泛型参数 `T`，不匹配时原样返回
pub fn coin_type_param(object_type: &str) -> String {
    coin_type_pattern()
        .and_then(|re| re.captures(object_type))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| object_type.to_string())
}

/// 日志中截断显示地址
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 14 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..8], &address[address.len() - 4..])
}
