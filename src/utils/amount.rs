//! 金额换算
//!
//! 最小单位（Mist 等）与十进制金额之间的精确定点换算，全部基于 `rust_decimal`，不经过浮点

use std::fmt;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SuiError};

/// SUI 原生币精度：10^9 Mist = 1 SUI
pub const SUI_DECIMALS: u32 = 9;

/// rust_decimal 支持的最大小数位
const MAX_SCALE: u32 = 28;

/// 带精度的十进制数值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Number {
    value: Decimal,
    decimals: u32,
}

impl Number {
    pub fn new(value: Decimal, decimals: u32) -> Self {
        Self { value, decimals }
    }

    pub fn zero(decimals: u32) -> Self {
        Self::new(Decimal::ZERO, decimals)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// 归一到同一精度后比较
    pub fn matches(&self, expected: Decimal) -> bool {
        let scale = self.decimals.min(MAX_SCALE);
        self.value.round_dp(scale) == expected.round_dp(scale)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.normalize())
    }
}

/// 最小单位 → 十进制金额
pub fn from_base_units(amount: u128, decimals: u32) -> Result<Decimal> {
    if decimals > MAX_SCALE {
        return Err(SuiError::InvalidAmount);
    }
    let mantissa = i128::try_from(amount).map_err(|_| SuiError::InvalidAmount)?;
    Decimal::try_from_i128_with_scale(mantissa, decimals).map_err(|_| SuiError::InvalidAmount)
}

/// 十进制金额 → 最小单位（超出精度的部分截断）
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<u128> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SuiError::InvalidAmount);
    }
    if decimals > MAX_SCALE {
        return Err(SuiError::InvalidAmount);
    }

    let mantissa = amount.mantissa();
    let scale = amount.scale();

    let units = if decimals >= scale {
        let factor = 10i128
            .checked_pow(decimals - scale)
            .ok_or(SuiError::InvalidAmount)?;
        mantissa.checked_mul(factor).ok_or(SuiError::InvalidAmount)?
    } else {
        let factor = 10i128
            .checked_pow(scale - decimals)
            .ok_or(SuiError::InvalidAmount)?;
        mantissa / factor
    };

    u128::try_from(units).map_err(|_| SuiError::InvalidAmount)
}

/// SUI → Mist
pub fn to_mist(amount: Decimal) -> Result<u64> {
    let units = to_base_units(amount, SUI_DECIMALS)?;
    u64::try_from(units).map_err(|_| SuiError::InvalidAmount)
}

/// Mist → SUI
pub fn from_mist(amount: u64) -> Decimal {
    // u64 最大约 1.8e19，远小于 rust_decimal 的 96 位尾数上限
    Decimal::from_i128_with_scale(amount as i128, SUI_DECIMALS)
}

/// 解析 RPC 返回的字符串数值（Sui JSON-RPC 把 u64/u128 都编码为字符串）
pub fn parse_units(raw: &str) -> u128 {
    raw.trim().parse::<u128>().unwrap_or(0)
}
