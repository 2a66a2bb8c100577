//! Conversions between human readable fixed-point decimals and the integer
//! base units contracts operate on.

use {
    alloy::primitives::{
        U256,
        utils::{ParseUnits, Unit},
    },
    anyhow::{Context, Result, bail, ensure},
};

/// Parses a decimal string like `"1.5"` into base units scaled by
/// `10^decimals`.
///
/// Only ASCII digits with at most one `.` are accepted. Negative amounts and
/// amounts with more significant fractional digits than `decimals` are
/// rejected instead of being truncated.
pub fn parse(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    ensure!(!amount.is_empty(), "empty amount");
    ensure!(!amount.starts_with('-'), "negative amount {amount}");
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    ensure!(
        !(whole.is_empty() && fraction.is_empty())
            && whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()),
        "invalid decimal amount {amount:?}"
    );
    let fraction = fraction.trim_end_matches('0');
    ensure!(
        fraction.len() <= usize::from(decimals),
        "amount {amount} has more than {decimals} fractional digits"
    );

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        whole.to_owned()
    } else {
        format!("{whole}.{fraction}")
    };
    let unit = Unit::new(decimals).with_context(|| format!("unsupported decimals {decimals}"))?;
    match ParseUnits::parse_units(&normalized, unit)
        .with_context(|| format!("invalid decimal amount {amount:?}"))?
    {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => bail!("negative amount {amount}"),
    }
}

/// Formats base units as a decimal string scaled down by `10^decimals`.
///
/// Trailing zeros of the fractional part are dropped but at least one
/// fractional digit is always kept, so zero renders as `"0.0"`.
pub fn format(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10).pow(U256::from(decimals));
    let whole = amount / scale;
    let fraction = (amount % scale).to_string();
    let fraction = format!("{fraction:0>width$}", width = usize::from(decimals));
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
