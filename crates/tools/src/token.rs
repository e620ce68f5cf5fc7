//! Fungible token metadata and smallest-unit amount formatting.
//!
//! The contract speaks in each token's smallest unit (strings) and in
//! yoctoNEAR; users speak in whole tokens. All conversions here are pure
//! `u128` integer math with half-up rounding.

use sudostake_config::NetworkProfile;

/// Metadata for one supported fungible token.
#[derive(Debug, Clone)]
pub struct TokenMeta {
    pub symbol: String,
    pub contract: String,
    pub decimals: u32,
}

/// The tokens accepted as loan denominations on the active network.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: Vec<TokenMeta>,
}

impl TokenRegistry {
    /// USDC is the only supported denomination today; its contract address
    /// comes from the network profile.
    pub fn for_profile(profile: &NetworkProfile) -> Self {
        Self {
            tokens: vec![TokenMeta {
                symbol: "USDC".to_string(),
                contract: profile.usdc_contract.clone(),
                decimals: 6,
            }],
        }
    }

    /// Look up by user-facing denomination name, case-insensitively.
    pub fn by_denom(&self, denom: &str) -> Option<&TokenMeta> {
        let wanted = denom.trim().to_ascii_lowercase();
        self.tokens
            .iter()
            .find(|t| t.symbol.to_ascii_lowercase() == wanted)
    }

    /// Look up by token contract account ID.
    pub fn by_contract(&self, contract: &str) -> Option<&TokenMeta> {
        self.tokens.iter().find(|t| t.contract == contract)
    }
}

/// Scale a whole-unit amount up to the token's smallest unit.
pub fn scale_up(amount: u64, decimals: u32) -> u128 {
    u128::from(amount) * 10u128.pow(decimals)
}

/// Round a smallest-unit string down to whole units, half-up. Returns
/// `None` when `raw` is not an unsigned integer string.
pub fn whole_units(raw: &str, decimals: u32) -> Option<String> {
    let value: u128 = raw.trim().parse().ok()?;
    Some(round_scaled(value, decimals).to_string())
}

/// Format a smallest-unit string as a human number with thousands
/// separators and at most `digits` fractional digits (trailing zeros
/// trimmed). Returns `None` when `raw` is not an unsigned integer string.
pub fn format_scaled(raw: &str, decimals: u32, digits: u32) -> Option<String> {
    let value: u128 = raw.trim().parse().ok()?;
    let rescaled = if decimals >= digits {
        round_scaled(value, decimals - digits)
    } else {
        value.checked_mul(10u128.pow(digits - decimals))?
    };
    Some(format_with_digits(rescaled, digits))
}

/// Render `value` (in units of 10^-scale) with separators, trimming
/// trailing fractional zeros.
pub(crate) fn format_with_digits(value: u128, scale: u32) -> String {
    let base = 10u128.pow(scale);
    let whole = group_thousands(value / base);
    if scale == 0 {
        return whole;
    }
    let frac = format!("{:0width$}", value % base, width = scale as usize);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{whole}.{frac}")
    }
}

/// Parse a NEAR decimal string (`"0.5"`, `"2"`, `"10.25"`) into yoctoNEAR.
/// Rejects signs, exponents, and more than 24 fractional digits.
pub(crate) fn parse_near_amount(text: &str) -> Option<u128> {
    let text = text.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 24 {
        return None;
    }
    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_value: u128 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    whole_value
        .checked_mul(10u128.pow(24))?
        .checked_add(frac_value * 10u128.pow(24 - frac.len() as u32))
}

/// yoctoNEAR → NEAR with exactly five decimal places.
pub(crate) fn near_fixed5(yocto: u128) -> String {
    // Half-up at 10^19 leaves five fractional digits.
    let hundred_thousandths = (yocto + 5 * 10u128.pow(18)) / 10u128.pow(19);
    format!(
        "{}.{:05}",
        hundred_thousandths / 100_000,
        hundred_thousandths % 100_000
    )
}

fn round_scaled(value: u128, drop_digits: u32) -> u128 {
    if drop_digits == 0 {
        return value;
    }
    let base = 10u128.pow(drop_digits);
    (value + base / 2) / base
}

fn group_thousands(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push((n % 1000) as u16);
        n /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{g:03}"));
    }
    out
}
