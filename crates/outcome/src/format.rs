//! Timestamp and amount formatting shared by the reply templates.

use chrono::DateTime;
use sudostake_core::NANOSECONDS_PER_SECOND;

/// 1 NEAR = 10^24 yoctoNEAR; the approximation keeps 6 decimal places,
/// so one display unit is 10^18 yoctoNEAR.
const YOCTO_PER_MICRO_NEAR: u128 = 1_000_000_000_000_000_000;

/// Convert a NEAR block timestamp (nanoseconds since epoch) to a readable
/// UTC datetime, e.g. `2023-11-14 22:13 UTC`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_near_timestamp(ns: i64) -> Option<String> {
    let dt = DateTime::from_timestamp(ns / NANOSECONDS_PER_SECOND, 0)?;
    Some(dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// Best-effort human NEAR approximation of a yoctoNEAR string, rounded
/// half-up to 6 decimal places. `None` when the input is not an integer
/// amount the conversion can handle.
pub fn near_approx(yocto: &str) -> Option<String> {
    let yocto: u128 = yocto.trim().parse().ok()?;
    let mut micro = yocto / YOCTO_PER_MICRO_NEAR;
    let remainder = yocto % YOCTO_PER_MICRO_NEAR;
    if remainder * 2 >= YOCTO_PER_MICRO_NEAR {
        micro += 1;
    }
    Some(format!("{}.{:06}", micro / 1_000_000, micro % 1_000_000))
}

/// Render a raw yoctoNEAR amount with its human approximation appended.
///
/// The raw value is always included; the approximation is omitted, never
/// the raw value, if the conversion fails.
pub fn yocto_with_approx(yocto: &str) -> String {
    match near_approx(yocto) {
        Some(near) => format!("`{yocto}` yoctoNEAR (~{near} NEAR)"),
        None => format!("`{yocto}` yoctoNEAR"),
    }
}
