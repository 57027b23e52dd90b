use rust_decimal::Decimal;

/// Rendering of a metric that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rounds half-to-even and pads to exactly `dp` decimal places.
pub fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

pub fn optional(value: Option<Decimal>, dp: u32) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| fixed(v, dp))
}
