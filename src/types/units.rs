//! Unit formatting helpers.

use alloy::primitives::U256;

/// Decimals of ether.
pub const ETHER_DECIMALS: u8 = 18;

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Format a wei amount as ether.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether_whole() {
        assert_eq!(format_ether(U256::from(1_000_000_000_000_000_000u64)), "1");
    }

    #[test]
    fn test_format_ether_fraction() {
        // 10 wei, as sent by the demo's clear-hash transaction
        assert_eq!(format_ether(U256::from(10u64)), "0.00000000000000001");
        assert_eq!(format_ether(U256::from(1_500_000_000_000_000_000u64)), "1.5");
    }

    #[test]
    fn test_format_units_zero_and_no_decimals() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_gas_cost_formatting() {
        // 150,000 gas at 30 gwei
        let cost = U256::from(150_000u64) * U256::from(30_000_000_000u64);
        assert_eq!(format_ether(cost), "0.0045");
    }
}
