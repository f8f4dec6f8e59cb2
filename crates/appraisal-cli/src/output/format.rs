//! Display formatting for currency, rates, and payback values. The core
//! hands out plain numbers and outcome enums; turning them into strings
//! happens only here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

/// Thousands-grouped money rendering: 8400000000 → "8,400,000,000".
/// Fractions are kept to two decimal places.
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let grouped = group_thousands(&int_part);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Percent rendering of a decimal rate: 0.13 → "13%".
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).round_dp(2).normalize())
}

/// Year-count rendering: 3.5714 → "3.57 years".
pub fn years(value: Decimal) -> String {
    format!("{} years", value.round_dp(2).normalize())
}

/// Render a serialized IRR outcome (`{status, rate}`).
pub fn irr_cell(value: &Value) -> String {
    match value.get("status").and_then(Value::as_str) {
        Some("rate") => value
            .get("rate")
            .map(|r| match decimal_of(r) {
                Some(d) => percent(d),
                None => r.to_string(),
            })
            .unwrap_or_default(),
        Some("not_computable") => "not computable".into(),
        _ => value.to_string(),
    }
}

/// Render a serialized payback outcome (`{status, years}`).
pub fn payback_cell(value: &Value) -> String {
    match value.get("status").and_then(Value::as_str) {
        Some("years") => value
            .get("years")
            .map(|y| match decimal_of(y) {
                Some(d) => years(d),
                None => y.to_string(),
            })
            .unwrap_or_default(),
        Some("never_recovers") => "never recovers".into(),
        _ => value.to_string(),
    }
}

/// Numeric-looking JSON leaf for a table or minimal cell. Decimals
/// serialize as strings, so both forms are accepted; magnitudes of a
/// thousand or more get grouped.
pub fn number_cell(value: &Value) -> String {
    let parsed = decimal_of(value);
    match parsed {
        Some(d) if d.abs() >= dec!(1000) => money(d),
        Some(d) => d.normalize().to_string(),
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(dec!(8400000000)), "8,400,000,000");
        assert_eq!(money(dec!(-455260301.03)), "-455,260,301.03");
        assert_eq!(money(dec!(999)), "999");
        assert_eq!(money(dec!(0)), "0");
    }

    #[test]
    fn test_percent_rendering() {
        assert_eq!(percent(dec!(0.13)), "13%");
        assert_eq!(percent(dec!(0.1238)), "12.38%");
    }

    #[test]
    fn test_years_rendering() {
        assert_eq!(years(dec!(3.5714286)), "3.57 years");
        assert_eq!(years(dec!(2.0)), "2 years");
    }

    #[test]
    fn test_irr_cell() {
        assert_eq!(irr_cell(&json!({"status": "rate", "rate": "0.1238"})), "12.38%");
        assert_eq!(irr_cell(&json!({"status": "not_computable"})), "not computable");
    }

    #[test]
    fn test_payback_cell() {
        assert_eq!(
            payback_cell(&json!({"status": "years", "years": "3.5714"})),
            "3.57 years"
        );
        assert_eq!(
            payback_cell(&json!({"status": "never_recovers"})),
            "never recovers"
        );
    }

    #[test]
    fn test_number_cell_accepts_strings_and_numbers() {
        assert_eq!(number_cell(&json!("8400000000")), "8,400,000,000");
        assert_eq!(number_cell(&json!(5)), "5");
        assert_eq!(number_cell(&json!("0.13")), "0.13");
    }
}
