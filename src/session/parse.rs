use thiserror::Error;

use super::params::Range;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{raw}` is not a number")]
pub struct ParseError {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{value} is outside [{min}, {max}]")]
pub struct RangeError {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

// Digit separators, percent signs, whitespace and currency symbols are decoration.
fn is_decoration(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, ',' | '_' | '\'' | '%' | '$' | '¢' | '£' | '¥' | '€' | '₹')
        || ('\u{20A0}'..='\u{20CF}').contains(&c)
}

pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let cleaned: String = raw.chars().filter(|&c| !is_decoration(c)).collect();
    if !is_plain_decimal(&cleaned) {
        return Err(ParseError {
            raw: raw.to_string(),
        });
    }
    cleaned.parse::<f64>().map_err(|_| ParseError {
        raw: raw.to_string(),
    })
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && digits(whole),
        Some(fraction) => {
            (!whole.is_empty() || !fraction.is_empty()) && digits(whole) && digits(fraction)
        }
    }
}

pub fn validate_in_range(value: f64, range: &Range) -> Result<f64, RangeError> {
    if range.contains(value) {
        Ok(value)
    } else {
        Err(RangeError {
            value,
            min: range.min,
            max: range.max,
        })
    }
}

pub fn parse_in_range(raw: &str, range: &Range) -> Result<f64, InputError> {
    let value = parse_amount(raw)?;
    Ok(validate_in_range(value, range)?)
}

pub fn format_value(value: f64) -> String {
    let plain = value.to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};

    fn rate_range() -> Range {
        Range {
            min: 1.0,
            max: 25.0,
            step: 0.5,
        }
    }

    #[test]
    fn strips_currency_percent_and_separators() {
        assert_eq!(parse_amount("₹25,000"), Ok(25_000.0));
        assert_eq!(parse_amount(" $ 1_000.50 "), Ok(1_000.5));
        assert_eq!(parse_amount("12.5%"), Ok(12.5));
        assert_eq!(parse_amount("1'00'000"), Ok(100_000.0));
        assert_eq!(parse_amount("€\u{a0}7"), Ok(7.0));
        assert_eq!(parse_amount("\u{20BF}3"), Ok(3.0));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("5."), Ok(5.0));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
    }

    #[test]
    fn rejects_non_decimal_text() {
        for raw in ["abc", "12a", "1.2.3", ".", "-", "₹", "inf", "NaN", "1e5", "--2", "0x10"] {
            assert_eq!(
                parse_amount(raw),
                Err(ParseError {
                    raw: raw.to_string()
                }),
                "{raw} should not parse"
            );
        }
    }

    #[test]
    fn range_validation_distinguishes_error_kinds() {
        let range = rate_range();
        assert_eq!(parse_in_range("25%", &range), Ok(25.0));
        assert_eq!(parse_in_range("1", &range), Ok(1.0));
        assert!(matches!(
            parse_in_range("26", &range),
            Err(InputError::Range(RangeError { value, .. })) if value == 26.0
        ));
        assert!(matches!(
            parse_in_range("twelve", &range),
            Err(InputError::Parse(_))
        ));
    }

    #[test]
    fn formats_with_thousands_grouping() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(500.0), "500");
        assert_eq!(format_value(25_000.0), "25,000");
        assert_eq!(format_value(100_000.0), "100,000");
        assert_eq!(format_value(1_234_567.25), "1,234,567.25");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(-1_500.0), "-1,500");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_formatted_value_parses_back_exactly(value in 0.0f64..1.0e9) {
            prop_assert_eq!(parse_amount(&format_value(value)), Ok(value));
        }

        #[test]
        fn prop_step_aligned_values_round_trip(steps in 0u32..=1_990) {
            let value = 500.0 + f64::from(steps) * 500.0;
            prop_assert_eq!(parse_amount(&format_value(value)), Ok(value));
        }
    }
}
