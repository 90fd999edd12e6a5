//! Number formatting for table cells

/// Fixed decimals with a comma thousands separator.
///
/// ```
/// use contracts::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money with two decimals: `19.5` -> `"19.50"`.
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Percentage without trailing zeros: `15.0` -> `"15%"`, `12.5` -> `"12.5%"`.
pub fn format_percent(value: f64) -> String {
    let mut text = format!("{:.2}", value);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    format!("{}%", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(19.5), "19.50");
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.89), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1,234.56");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(123.4, 1), "123.4");
        assert_eq!(format_number_with_decimals(100000.0, 0), "100,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(15.0), "15%");
        assert_eq!(format_percent(12.5), "12.5%");
        assert_eq!(format_percent(0.0), "0%");
    }
}
