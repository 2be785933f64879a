//! Centralized display formatting.
//!
//! All numeric cell values and the population banner go through
//! [`format_number`]; every string that ends up inside HTML goes through
//! [`escape_html`].

use serde::{Deserialize, Serialize};

/// Grouping/decimal separator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberStyle {
    /// `1,234,567.5`
    #[default]
    Standard,
    /// `1.234.567,5`
    European,
}

impl NumberStyle {
    fn separators(self) -> (char, char) {
        match self {
            NumberStyle::Standard => (',', '.'),
            NumberStyle::European => ('.', ','),
        }
    }
}

/// Format a number with thousands grouping and at most three fraction digits.
///
/// Trailing fraction zeros are dropped, so integers never show a decimal part.
///
/// # Examples
/// ```
/// use worldreport_core::format::{format_number, NumberStyle};
/// assert_eq!(format_number(1_500_000.0, NumberStyle::Standard), "1,500,000");
/// assert_eq!(format_number(1234.5678, NumberStyle::Standard), "1,234.568");
/// assert_eq!(format_number(1234.5, NumberStyle::European), "1.234,5");
/// assert_eq!(format_number(-999.0, NumberStyle::Standard), "-999");
/// ```
pub fn format_number(n: f64, style: NumberStyle) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let (group_sep, decimal_sep) = style.separators();

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // "-0.0001" rounds to zero; no sign for it.
    if n < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(group_sep);
        }
        out.push(c);
    }
    if !frac_part.is_empty() {
        out.push(decimal_sep);
        out.push_str(frac_part);
    }
    out
}

/// Escape the three characters that can open markup: `&`, `<`, `>`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0, NumberStyle::Standard), "0");
        assert_eq!(format_number(999.0, NumberStyle::Standard), "999");
        assert_eq!(format_number(1000.0, NumberStyle::Standard), "1,000");
        assert_eq!(format_number(6_078_749_450.0, NumberStyle::Standard), "6,078,749,450");
        assert_eq!(format_number(6_078_749_450.0, NumberStyle::European), "6.078.749.450");
    }

    #[test]
    fn fraction_is_rounded_and_trimmed() {
        assert_eq!(format_number(12.5, NumberStyle::Standard), "12.5");
        assert_eq!(format_number(0.1234, NumberStyle::Standard), "0.123");
        assert_eq!(format_number(2.0004, NumberStyle::Standard), "2");
        assert_eq!(format_number(-0.0001, NumberStyle::Standard), "0");
        assert_eq!(format_number(-1234.25, NumberStyle::Standard), "-1,234.25");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & co"),
            "&lt;script&gt;alert('x')&lt;/script&gt; &amp; co"
        );
        assert_eq!(escape_html("São Paulo"), "São Paulo");
    }
}
