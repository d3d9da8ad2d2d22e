//! Formatação para exibição (es-MX): moeda, datas, porcentagens e escape de HTML.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// `1234.5` => `$1,234.50`
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

pub fn format_count(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&value.unsigned_abs().to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `12.3456` => `12.35%`
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// `05 ene 2024`
pub fn format_date(value: DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        value.day(),
        MONTHS[value.month0() as usize],
        value.year()
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
