//! Display formatting shared by emails, reports and the sizing table.
//!
//! Thousands are grouped with commas on every platform so server-rendered and
//! client-rendered figures match exactly.

/// Format a rand amount as `R 12,345`. Non-finite values render as `N/A`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("R {}", group_thousands(&format!("{:.0}", value)))
}

/// Currency formatting for optional values (absent → `N/A`)
pub fn format_currency_opt(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

/// Format a number with a fixed number of decimals and grouped thousands.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let fixed = format!("{:.*}", decimals, value);
    match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&fixed),
    }
}

pub fn format_number_opt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format_number(v, decimals))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Replace underscores with spaces ("page_2_plus" → "page 2 plus")
pub fn humanize(code: &str) -> String {
    code.replace('_', " ")
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}
