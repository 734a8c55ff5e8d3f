//! Norwegian formatting of amounts and day counts for narrated text.

use rust_decimal::Decimal;

/// Format an amount in Norwegian kroner: `1234567.5` becomes `1 234 567,50 kr`.
pub fn format_nok(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}{},{:0<2} kr", sign, grouped, fraction),
        None => format!("{}{} kr", sign, grouped),
    }
}

/// Format a day count: `1 dag`, `10 dager`.
pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 dag".to_string()
    } else {
        format!("{} dager", days)
    }
}
