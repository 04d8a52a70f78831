/// Display style for one currency: symbol, placement, separators
struct CurrencyStyle {
    symbol: &'static str,
    symbol_first: bool,
    thousands: &'static str,
    decimal: char,
}

fn style_for(currency: &str) -> Option<CurrencyStyle> {
    match currency {
        "USD" => Some(CurrencyStyle {
            symbol: "$",
            symbol_first: true,
            thousands: ",",
            decimal: '.',
        }),
        "EUR" => Some(CurrencyStyle {
            symbol: "€",
            symbol_first: true,
            thousands: ",",
            decimal: '.',
        }),
        "GBP" => Some(CurrencyStyle {
            symbol: "£",
            symbol_first: true,
            thousands: ",",
            decimal: '.',
        }),
        "PLN" => Some(CurrencyStyle {
            symbol: "zł",
            symbol_first: false,
            thousands: " ",
            decimal: ',',
        }),
        _ => None,
    }
}

/// Format an amount per the target currency's locale rules
///
/// Grouping separators and exactly two fraction digits; unrecognised codes
/// fall back to `<amount> <CODE>`.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    match style_for(currency) {
        Some(style) => {
            let body = format_grouped(amount.abs(), style.thousands, style.decimal);
            if style.symbol_first {
                format!("{}{}{}", sign, style.symbol, body)
            } else {
                format!("{}{} {}", sign, body, style.symbol)
            }
        }
        None => format!(
            "{}{} {}",
            sign,
            format_grouped(amount.abs(), ",", '.'),
            currency
        ),
    }
}

/// Format with thousand separators and two fixed fraction digits
fn format_grouped(amount: f64, thousands: &str, decimal: char) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let len = digits.len();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(thousands);
        }
        grouped.push(c);
    }

    format!("{}{}{:02}", grouped, decimal, fraction)
}
