//! Tolerant number parsing and Indian-grouped currency formatting.
//!
//! Every numeric field on the estimate form is raw text. Parsing never fails:
//! blank or malformed input reads as zero so a half-typed row never blocks the
//! totals. Formatting always rounds to whole rupees.

/// Parses a raw form field into a number, treating anything unusable as zero.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5g"` reads as `12.5`. Empty text, text with no leading number, and
/// values that overflow to infinity all read as `0.0`.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut has_digits = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        has_digits = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            has_digits = true;
        }
    }
    if !has_digits {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Renders a derived number back into a form field.
///
/// Whole numbers carry no decimal point (`250.0` becomes `"250"`) and negative
/// zero is written as `"0"`.
#[must_use]
pub fn amount_to_field(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Rounds to the nearest whole rupee, with halves rounding up (`-2.5` becomes `-2`).
#[must_use]
pub fn round_rupees(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // Subtract from the floor instead of adding 0.5, which would round first.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // Cast safety: float-to-int `as` saturates, and totals never approach i64 range.
    #[allow(clippy::cast_possible_truncation)]
    let whole = rounded as i64;
    whole
}

/// Formats an amount as whole rupees using Indian digit grouping.
///
/// The last three digits form one group and every group before that holds two
/// digits: `1234567.6` becomes `"12,34,568"`. Negative amounts keep their sign.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let rounded = round_rupees(value);
    let digits = rounded.unsigned_abs().to_string();
    let grouped = group_indian(&digits);

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats an amount with a currency symbol in front, e.g. `"₹ 12,34,568"`.
#[must_use]
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{symbol} {}", format_amount(value))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, back) = rest.split_at(rest.len() - 2);
        groups.push(back);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
