//! Format - Number Formatting

/// Format a count with thousand separators
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a duration in milliseconds with two decimals
pub fn format_ms(ms: f64) -> String {
    format!("{ms:.2} ms")
}
