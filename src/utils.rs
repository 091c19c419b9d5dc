use chrono::DateTime;

/// Rounds to a whole number and groups digits by thousands: `1,234,568`.
pub fn group_thousands(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = x.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn usd(x: f64, decimals: usize) -> String {
    format!("${x:.decimals$}")
}

pub fn usd_grouped(x: f64) -> String {
    format!("${}", group_thousands(x))
}

pub fn percent(x: f64) -> String {
    format!("{x:.2}%")
}

/// Formats a Unix-seconds key as UTC time; other keys are returned unchanged.
pub fn format_ts(key: &str) -> String {
    key.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| key.to_string())
}
