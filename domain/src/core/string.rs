//! Text helpers for log previews and number display.

/// One-line preview of `s` for log messages.
///
/// Line breaks become spaces and the result holds at most `max_chars`
/// characters, the last three being `...` when anything was cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Render a number the way a data analyst would read it.
///
/// Integral values print without a decimal point (`42.0` → `"42"`),
/// everything else keeps at most four decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(truncate("mean age?", 20), "mean age?");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("ééééééé", 6), "ééé...");
    }

    #[test]
    fn test_truncate_flattens_lines() {
        assert_eq!(truncate("total\nsales", 20), "total sales");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
