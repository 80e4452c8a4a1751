//! Serving-size scaling of displayed ingredient amounts.
//!
//! This is a display transform only: the stored recipe is never mutated.
//! Amounts with a leading numeric or simple-fraction quantity get that
//! quantity multiplied and rounded to the nearest half; anything else
//! ("to taste", "a pinch") passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// Mixed number, e.g. "1 1/2"
static MIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)").expect("Invalid mixed regex"));

/// Simple fraction, e.g. "3/4"
static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)").expect("Invalid fraction regex"));

/// Integer or decimal, e.g. "2" or "2.5"
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)").expect("Invalid number regex"));

/// Scale the leading quantity of an ingredient amount string.
///
/// "2 cups" x 1.5 -> "3 cups"; "1/2 tsp" x 2 -> "1 tsp"; "to taste"
/// passes through for any multiplier. Results round to the nearest half
/// and never drop below one half, with halves rendered as fractions
/// ("1 1/2 cups").
pub fn scale_amount(amount: &str, multiplier: f32) -> String {
    let Some((quantity, rest)) = parse_leading_quantity(amount) else {
        return amount.to_string();
    };

    let scaled = quantity * multiplier;
    let rounded = ((scaled * 2.0).round() / 2.0).max(0.5);

    format!("{}{rest}", format_quantity(rounded))
}

/// Split an amount into its leading quantity and the remainder of the
/// string. Returns `None` when the amount does not start with a number.
fn parse_leading_quantity(amount: &str) -> Option<(f32, &str)> {
    if let Some(cap) = MIXED_RE.captures(amount) {
        let whole: f32 = cap[1].parse().ok()?;
        let numer: f32 = cap[2].parse().ok()?;
        let denom: f32 = cap[3].parse().ok()?;
        if denom == 0.0 {
            return None;
        }
        let end = cap.get(0)?.end();
        return Some((whole + numer / denom, &amount[end..]));
    }

    if let Some(cap) = FRACTION_RE.captures(amount) {
        let numer: f32 = cap[1].parse().ok()?;
        let denom: f32 = cap[2].parse().ok()?;
        if denom == 0.0 {
            return None;
        }
        let end = cap.get(0)?.end();
        return Some((numer / denom, &amount[end..]));
    }

    if let Some(cap) = NUMBER_RE.captures(amount) {
        let value: f32 = cap[1].parse().ok()?;
        let end = cap.get(0)?.end();
        return Some((value, &amount[end..]));
    }

    None
}

/// Render a half-rounded quantity the way recipes print them.
fn format_quantity(value: f32) -> String {
    let whole = value.trunc() as u32;
    let has_half = (value - value.trunc()).abs() > f32::EPSILON;

    match (whole, has_half) {
        (0, _) => "1/2".to_string(),
        (w, false) => w.to_string(),
        (w, true) => format!("{w} 1/2"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_whole_number() {
        assert_eq!(scale_amount("2 cup", 1.5), "3 cup");
    }

    #[test]
    fn test_scales_simple_fraction() {
        assert_eq!(scale_amount("1/2 tsp", 2.0), "1 tsp");
    }

    #[test]
    fn test_scales_mixed_number() {
        assert_eq!(scale_amount("1 1/2 cups flour", 2.0), "3 cups flour");
    }

    #[test]
    fn test_half_results_render_as_fractions() {
        assert_eq!(scale_amount("1 cup", 0.5), "1/2 cup");
        assert_eq!(scale_amount("3 cups", 0.5), "1 1/2 cups");
    }

    #[test]
    fn test_non_numeric_passes_through() {
        assert_eq!(scale_amount("to taste", 3.0), "to taste");
        assert_eq!(scale_amount("a pinch", 0.5), "a pinch");
    }

    #[test]
    fn test_rounds_to_nearest_half() {
        // 2 * 1.1 = 2.2 -> 2; 2 * 1.4 = 2.8 -> 3
        assert_eq!(scale_amount("2 cups", 1.1), "2 cups");
        assert_eq!(scale_amount("2 cups", 1.4), "3 cups");
    }

    #[test]
    fn test_never_rounds_to_zero() {
        assert_eq!(scale_amount("1/4 tsp", 0.5), "1/2 tsp");
    }

    #[test]
    fn test_decimal_quantity() {
        assert_eq!(scale_amount("2.5 cups", 2.0), "5 cups");
    }

    #[test]
    fn test_identity_multiplier_keeps_value() {
        assert_eq!(scale_amount("2 cups", 1.0), "2 cups");
        assert_eq!(scale_amount("1/2 tsp", 1.0), "1/2 tsp");
    }
}
