//! Numeric primitives from decorated provider text.
//!
//! Providers report numbers as display strings (`$123.45`, `-3.21%`, `1,234`,
//! `1.2M`) and use `-` or an empty cell for "no data". Nothing here fails: the
//! `parse_*_opt` functions return `None` for unavailable input, and the plain
//! variants collapse that to `0.0`.

use crate::types::{Field, NormalizedSnapshot, RawFieldSnapshot};

/// Recommendation assumed when the provider has none (3 = Hold)
pub const DEFAULT_RECOM: f64 = 3.0;

/// Remove `$`, `%` and `,` and surrounding whitespace.
/// Missing input and the `-` marker both clean to an empty string.
pub fn clean_value(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return String::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return String::new();
    }
    trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a decorated number, `None` when missing or malformed
pub fn parse_number_opt(value: Option<&str>) -> Option<f64> {
    let cleaned = clean_value(value);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fail-soft number parse: unavailable reads as `0.0`
pub fn parse_float(value: Option<&str>) -> f64 {
    parse_number_opt(value).unwrap_or(0.0)
}

/// Parse a volume such as `1.2M`, `500K`, `2B` or `1,234,567`
pub fn parse_volume_opt(value: Option<&str>) -> Option<f64> {
    let raw = value?.trim().replace(',', "");
    if raw.is_empty() || raw == "-" {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last() {
        Some('K') | Some('k') => (&raw[..raw.len() - 1], 1_000.0),
        Some('M') | Some('m') => (&raw[..raw.len() - 1], 1_000_000.0),
        Some('B') | Some('b') => (&raw[..raw.len() - 1], 1_000_000_000.0),
        _ => (raw.as_str(), 1.0),
    };

    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}

pub fn parse_volume(value: Option<&str>) -> f64 {
    parse_volume_opt(value).unwrap_or(0.0)
}

fn text_field(raw: &RawFieldSnapshot, field: Field) -> Option<String> {
    let cleaned = raw.get(field).map(str::trim).unwrap_or_default();
    if cleaned.is_empty() || cleaned == "-" {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Convert a raw snapshot to numbers, recording which fields were unavailable
pub fn normalize(raw: &RawFieldSnapshot) -> NormalizedSnapshot {
    let mut unavailable = Vec::new();
    let mut number = |field: Field| -> Option<f64> {
        let parsed = if field == Field::Volume {
            parse_volume_opt(raw.get(field))
        } else {
            parse_number_opt(raw.get(field))
        };
        if parsed.is_none() {
            unavailable.push(field);
        }
        parsed
    };

    let price = number(Field::Price).unwrap_or(0.0);
    let target_price = number(Field::TargetPrice).unwrap_or(0.0);
    let rsi = number(Field::Rsi14).unwrap_or(0.0);
    let atr = number(Field::Atr).unwrap_or(0.0);
    // Only an absent column defaults to Hold; a present "-" reads as 0.0
    let recom_reported = raw.has_key(Field::Recom);
    let recom = number(Field::Recom).unwrap_or(if recom_reported { 0.0 } else { DEFAULT_RECOM });
    let change_pct = number(Field::Change).unwrap_or(0.0);
    let sma50_pct = number(Field::Sma50).unwrap_or(0.0);
    let sma200_pct = number(Field::Sma200).unwrap_or(0.0);
    let inst_own = number(Field::InstOwn).unwrap_or(0.0);
    let volume = number(Field::Volume).unwrap_or(0.0);

    NormalizedSnapshot {
        ticker: raw.ticker.trim().to_string(),
        price,
        target_price,
        rsi,
        atr,
        recom,
        change_pct,
        sma50_pct,
        sma200_pct,
        inst_own,
        volume,
        industry: text_field(raw, Field::Industry),
        sector: text_field(raw, Field::Sector),
        unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorated_numbers_match_plain() {
        assert_eq!(parse_float(Some("$123.45")), 123.45);
        assert_eq!(parse_float(Some("123.45")), 123.45);
        assert_eq!(parse_float(Some(" 1,234.5 ")), 1234.5);
        assert_eq!(parse_float(Some("-3.21%")), -3.21);
    }

    #[test]
    fn test_missing_and_malformed_collapse_to_zero() {
        assert_eq!(parse_float(None), 0.0);
        assert_eq!(parse_float(Some("-")), 0.0);
        assert_eq!(parse_float(Some("")), 0.0);
        assert_eq!(parse_float(Some("n/a")), 0.0);
        assert_eq!(parse_float(Some("NaN")), 0.0);
    }

    #[test]
    fn test_true_zero_is_distinguishable() {
        assert_eq!(parse_number_opt(Some("0.00%")), Some(0.0));
        assert_eq!(parse_number_opt(Some("-")), None);
        assert_eq!(clean_value(Some("-")), "");
    }

    #[test]
    fn test_volume_suffixes() {
        assert_eq!(parse_volume(Some("1.2M")), 1_200_000.0);
        assert_eq!(parse_volume(Some("500K")), 500_000.0);
        assert_eq!(parse_volume(Some("2B")), 2_000_000_000.0);
        assert_eq!(parse_volume(Some("1,234,567")), 1_234_567.0);
        assert_eq!(parse_volume(Some("-")), 0.0);
        assert_eq!(parse_volume(Some("M")), 0.0);
        assert_eq!(parse_volume(None), 0.0);
    }

    #[test]
    fn test_normalize_snapshot() {
        let raw = RawFieldSnapshot::new(" NVDA ")
            .with(Field::Price, "$50.00")
            .with(Field::TargetPrice, "60")
            .with(Field::Rsi14, "75")
            .with(Field::Atr, "-")
            .with(Field::Sma200, "-10.00%")
            .with(Field::Volume, "1.2M")
            .with(Field::Industry, "Semiconductors");

        let snap = normalize(&raw);

        assert_eq!(snap.ticker, "NVDA");
        assert_eq!(snap.price, 50.0);
        assert_eq!(snap.target_price, 60.0);
        assert_eq!(snap.rsi, 75.0);
        assert_eq!(snap.atr, 0.0);
        assert_eq!(snap.sma200_pct, -10.0);
        assert_eq!(snap.volume, 1_200_000.0);
        assert_eq!(snap.recom, DEFAULT_RECOM);
        assert_eq!(snap.industry.as_deref(), Some("Semiconductors"));
        assert!(snap.sector.is_none());
        assert!(!snap.is_available(Field::Atr));
        assert!(!snap.is_available(Field::Recom));
        assert!(snap.is_available(Field::Price));
    }

    #[test]
    fn test_recom_placeholder_is_zero_not_hold() {
        let dashed = normalize(&RawFieldSnapshot::new("XYZ").with(Field::Recom, "-"));
        assert_eq!(dashed.recom, 0.0);
        assert!(!dashed.is_available(Field::Recom));

        let garbled = normalize(&RawFieldSnapshot::new("XYZ").with(Field::Recom, "n/a"));
        assert_eq!(garbled.recom, 0.0);

        let absent = normalize(&RawFieldSnapshot::new("XYZ"));
        assert_eq!(absent.recom, DEFAULT_RECOM);
    }
}
