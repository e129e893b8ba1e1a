//! Human-readable magnitudes for KPI cards: `$2.50M`, `1.50K kg`, `12.345`.
//!
//! Tiers are picked on the absolute value and the value is scaled exactly once,
//! so `1.5e9` renders as `$1.50B`, never `$1500.00M`. Negative values mirror
//! positive ones with a leading `-`. Non-finite input never panics: NaN renders
//! as `NaN` and infinities as `inf`/`-inf`, with the usual prefix or unit.

use num_format::{Locale, ToFormattedString};

const CURRENCY_TIERS: [(f64, &str); 3] = [(1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];
const WEIGHT_TIERS: [(f64, &str); 2] = [(1.0e6, "M"), (1.0e3, "K")];

/// Pick the largest tier whose threshold is `<= |value|`.
/// Returns (scale, suffix), e.g. (1e6, "M"); (1.0, "") below every threshold.
fn choose_tier(abs: f64, tiers: &[(f64, &'static str)]) -> (f64, &'static str) {
    tiers
        .iter()
        .copied()
        .find(|&(threshold, _)| abs >= threshold)
        .unwrap_or((1.0, ""))
}

/// Sign and scaled magnitude, e.g. `-1500.0` -> `("-", "1.50", "K")`.
fn scaled_parts(value: f64, tiers: &[(f64, &'static str)]) -> (&'static str, String, &'static str) {
    if value.is_nan() {
        return ("", "NaN".to_string(), "");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs.is_infinite() {
        return (sign, "inf".to_string(), "");
    }
    let (scale, suffix) = choose_tier(abs, tiers);
    (sign, format!("{:.2}", abs / scale), suffix)
}

/// Format a US dollar amount with a B/M/K suffix.
///
/// ```
/// use comex_viz::format::format_currency;
/// assert_eq!(format_currency(999.0), "$999.00");
/// assert_eq!(format_currency(2_500_000.0), "$2.50M");
/// ```
pub fn format_currency(value: f64) -> String {
    let (sign, number, suffix) = scaled_parts(value, &CURRENCY_TIERS);
    format!("{sign}${number}{suffix}")
}

/// Format a mass in kilograms with an M/K prefix on the unit: `2.00M kg`.
pub fn format_weight(value: f64) -> String {
    let (sign, number, suffix) = scaled_parts(value, &WEIGHT_TIERS);
    format!("{sign}{number}{suffix} kg")
}

/// Average price per kilogram, as shown on the country-analysis KPI card.
pub fn format_price_per_kg(value: f64) -> String {
    format!("US$ {value:.2}")
}

/// Share of a total, e.g. `12.34% of total`.
pub fn format_share(percent: f64) -> String {
    format!("{percent:.2}% of total")
}

/// Integer with locale thousands separators, e.g. `12.345` for `pt`.
pub fn format_count(n: u64, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    n.to_formatted_string(locale)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `pt`, `pt_BR`, `en`, `us`, `en_US`, `de`,
/// `fr`, `es`, `it`, `nl`. Defaults to Portuguese, the dashboard's home locale.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "en" | "us" | "en_us" | "english" => (&Locale::en, '.'),
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::pt, ','), // pt, pt_br, default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup() {
        assert_eq!(choose_tier(0.0, &CURRENCY_TIERS), (1.0, ""));
        assert_eq!(choose_tier(1.0e3, &CURRENCY_TIERS), (1.0e3, "K"));
        assert_eq!(choose_tier(5.0e12, &CURRENCY_TIERS), (1.0e9, "B"));
        assert_eq!(choose_tier(5.0e12, &WEIGHT_TIERS), (1.0e6, "M"));
    }

    #[test]
    fn locale_fallback_is_portuguese() {
        assert_eq!(map_locale("xx").1, ',');
        assert_eq!(map_locale("en-US").1, '.');
    }
}
