use comex_viz::format::{
    format_count, format_currency, format_price_per_kg, format_share, format_weight,
};

#[test]
fn currency_tiers() {
    assert_eq!(format_currency(999.0), "$999.00");
    assert_eq!(format_currency(1500.0), "$1.50K");
    assert_eq!(format_currency(2_500_000.0), "$2.50M");
    assert_eq!(format_currency(3_000_000_000.0), "$3.00B");
    assert_eq!(format_currency(0.0), "$0.00");
}

#[test]
fn weight_tiers() {
    assert_eq!(format_weight(500.0), "500.00 kg");
    assert_eq!(format_weight(1500.0), "1.50K kg");
    assert_eq!(format_weight(2_000_000.0), "2.00M kg");
    // No billions tier for weight
    assert_eq!(format_weight(3_000_000_000.0), "3000.00M kg");
}

#[test]
fn thresholds_use_the_upper_tier() {
    assert_eq!(format_currency(1e3), "$1.00K");
    assert_eq!(format_currency(1e6), "$1.00M");
    assert_eq!(format_currency(1e9), "$1.00B");
    assert_eq!(format_weight(1e3), "1.00K kg");
    assert_eq!(format_weight(1e6), "1.00M kg");
}

#[test]
fn scales_exactly_once() {
    assert_eq!(format_currency(1.5e9), "$1.50B");
    assert_eq!(format_currency(999_999.0), "$1000.00K");
}

#[test]
fn negative_values_are_symmetric() {
    assert_eq!(format_currency(-1500.0), "-$1.50K");
    assert_eq!(format_currency(-2.0), "-$2.00");
    assert_eq!(format_weight(-2_000_000.0), "-2.00M kg");
    assert_eq!(format_currency(-0.0), "$0.00");
}

#[test]
fn non_finite_values_do_not_panic() {
    assert_eq!(format_currency(f64::NAN), "$NaN");
    assert_eq!(format_currency(f64::INFINITY), "$inf");
    assert_eq!(format_currency(f64::NEG_INFINITY), "-$inf");
    assert_eq!(format_weight(f64::NAN), "NaN kg");
    assert_eq!(format_weight(f64::INFINITY), "inf kg");
}

#[test]
fn helper_formats() {
    assert_eq!(format_price_per_kg(12.5), "US$ 12.50");
    assert_eq!(format_share(45.5), "45.50% of total");
    assert_eq!(format_count(1_234_567, "en"), "1,234,567");
    assert_eq!(format_count(1_234_567, "de"), "1.234.567");
    assert_eq!(format_count(999, "pt"), "999");
}
