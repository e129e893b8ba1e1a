//! Display-ready KPI cards.

use crate::format::{format_count, format_currency, format_price_per_kg, format_share, format_weight};
use crate::models::{CountryKpis, DashboardKpis, TransportShare};
use serde::Serialize;

/// Number of transport cards on the dashboard.
pub const TRANSPORT_CARDS: usize = 3;

/// One transport-mode card: subtitle, value, footnote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportCard {
    pub title: String,
    pub value: String,
    pub note: String,
}

impl TransportCard {
    /// Card shown when there is no transport mode for this slot.
    pub fn placeholder() -> Self {
        Self {
            title: "-".into(),
            value: "$0".into(),
            note: "No data".into(),
        }
    }
}

/// Top three transport modes by value, padded with placeholders.
/// `None` or an empty list gives three placeholders.
pub fn transport_cards(data: Option<&[TransportShare]>) -> [TransportCard; TRANSPORT_CARDS] {
    let mut sorted: Vec<&TransportShare> = data.unwrap_or_default().iter().collect();
    if sorted.is_empty() {
        log::debug!("no transport breakdown; showing placeholders");
    }
    sorted.sort_by(|a, b| b.valor.total_cmp(&a.valor));

    std::array::from_fn(|i| match sorted.get(i) {
        Some(share) => TransportCard {
            title: share.via.clone(),
            value: format_currency(share.valor),
            note: format_share(share.percentual),
        },
        None => TransportCard::placeholder(),
    })
}

/// A labelled KPI: raw number and its display string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

impl KpiRow {
    fn new(label: &'static str, value: f64, display: String) -> Self {
        Self {
            label,
            value,
            display,
        }
    }
}

pub fn dashboard_rows(kpis: &DashboardKpis, locale: &str) -> Vec<KpiRow> {
    vec![
        KpiRow::new("total_fob", kpis.total_fob, format_currency(kpis.total_fob)),
        KpiRow::new(
            "total_weight_kg",
            kpis.total_weight_kg,
            format_weight(kpis.total_weight_kg),
        ),
        KpiRow::new(
            "num_countries",
            kpis.num_countries as f64,
            format_count(kpis.num_countries, locale),
        ),
        KpiRow::new(
            "num_products",
            kpis.num_products as f64,
            format_count(kpis.num_products, locale),
        ),
    ]
}

pub fn country_rows(kpis: &CountryKpis, locale: &str) -> Vec<KpiRow> {
    vec![
        KpiRow::new("total_fob", kpis.total_fob, format_currency(kpis.total_fob)),
        KpiRow::new(
            "total_peso_kg",
            kpis.total_peso_kg,
            format_weight(kpis.total_peso_kg),
        ),
        KpiRow::new(
            "num_produtos",
            kpis.num_produtos as f64,
            format_count(kpis.num_produtos, locale),
        ),
        KpiRow::new(
            "preco_medio_kg",
            kpis.preco_medio_kg,
            format_price_per_kg(kpis.preco_medio_kg),
        ),
    ]
}
