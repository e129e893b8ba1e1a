use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A Plotly figure: ordered traces plus a layout object.
///
/// Traces and layout stay loosely typed (`serde_json`), since the backend emits
/// whatever Plotly attributes each chart needs. Other top-level keys such as
/// `config` or `frames` are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default, deserialize_with = "de_vec_or_null")]
    pub data: Vec<Value>,
    /// Always present after decoding; a missing or `null` layout becomes `{}`.
    #[serde(default, deserialize_with = "de_object_or_null")]
    pub layout: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartSpec {
    pub fn new(data: Vec<Value>, layout: Map<String, Value>) -> Self {
        Self {
            data,
            layout,
            extra: Map::new(),
        }
    }

    /// Decode a chart the backend shipped as a JSON string (Plotly `to_json` output).
    pub fn from_json_str(name: &str, s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|source| DashError::Decode {
            what: format!("chart {name:?}"),
            source,
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Serde helper: accept a JSON object or `null` (treated as empty).
fn de_object_or_null<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(D::Error::custom(format!(
            "expected layout object, found {other}"
        ))),
    }
}

/// Serde helper: accept a JSON array or `null` (treated as empty).
fn de_vec_or_null<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One transport mode (sea, air, road...) and its share of the export value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportShare {
    pub via: String,
    #[serde(default)]
    pub valor: f64,
    #[serde(default)]
    pub percentual: f64,
}

/// Headline numbers of the monthly dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardKpis {
    pub total_fob: f64,
    pub total_weight_kg: f64,
    pub num_countries: u64,
    pub num_products: u64,
    pub transport_data: Option<Vec<TransportShare>>,
}

/// Headline numbers of the per-country analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryKpis {
    pub total_fob: f64,
    pub total_peso_kg: f64,
    pub num_produtos: u64,
    pub preco_medio_kg: f64,
}

/// `/api/dashboard-data` body. Chart values are serialized `ChartSpec`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub kpis: DashboardKpis,
    #[serde(default)]
    pub charts: BTreeMap<String, String>,
}

/// `/api/analise-pais-data` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryAnalysis {
    #[serde(default)]
    pub kpis: CountryKpis,
    #[serde(default)]
    pub charts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NcmInfo {
    pub ncm: String,
    #[serde(default)]
    pub descricao: String,
}

/// Per-product (NCM) series block of `/api/series-temporais`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NcmSeries {
    pub info: NcmInfo,
    pub grafico_valor: Option<String>,
    pub grafico_preco_medio: Option<String>,
    pub grafico_paises: Option<String>,
}

/// `/api/series-temporais` body: charts sit at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesData {
    pub grafico_valor_total: Option<String>,
    pub grafico_volume: Option<String>,
    pub grafico_paises_tempo: Option<String>,
    pub top_ncms: Vec<Value>,
    pub ncm_individual: BTreeMap<String, NcmSeries>,
}

impl SeriesData {
    /// Flatten every chart into `(name, json)` pairs, top-level charts first.
    /// Per-NCM charts are named `ncm-valor-<code>`, `ncm-preco-<code>`, `ncm-paises-<code>`.
    pub fn charts(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for (name, chart) in [
            ("grafico_valor_total", &self.grafico_valor_total),
            ("grafico_volume", &self.grafico_volume),
            ("grafico_paises_tempo", &self.grafico_paises_tempo),
        ] {
            if let Some(s) = chart {
                out.push((name.to_string(), s.as_str()));
            }
        }
        for series in self.ncm_individual.values() {
            let code = &series.info.ncm;
            for (prefix, chart) in [
                ("ncm-valor", &series.grafico_valor),
                ("ncm-preco", &series.grafico_preco_medio),
                ("ncm-paises", &series.grafico_paises),
            ] {
                if let Some(s) = chart {
                    out.push((format!("{prefix}-{code}"), s.as_str()));
                }
            }
        }
        out
    }
}

/// `/api/paises` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryList {
    #[serde(default)]
    pub paises: Vec<String>,
}

/// `/api/produtos-pais` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub produtos: Vec<String>,
}

/// Year and month of the period being inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

/// Filters of the country-analysis page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryQuery {
    pub period: Period,
    pub pais: String,
    /// Free-text product filter; blank means "all products".
    pub produto: Option<String>,
}

/// Time bucket of the time-series page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Aggregation {
    pub fn to_query_param(&self) -> &'static str {
        match *self {
            Aggregation::Monthly => "mensal",
            Aggregation::Quarterly => "trimestral",
            Aggregation::Yearly => "anual",
        }
    }
}

/// Filters of the time-series page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub aggregation: Aggregation,
}
