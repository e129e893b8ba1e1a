/// Blocking client for the export dashboard backend.
///
/// Every endpoint returns a JSON object. A non-2xx status, or a JSON `error`
/// field in an otherwise successful response, is surfaced as a [`DashError`]
/// instead of a partial result. Requests are never retried; the caller decides
/// whether to ask again.
///
/// Typical usage:
/// ```no_run
/// # use comex_viz::{Client, models::Period};
/// let client = Client::default();
/// let data = client.dashboard(Period { year: 2024, month: 12 })?;
/// println!("{} charts", data.charts.len());
/// # Ok::<(), comex_viz::error::DashError>(())
/// ```
use crate::error::{DashError, Result};
use crate::models::{
    CountryAnalysis, CountryList, CountryQuery, DashboardData, Period, ProductList, SeriesData,
    SeriesQuery,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Same unescaped set as JavaScript's encodeURIComponent
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build `k1=v1&k2=v2` with percent-encoded values.
pub fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, percent_encoding::utf8_percent_encode(v, SAFE)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Turn an HTTP status and body into a payload or the matching error.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str, what: &str) -> Result<T> {
    let parsed: std::result::Result<Value, _> = serde_json::from_str(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|v| v.get("error").map(error_text))
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        return Err(DashError::Status { status, message });
    }

    let value = parsed.map_err(|source| DashError::Decode {
        what: what.to_string(),
        source,
    })?;
    if let Some(err) = value.get("error").filter(|e| !e.is_null()) {
        return Err(DashError::Reported(error_text(err)));
    }
    serde_json::from_value(value).map_err(|source| DashError::Decode {
        what: what.to_string(),
        source,
    })
}

fn error_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn period_pairs(period: Period) -> Vec<(&'static str, String)> {
    vec![
        ("year", period.year.to_string()),
        ("month", period.month.to_string()),
    ]
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("comex_viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!(
            "{}{}?{}",
            self.base_url.trim_end_matches('/'),
            path,
            encode_query(query)
        );
        log::debug!("GET {url}");

        let resp = self.http.get(&url).send().map_err(|e| {
            log::error!("GET {url} failed: {e}");
            DashError::Transport(e)
        })?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        log::debug!("GET {url} -> HTTP {status}, {} bytes", body.len());

        decode_response(status, &body, path).inspect_err(|e| log::error!("GET {url}: {e}"))
    }

    /// KPIs and charts of the monthly dashboard. Adds a millisecond `t` parameter
    /// so intermediate caches never serve a stale month.
    pub fn dashboard(&self, period: Period) -> Result<DashboardData> {
        let mut query = period_pairs(period);
        query.push(("t", chrono::Utc::now().timestamp_millis().to_string()));
        self.get_json("/api/dashboard-data", &query)
    }

    /// Destination countries with exports in `period`.
    pub fn countries(&self, period: Period) -> Result<Vec<String>> {
        let list: CountryList = self.get_json("/api/paises", &period_pairs(period))?;
        Ok(list.paises)
    }

    /// Products exported to `pais` in `period`. A blank country gives an empty
    /// list without a request.
    pub fn products(&self, period: Period, pais: &str) -> Result<Vec<String>> {
        let pais = pais.trim();
        if pais.is_empty() {
            log::debug!("no country selected; skipping product lookup");
            return Ok(Vec::new());
        }
        let mut query = period_pairs(period);
        query.push(("pais", pais.to_string()));
        let list: ProductList = self.get_json("/api/produtos-pais", &query)?;
        Ok(list.produtos)
    }

    /// KPIs and charts for one destination country, optionally narrowed to a product.
    pub fn country_analysis(&self, q: &CountryQuery) -> Result<CountryAnalysis> {
        let pais = q.pais.trim();
        if pais.is_empty() {
            return Err(DashError::InvalidQuery("select a country".into()));
        }
        let mut query = period_pairs(q.period);
        query.push(("pais", pais.to_string()));
        if let Some(produto) = q.produto.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            query.push(("produto", produto.to_string()));
        }
        self.get_json("/api/analise-pais-data", &query)
    }

    /// Aggregated and per-product time series between two years (inclusive).
    pub fn time_series(&self, q: &SeriesQuery) -> Result<SeriesData> {
        if q.start_year > q.end_year {
            return Err(DashError::InvalidQuery(format!(
                "start year {} is after end year {}",
                q.start_year, q.end_year
            )));
        }
        let query = [
            ("ano_inicio", q.start_year.to_string()),
            ("ano_fim", q.end_year.to_string()),
            ("agregacao", q.aggregation.to_query_param().to_string()),
        ];
        self.get_json("/api/series-temporais", &query)
    }
}
