use crate::board::ChartBoard;
use crate::kpi::KpiRow;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save KPI rows as CSV with header.
pub fn save_kpis_csv<P: AsRef<Path>>(rows: &[KpiRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("label", "value", "display"))?;
    for r in rows {
        wtr.serialize((r.label, r.value, &r.display))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save every themed chart as one pretty JSON object keyed by chart name.
/// Each value is a Plotly figure (`{data, layout}`) ready for `Plotly.newPlot`.
pub fn save_charts_json<P: AsRef<Path>>(board: &ChartBoard, path: P) -> Result<()> {
    let path = path.as_ref();
    let charts: Map<String, Value> = board
        .iter()
        .map(|(name, entry)| (name.to_string(), entry.spec.to_value()))
        .collect();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(&charts)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChartStyle;
    use crate::kpi::dashboard_rows;
    use crate::models::{ChartSpec, DashboardKpis};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("kpis.csv");
        let jsonp = dir.path().join("charts.json");

        let kpis = DashboardKpis {
            total_fob: 2_500_000.0,
            total_weight_kg: 1500.0,
            num_countries: 12,
            num_products: 3456,
            transport_data: None,
        };
        save_kpis_csv(&dashboard_rows(&kpis, "de"), &csvp).unwrap();

        let mut board = ChartBoard::new();
        board.insert(
            "ncm_chart",
            ChartSpec::new(vec![json!({"type": "bar"})], Map::new()),
            ChartStyle::default(),
        );
        save_charts_json(&board, &jsonp).unwrap();

        let csv_text = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv_text.starts_with("label,value,display"));
        assert!(csv_text.contains("$2.50M"));
        assert!(csv_text.contains("3.456"));

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&jsonp).unwrap()).unwrap();
        assert_eq!(saved["ncm_chart"]["data"][0]["type"], "bar");
        assert_eq!(saved["ncm_chart"]["layout"]["paper_bgcolor"], "#FFFFFF");
    }
}
