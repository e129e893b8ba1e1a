//! Standalone HTML page that draws themed charts with Plotly.js.
//!
//! The page carries KPI cards and one `<div>` per chart; each chart's spec is
//! embedded as JSON and passed to `Plotly.newPlot`.

use crate::board::ChartBoard;
use crate::kpi::{KpiRow, TransportCard};
use crate::theme::ThemeColors;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Minimal escaping for text placed in HTML element content or attributes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON inside `<script>` must not close the tag early or open an HTML
/// comment. `<` only ever appears inside JSON strings, so `\u003c` is exact.
/// U+2028/U+2029 are line terminators to older JS parsers.
fn script_safe_json(v: &serde_json::Value) -> String {
    v.to_string()
        .replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Element id for a chart name: `ncm_chart` -> `chart-ncm_chart`.
pub fn chart_dom_id(name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("chart-{clean}")
}

/// Render the page.
pub fn render_html(
    title: &str,
    board: &ChartBoard,
    kpis: &[KpiRow],
    transport: Option<&[TransportCard]>,
) -> String {
    let colors = ThemeColors::for_theme(board.theme());
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>
body {{ background: {bg}; color: {text}; font-family: {font}; margin: 24px; }}
.cards {{ display: flex; flex-wrap: wrap; gap: 16px; margin-bottom: 24px; }}
.card {{ border: 1px solid {grid}; border-radius: 8px; padding: 12px 16px; min-width: 160px; }}
.card .label {{ color: {muted}; font-size: 12px; }}
.card .value {{ font-size: 22px; font-weight: 600; }}
.chart {{ height: 420px; margin-bottom: 24px; }}
</style>
</head>
<body>
<h1>{title}</h1>
"#,
        theme = board.theme(),
        title = escape_html(title),
        cdn = PLOTLY_CDN,
        bg = colors.background,
        text = colors.text,
        font = colors.font_family,
        grid = colors.grid,
        muted = colors.text_secondary,
    );

    if !kpis.is_empty() {
        html.push_str("<div class=\"cards\">\n");
        for row in kpis {
            let _ = writeln!(
                html,
                "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                escape_html(row.label),
                escape_html(&row.display)
            );
        }
        html.push_str("</div>\n");
    }

    if let Some(cards) = transport {
        html.push_str("<div class=\"cards\">\n");
        for card in cards {
            let _ = writeln!(
                html,
                "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
                escape_html(&card.title),
                escape_html(&card.value),
                escape_html(&card.note)
            );
        }
        html.push_str("</div>\n");
    }

    for (name, _) in board.iter() {
        let _ = writeln!(html, "<div class=\"chart\" id=\"{}\"></div>", chart_dom_id(name));
    }

    html.push_str("<script>\n");
    for (name, entry) in board.iter() {
        let _ = writeln!(
            html,
            "Plotly.newPlot({id:?}, {data}, {layout}, {{responsive: true, displayModeBar: false}});",
            id = chart_dom_id(name),
            data = script_safe_json(&serde_json::Value::Array(entry.spec.data.clone())),
            layout = script_safe_json(&serde_json::Value::Object(entry.spec.layout.clone())),
        );
    }
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Render and write the page to `path`.
pub fn save_html<P: AsRef<Path>>(
    path: P,
    title: &str,
    board: &ChartBoard,
    kpis: &[KpiRow],
    transport: Option<&[TransportCard]>,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_html(title, board, kpis, transport))
        .with_context(|| format!("write {}", path.display()))
}
