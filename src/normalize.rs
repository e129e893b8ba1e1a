//! Per-trace recolouring.
//!
//! Fills the visual attributes a trace needs for the active palette and theme
//! without discarding values that carry data meaning (bubble `marker.size`).

use crate::palette::{self, PRIMARY};
use crate::theme::ThemeColors;
use serde_json::{Map, Value, json};

/// Plotly trace families, derived from the trace's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Bar,
    Pie,
    Scatter,
    /// Geographic traces: magnitude is encoded by shape colour.
    Map,
    Other,
}

impl TraceKind {
    pub fn of(trace: &Value) -> Self {
        match trace.get("type").and_then(Value::as_str) {
            Some("bar") => TraceKind::Bar,
            Some("pie") => TraceKind::Pie,
            Some("scatter") => TraceKind::Scatter,
            Some("choropleth" | "choroplethmapbox" | "choroplethmap" | "scattergeo") => {
                TraceKind::Map
            }
            _ => TraceKind::Other,
        }
    }
}

/// Get `obj[key]` as an object, replacing a missing or non-object value with `{}`.
fn object_entry<'a>(obj: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = obj
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just made an object"),
    }
}

fn is_set(v: Option<&Value>) -> bool {
    !matches!(v, None | Some(Value::Null))
}

/// Recolour one trace in place.
///
/// `index` is the trace position in the chart; it only selects the scatter colour
/// (`palette[index % len]`). Non-object traces are left untouched.
pub fn normalize_trace(
    trace: &mut Value,
    palette: &[&str],
    index: usize,
    is_map: bool,
    colors: &ThemeColors,
) {
    let kind = TraceKind::of(trace);
    let Value::Object(t) = trace else {
        return;
    };

    if is_map {
        t.insert(
            "colorscale".into(),
            Value::Array(
                palette::map_colorscale()
                    .iter()
                    .map(|(stop, color)| json!([stop, color]))
                    .collect(),
            ),
        );
        if let Some(Value::Object(colorbar)) = t.get_mut("colorbar") {
            colorbar.insert("tickfont".into(), json!({ "color": colors.text }));
            let bare_title = match colorbar.get("title") {
                Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
                _ => None,
            };
            if let Some(text) = bare_title {
                colorbar.insert(
                    "title".into(),
                    json!({ "text": text, "font": { "color": colors.text } }),
                );
            } else if let Some(Value::Object(title)) = colorbar.get_mut("title") {
                title.insert("font".into(), json!({ "color": colors.text }));
            }
        }
    } else if palette.is_empty() {
        log::warn!("empty palette; leaving {kind:?} trace colours as-is");
    } else {
        match kind {
            TraceKind::Bar => {
                let marker = object_entry(t, "marker");
                marker.insert("color".into(), json!(palette));
                marker.insert(
                    "line".into(),
                    json!({ "color": colors.background, "width": 1.5 }),
                );
            }
            TraceKind::Pie => {
                let marker = object_entry(t, "marker");
                marker.insert("colors".into(), json!(palette));
                marker.insert(
                    "line".into(),
                    json!({ "color": colors.background, "width": 2 }),
                );
            }
            TraceKind::Scatter => {
                let color = palette[index % palette.len()];
                let line = object_entry(t, "line");
                line.insert("color".into(), json!(color));
                line.insert("width".into(), json!(3));
                let marker = object_entry(t, "marker");
                marker.insert("color".into(), json!(color));
                // Bubble charts encode magnitude in marker.size.
                if !is_set(marker.get("size")) {
                    marker.insert("size".into(), json!(6));
                }
            }
            TraceKind::Map | TraceKind::Other => {}
        }
    }

    let has_hover = t
        .get("hovertemplate")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if has_hover {
        t.insert(
            "hoverlabel".into(),
            json!({
                "bgcolor": PRIMARY,
                "font": { "color": "#FFFFFF", "family": colors.font_family },
            }),
        );
    }
}
