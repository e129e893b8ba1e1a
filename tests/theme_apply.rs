use comex_viz::models::ChartSpec;
use comex_viz::palette::PaletteName;
use comex_viz::theme::{Theme, ThemeColors, apply_theme_to_chart, relayout_update};
use serde_json::{Map, json};

fn sample_chart() -> ChartSpec {
    serde_json::from_value(json!({
        "data": [
            {"type": "bar", "x": ["Soja", "Minério"], "y": [10, 20]},
            {"type": "scatter", "mode": "lines", "hovertemplate": "%{y}"},
            {"type": "scatter", "marker": {"size": [5, 50]}}
        ],
        "layout": {
            "title": "Top 10 NCM",
            "xaxis": {"title": "NCM"},
            "yaxis": {"title": "US$"}
        },
        "config": {"responsive": true}
    }))
    .unwrap()
}

#[test]
fn layout_gets_theme_colors_and_font() {
    let dark = ThemeColors::for_theme(Theme::Dark);
    let mut spec = sample_chart();
    apply_theme_to_chart(&mut spec, &dark, PaletteName::Blue, false);

    let l = &spec.layout;
    assert_eq!(l["paper_bgcolor"], "#1A1F2E");
    assert_eq!(l["plot_bgcolor"], "#1A1F2E");
    assert_eq!(
        l["font"],
        json!({"family": "JetBrains Mono, monospace", "color": "#F0F3F7", "size": 12})
    );
    assert_eq!(l["transition"], json!({"duration": 500, "easing": "cubic-in-out"}));
    assert_eq!(l["xaxis"]["gridcolor"], "#2D3648");
    assert_eq!(l["xaxis"]["color"], "#B8C5D6");
    assert_eq!(l["yaxis"]["gridcolor"], "#2D3648");
    // Pre-existing axis attributes survive
    assert_eq!(l["xaxis"]["title"], "NCM");
    // Unknown top-level keys round-trip
    assert_eq!(spec.extra["config"], json!({"responsive": true}));
}

#[test]
fn string_title_becomes_structured() {
    let light = ThemeColors::for_theme(Theme::Light);
    let mut spec = sample_chart();
    apply_theme_to_chart(&mut spec, &light, PaletteName::Blue, false);
    assert_eq!(
        spec.layout["title"],
        json!({
            "text": "Top 10 NCM",
            "font": {"family": "JetBrains Mono, monospace", "color": "#1A1A1A", "size": 16, "weight": 600}
        })
    );
}

#[test]
fn object_title_keeps_its_other_fields() {
    let light = ThemeColors::for_theme(Theme::Light);
    let mut spec: ChartSpec = serde_json::from_value(json!({
        "data": [],
        "layout": {"title": {"text": "Estados", "x": 0.5, "font": {"size": 30}}}
    }))
    .unwrap();
    apply_theme_to_chart(&mut spec, &light, PaletteName::Blue, true);
    assert_eq!(spec.layout["title"]["text"], "Estados");
    assert_eq!(spec.layout["title"]["x"], 0.5);
    assert_eq!(spec.layout["title"]["font"]["size"], 16);
    assert_eq!(spec.layout["title"]["font"]["weight"], 600);
}

#[test]
fn missing_layout_and_axes_are_not_fabricated() {
    let light = ThemeColors::for_theme(Theme::Light);
    let mut spec: ChartSpec = serde_json::from_str(r#"{"data": [{"type": "pie"}], "layout": null}"#).unwrap();
    apply_theme_to_chart(&mut spec, &light, PaletteName::Gray, false);
    assert_eq!(spec.layout["paper_bgcolor"], "#FFFFFF");
    assert!(spec.layout.get("xaxis").is_none());
    assert!(spec.layout.get("yaxis").is_none());
    assert!(spec.layout.get("title").is_none());

    let mut bare: ChartSpec = serde_json::from_str("{}").unwrap();
    apply_theme_to_chart(&mut bare, &light, PaletteName::Blue, false);
    assert!(bare.data.is_empty());
    assert_eq!(bare.layout["plot_bgcolor"], "#FFFFFF");
}

#[test]
fn traces_are_normalized_by_position() {
    let light = ThemeColors::for_theme(Theme::Light);
    let blue = PaletteName::Blue.colors();
    let mut spec = sample_chart();
    apply_theme_to_chart(&mut spec, &light, PaletteName::Blue, false);

    assert_eq!(spec.data[0]["marker"]["color"], json!(blue));
    assert_eq!(spec.data[1]["line"]["color"], blue[1]);
    assert_eq!(spec.data[1]["hoverlabel"]["bgcolor"], "#003B5C");
    assert_eq!(spec.data[2]["line"]["color"], blue[2]);
    assert_eq!(spec.data[2]["marker"]["size"], json!([5, 50]));
}

#[test]
fn applying_twice_is_idempotent() {
    for theme in [Theme::Light, Theme::Dark] {
        let colors = ThemeColors::for_theme(theme);
        for is_map in [false, true] {
            let mut once = sample_chart();
            apply_theme_to_chart(&mut once, &colors, PaletteName::Orange, is_map);
            let mut twice = once.clone();
            apply_theme_to_chart(&mut twice, &colors, PaletteName::Orange, is_map);
            assert_eq!(once, twice, "theme={theme} is_map={is_map}");
        }
    }
}

#[test]
fn returns_the_same_spec() {
    let light = ThemeColors::for_theme(Theme::Light);
    let mut spec = sample_chart();
    let ptr: *const ChartSpec = &spec;
    let out = apply_theme_to_chart(&mut spec, &light, PaletteName::Blue, false);
    assert!(std::ptr::eq(ptr, out));
}

#[test]
fn relayout_update_only_touches_present_axes() {
    let dark = ThemeColors::for_theme(Theme::Dark);
    let mut layout = Map::new();
    layout.insert("xaxis".into(), json!({}));
    let mut overrides = Map::new();
    overrides.insert("height".into(), json!(400));
    overrides.insert("paper_bgcolor".into(), json!("#000000"));

    let update = relayout_update(&layout, &dark, overrides);
    assert_eq!(update["plot_bgcolor"], "#1A1F2E");
    assert_eq!(update["font.color"], "#F0F3F7");
    assert_eq!(update["height"], 400);
    assert_eq!(update["paper_bgcolor"], "#000000");
    assert_eq!(update["xaxis.gridcolor"], "#2D3648");
    assert_eq!(update["xaxis.color"], "#B8C5D6");
    assert!(update.get("yaxis.gridcolor").is_none());
}
