//! Light/dark theme state and chart theming.
//!
//! The active theme lives in a [`ThemeStore`] owned by the application shell:
//! the persisted preference, the currently applied theme, and the listeners
//! to notify when it changes. [`apply_theme_to_chart`] rewrites a
//! [`ChartSpec`] in place for a given set of [`ThemeColors`].

use crate::error::Result;
use crate::models::ChartSpec;
use crate::normalize::normalize_trace;
use crate::palette::PaletteName;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Preference key holding the theme name.
pub const THEME_KEY: &str = "theme";

pub const FONT_FAMILY: &str = "JetBrains Mono, monospace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?} (expected light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Colours and typography derived from a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: &'static str,
    pub paper: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub grid: &'static str,
    pub font_family: &'static str,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemeColors {
                background: "#FFFFFF",
                paper: "#FFFFFF",
                text: "#1A1A1A",
                text_secondary: "#5A6C7D",
                grid: "#E8EEF2",
                font_family: FONT_FAMILY,
            },
            Theme::Dark => ThemeColors {
                background: "#1A1F2E",
                paper: "#1A1F2E",
                text: "#F0F3F7",
                text_secondary: "#B8C5D6",
                grid: "#2D3648",
                font_family: FONT_FAMILY,
            },
        }
    }
}

// ------------------------ Preference storage ------------------------

/// Key-value storage for user preferences.
pub trait Preferences {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-process preferences, lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl Preferences for MemoryPreferences {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory; survives restarts.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    dir: PathBuf,
}

impl FilePreferences {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/comex-viz`, or `./.comex-viz` when the platform has none.
    pub fn default_location() -> Self {
        let dir = dirs::config_dir()
            .map(|d| d.join("comex-viz"))
            .unwrap_or_else(|| PathBuf::from(".comex-viz"));
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Preferences for FilePreferences {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }
}

// ------------------------ Theme store ------------------------

type Listener = Box<dyn FnMut(Theme)>;

/// Owns the theme preference and the theme-change observers.
pub struct ThemeStore {
    prefs: Box<dyn Preferences>,
    applied: Theme,
    listeners: Vec<Listener>,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("applied", &self.applied)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeStore {
    /// Load the persisted theme and apply it.
    pub fn new<P: Preferences + 'static>(prefs: P) -> Self {
        let mut store = Self {
            prefs: Box::new(prefs),
            applied: Theme::default(),
            listeners: Vec::new(),
        };
        store.applied = store.active_theme();
        store
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryPreferences::new())
    }

    /// Store backed by [`FilePreferences::default_location`].
    pub fn open_default() -> Self {
        Self::new(FilePreferences::default_location())
    }

    /// The persisted theme. Missing, unreadable, or unknown values resolve to light.
    pub fn active_theme(&self) -> Theme {
        match self.prefs.read(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|e: UnknownTheme| {
                log::warn!("{e}; falling back to light");
                Theme::Light
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("could not read theme preference: {e}; falling back to light");
                Theme::default()
            }
        }
    }

    /// The theme currently applied to the UI. Updated before listeners run.
    pub fn applied_theme(&self) -> Theme {
        self.applied
    }

    /// Persist `theme`, apply it, then notify every listener once, in
    /// registration order. Nothing is notified when the write fails.
    pub fn set_active_theme(&mut self, theme: Theme) -> Result<()> {
        self.prefs.write(THEME_KEY, theme.as_str())?;
        self.applied = theme;
        log::debug!(
            "theme set to {theme}; notifying {} listener(s)",
            self.listeners.len()
        );
        for listener in self.listeners.iter_mut() {
            listener(theme);
        }
        Ok(())
    }

    /// Flip light/dark and return the new theme.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.active_theme().toggled();
        self.set_active_theme(next)?;
        Ok(next)
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(Theme) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Colours of the persisted theme, recomputed on every call.
    pub fn theme_colors(&self) -> ThemeColors {
        ThemeColors::for_theme(self.active_theme())
    }

    /// [`apply_theme_to_chart`] with the store's current colours.
    pub fn apply_theme_to_chart<'a>(
        &self,
        spec: &'a mut ChartSpec,
        palette: PaletteName,
        is_map: bool,
    ) -> &'a mut ChartSpec {
        apply_theme_to_chart(spec, &self.theme_colors(), palette, is_map)
    }
}

// ------------------------ Chart theming ------------------------

fn title_font(colors: &ThemeColors) -> Value {
    json!({
        "family": colors.font_family,
        "color": colors.text,
        "size": 16,
        "weight": 600,
    })
}

/// Rewrite layout and traces of `spec` for `colors`, returning the same spec.
///
/// Re-applying with the same colours and palette is a no-op.
pub fn apply_theme_to_chart<'a>(
    spec: &'a mut ChartSpec,
    colors: &ThemeColors,
    palette: PaletteName,
    is_map: bool,
) -> &'a mut ChartSpec {
    let layout = &mut spec.layout;

    layout.insert("paper_bgcolor".into(), json!(colors.background));
    layout.insert("plot_bgcolor".into(), json!(colors.paper));
    layout.insert(
        "font".into(),
        json!({ "family": colors.font_family, "color": colors.text, "size": 12 }),
    );
    layout.insert(
        "transition".into(),
        json!({ "duration": 500, "easing": "cubic-in-out" }),
    );

    let bare_title = match layout.get("title") {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    };
    if let Some(text) = bare_title {
        layout.insert(
            "title".into(),
            json!({ "text": text, "font": title_font(colors) }),
        );
    } else if let Some(Value::Object(title)) = layout.get_mut("title") {
        title.insert("font".into(), title_font(colors));
    }

    for axis in ["xaxis", "yaxis"] {
        if let Some(Value::Object(a)) = layout.get_mut(axis) {
            a.insert("gridcolor".into(), json!(colors.grid));
            a.insert("color".into(), json!(colors.text_secondary));
        }
    }

    let shades = palette.colors();
    for (index, trace) in spec.data.iter_mut().enumerate() {
        normalize_trace(trace, shades, index, is_map, colors);
    }

    spec
}

/// Dotted-key Plotly `relayout` update that recolours an already drawn chart.
///
/// `overrides` are merged after the theme keys; axis keys are only emitted for
/// axes present in `layout`.
pub fn relayout_update(
    layout: &Map<String, Value>,
    colors: &ThemeColors,
    overrides: Map<String, Value>,
) -> Map<String, Value> {
    let mut update = Map::new();
    update.insert("paper_bgcolor".into(), json!(colors.background));
    update.insert("plot_bgcolor".into(), json!(colors.paper));
    update.insert("font.color".into(), json!(colors.text));
    update.extend(overrides);

    for axis in ["xaxis", "yaxis"] {
        if layout.get(axis).is_some_and(Value::is_object) {
            update.insert(format!("{axis}.gridcolor"), json!(colors.grid));
            update.insert(format!("{axis}.color"), json!(colors.text_secondary));
        }
    }
    update
}
