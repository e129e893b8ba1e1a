//! Charts currently on screen, re-themed in place when the theme changes.
//!
//! A theme switch recolours the last fetched specs; nothing is fetched again.
//!
//! ```
//! use comex_viz::board::ChartBoard;
//! use comex_viz::theme::{Theme, ThemeStore};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut store = ThemeStore::in_memory();
//! let board = Rc::new(RefCell::new(ChartBoard::new()));
//! ChartBoard::attach(&board, &mut store);
//! store.set_active_theme(Theme::Dark)?;
//! # Ok::<(), comex_viz::error::DashError>(())
//! ```

use crate::error::Result;
use crate::models::ChartSpec;
use crate::palette::PaletteName;
use crate::theme::{Theme, ThemeColors, ThemeStore, apply_theme_to_chart};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// How one chart is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartStyle {
    pub palette: PaletteName,
    pub is_map: bool,
}

impl ChartStyle {
    pub fn new(palette: PaletteName, is_map: bool) -> Self {
        Self { palette, is_map }
    }

    /// Style for a chart name the backend emits. Unknown names get blue, non-map.
    pub fn for_chart(name: &str) -> Self {
        match name {
            "state_chart" => Self::new(PaletteName::Blue, true),
            "country_chart" | "bar_chart" => Self::new(PaletteName::Orange, false),
            n if n.starts_with("ncm-preco") => Self::new(PaletteName::Gray, false),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub spec: ChartSpec,
    pub style: ChartStyle,
}

/// Named charts in display order (sorted by name).
#[derive(Debug, Clone, Default)]
pub struct ChartBoard {
    charts: BTreeMap<String, BoardEntry>,
    theme: Theme,
    palette: Option<PaletteName>,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board that colours every chart it loads with `palette`, whatever its name.
    pub fn with_palette(palette: PaletteName) -> Self {
        Self {
            palette: Some(palette),
            ..Self::default()
        }
    }

    /// Style for a chart loaded under `name`.
    pub fn style_for(&self, name: &str) -> ChartStyle {
        let style = ChartStyle::for_chart(name);
        match self.palette {
            Some(palette) => ChartStyle { palette, ..style },
            None => style,
        }
    }

    /// Decode each `(name, json)` chart and theme it for `store`, styled by
    /// [`ChartBoard::style_for`]. A chart that fails to decode aborts the
    /// whole load, leaving the board unchanged.
    pub fn load<'a, I>(&mut self, charts: I, store: &ThemeStore) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut decoded = Vec::new();
        for (name, json) in charts {
            decoded.push((name.to_string(), ChartSpec::from_json_str(name, json)?));
        }
        let theme = store.active_theme();
        self.theme = theme;
        self.charts.clear();
        for (name, spec) in decoded {
            let style = self.style_for(&name);
            self.insert(name, spec, style);
        }
        Ok(())
    }

    /// Add or replace a chart, theming it for the board's current theme.
    pub fn insert(&mut self, name: impl Into<String>, mut spec: ChartSpec, style: ChartStyle) {
        let colors = ThemeColors::for_theme(self.theme);
        apply_theme_to_chart(&mut spec, &colors, style.palette, style.is_map);
        self.charts.insert(name.into(), BoardEntry { spec, style });
    }

    /// Recolour every chart for `theme`.
    pub fn retheme(&mut self, theme: Theme) {
        self.theme = theme;
        let colors = ThemeColors::for_theme(theme);
        for (name, entry) in self.charts.iter_mut() {
            log::trace!("re-theming chart {name} for {theme}");
            apply_theme_to_chart(
                &mut entry.spec,
                &colors,
                entry.style.palette,
                entry.style.is_map,
            );
        }
    }

    /// Subscribe `board` to theme changes on `store`.
    ///
    /// If the board is still borrowed when the theme changes, that change is
    /// skipped with a warning; call [`ChartBoard::retheme`] once the borrow ends.
    pub fn attach(board: &Rc<RefCell<ChartBoard>>, store: &mut ThemeStore) {
        let board = Rc::clone(board);
        store.subscribe(move |theme| match board.try_borrow_mut() {
            Ok(mut b) => b.retheme(theme),
            Err(_) => log::warn!("chart board busy; not re-themed for {theme}"),
        });
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn get(&self, name: &str) -> Option<&BoardEntry> {
        self.charts.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoardEntry)> {
        self.charts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
