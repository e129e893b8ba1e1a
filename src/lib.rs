//! comex_viz
//!
//! Presentation layer of an export (trade data) analytics dashboard. Pairs with
//! the `comexviz` CLI.
//!
//! ### Features
//! - Fetch KPIs and pre-rendered Plotly charts from the dashboard backend
//! - Light/dark theme with a persisted preference and change listeners
//! - Recolour any Plotly figure for the active theme and a named palette,
//!   keeping data-bearing attributes such as bubble sizes
//! - Magnitude formatting for currency (`$2.50M`) and weight (`1.50K kg`)
//! - Export themed charts as JSON, KPIs as CSV, or a standalone HTML page
//!
//! ### Example
//! ```no_run
//! use comex_viz::{Client, ThemeStore, board::ChartBoard, models::Period};
//!
//! let client = Client::default();
//! let store = ThemeStore::open_default();
//! let data = client.dashboard(Period { year: 2024, month: 12 })?;
//! let mut board = ChartBoard::new();
//! board.load(data.charts.iter().map(|(k, v)| (k.as_str(), v.as_str())), &store)?;
//! comex_viz::storage::save_charts_json(&board, "charts.json")?;
//! println!("{}", comex_viz::format::format_currency(data.kpis.total_fob));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod board;
pub mod error;
pub mod format;
pub mod kpi;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod report;
pub mod storage;
pub mod theme;

pub use api::Client;
pub use models::ChartSpec;
pub use palette::PaletteName;
pub use theme::{Theme, ThemeColors, ThemeStore, apply_theme_to_chart};
