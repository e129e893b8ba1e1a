use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comex_viz::board::ChartBoard;
use comex_viz::kpi::{self, KpiRow, TransportCard};
use comex_viz::models::{Aggregation, CountryQuery, Period, SeriesQuery};
use comex_viz::palette::PaletteName;
use comex_viz::theme::{FilePreferences, MemoryPreferences, THEME_KEY, Theme, ThemeStore};
use comex_viz::{Client, report, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "comexviz",
    version,
    about = "Fetch, theme & export export-trade dashboard charts"
)]
struct Cli {
    /// Base URL of the dashboard backend.
    #[arg(long, env = "COMEX_API_URL", default_value = comex_viz::api::DEFAULT_BASE_URL, global = true)]
    api_url: String,
    /// Use this theme for this run without changing the saved preference.
    /// Ignored by `theme`, which always works on the saved preference.
    #[arg(long, value_enum, global = true)]
    theme: Option<ThemeArg>,
    /// Colour every chart with this palette (blue, orange, gray) instead of
    /// the per-chart default.
    #[arg(long, value_name = "PALETTE", global = true)]
    palette: Option<PaletteName>,
    /// Directory holding saved preferences (default: the user config dir).
    #[arg(long, env = "COMEX_VIZ_PREFS", global = true)]
    prefs_dir: Option<PathBuf>,
    /// Locale for integer counts (pt, en, de, ...).
    #[arg(long, default_value = "pt", global = true)]
    locale: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly dashboard: KPIs, transport modes and charts.
    Dashboard(DashboardArgs),
    /// List destination countries for a period.
    Countries(PeriodArgs),
    /// List products exported to a country.
    Products(ProductsArgs),
    /// Analysis of a single destination country.
    Country(CountryArgs),
    /// Time series between two years.
    Series(SeriesArgs),
    /// Show or change the saved theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Print the saved theme (default).
    Get,
    /// Save a theme.
    Set {
        #[arg(value_enum, value_name = "THEME")]
        value: ThemeArg,
    },
    /// Switch between light and dark.
    Toggle,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AggregationArg {
    Monthly,
    Quarterly,
    Yearly,
}

impl From<AggregationArg> for Aggregation {
    fn from(a: AggregationArg) -> Self {
        match a {
            AggregationArg::Monthly => Aggregation::Monthly,
            AggregationArg::Quarterly => Aggregation::Quarterly,
            AggregationArg::Yearly => Aggregation::Yearly,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct PeriodArgs {
    /// Year (YYYY).
    #[arg(short, long, default_value_t = 2024)]
    year: i32,
    /// Month (1-12).
    #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

impl From<PeriodArgs> for Period {
    fn from(p: PeriodArgs) -> Self {
        Period {
            year: p.year,
            month: p.month,
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Save themed charts as JSON (one Plotly figure per chart name).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Save KPIs as CSV.
    #[arg(long)]
    kpis_csv: Option<PathBuf>,
    /// Write a standalone HTML page drawing the charts with Plotly.js.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    #[command(flatten)]
    period: PeriodArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ProductsArgs {
    #[command(flatten)]
    period: PeriodArgs,
    /// Destination country, as listed by `countries`.
    #[arg(short, long)]
    pais: String,
}

#[derive(Args, Debug)]
struct CountryArgs {
    #[command(flatten)]
    period: PeriodArgs,
    /// Destination country, as listed by `countries`.
    #[arg(short, long)]
    pais: String,
    /// Narrow to products whose description contains this text.
    #[arg(long)]
    produto: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// First year (inclusive).
    #[arg(long, default_value_t = 2020)]
    start: i32,
    /// Last year (inclusive).
    #[arg(long, default_value_t = 2024)]
    end: i32,
    #[arg(long, value_enum, default_value_t = AggregationArg::Monthly)]
    aggregation: AggregationArg,
    #[command(flatten)]
    output: OutputArgs,
}

/// Store for rendering: the `--theme` override if given, else the saved one.
fn open_store(cli: &Cli) -> ThemeStore {
    if let Some(theme) = cli.theme {
        let theme: Theme = theme.into();
        return ThemeStore::new(MemoryPreferences::with(THEME_KEY, theme.as_str()));
    }
    open_saved_store(cli)
}

fn open_saved_store(cli: &Cli) -> ThemeStore {
    match &cli.prefs_dir {
        Some(dir) => ThemeStore::new(FilePreferences::new(dir)),
        None => ThemeStore::open_default(),
    }
}

fn new_board(palette: Option<PaletteName>) -> ChartBoard {
    palette.map_or_else(ChartBoard::new, ChartBoard::with_palette)
}

fn print_rows(rows: &[KpiRow]) {
    for r in rows {
        println!("{:<16} {}", r.label, r.display);
    }
}

fn write_outputs(
    output: &OutputArgs,
    title: &str,
    board: &ChartBoard,
    rows: &[KpiRow],
    transport: Option<&[TransportCard]>,
) -> Result<()> {
    if let Some(path) = output.out.as_ref() {
        storage::save_charts_json(board, path)?;
        eprintln!("Saved {} charts to {}", board.len(), path.display());
    }
    if let Some(path) = output.kpis_csv.as_ref() {
        storage::save_kpis_csv(rows, path)?;
        eprintln!("Saved {} KPIs to {}", rows.len(), path.display());
    }
    if let Some(path) = output.html.as_ref() {
        report::save_html(path, title, board, rows, transport)?;
        eprintln!("Wrote page to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(cli.api_url.clone());

    match &cli.cmd {
        Command::Theme { action } => {
            if cli.theme.is_some() {
                log::warn!("--theme only applies to chart commands; using the saved preference");
            }
            cmd_theme(&mut open_saved_store(&cli), action.as_ref())
        }
        Command::Dashboard(args) => cmd_dashboard(
            &client,
            &open_store(&cli),
            new_board(cli.palette),
            &cli.locale,
            args,
        ),
        Command::Countries(period) => {
            for pais in client.countries((*period).into())? {
                println!("{pais}");
            }
            Ok(())
        }
        Command::Products(args) => {
            for produto in client.products(args.period.into(), &args.pais)? {
                println!("{produto}");
            }
            Ok(())
        }
        Command::Country(args) => cmd_country(
            &client,
            &open_store(&cli),
            new_board(cli.palette),
            &cli.locale,
            args,
        ),
        Command::Series(args) => {
            cmd_series(&client, &open_store(&cli), new_board(cli.palette), args)
        }
    }
}

fn cmd_dashboard(
    client: &Client,
    store: &ThemeStore,
    mut board: ChartBoard,
    locale: &str,
    args: &DashboardArgs,
) -> Result<()> {
    let period: Period = args.period.into();
    let data = client
        .dashboard(period)
        .with_context(|| format!("load dashboard for {}/{}", period.month, period.year))?;

    let rows = kpi::dashboard_rows(&data.kpis, locale);
    let cards = kpi::transport_cards(data.kpis.transport_data.as_deref());
    print_rows(&rows);
    for card in &cards {
        println!("{:<16} {} ({})", card.title, card.value, card.note);
    }

    board.load(
        data.charts.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        store,
    )?;
    let title = format!("Exports {:02}/{}", period.month, period.year);
    write_outputs(&args.output, &title, &board, &rows, Some(&cards[..]))
}

fn cmd_country(
    client: &Client,
    store: &ThemeStore,
    mut board: ChartBoard,
    locale: &str,
    args: &CountryArgs,
) -> Result<()> {
    let query = CountryQuery {
        period: args.period.into(),
        pais: args.pais.clone(),
        produto: args.produto.clone(),
    };
    let data = client
        .country_analysis(&query)
        .with_context(|| format!("load analysis for {}", args.pais))?;

    let rows = kpi::country_rows(&data.kpis, locale);
    print_rows(&rows);

    board.load(
        data.charts.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        store,
    )?;
    let title = format!("Exports to {} {:02}/{}", args.pais, args.period.month, args.period.year);
    write_outputs(&args.output, &title, &board, &rows, None)
}

fn cmd_series(
    client: &Client,
    store: &ThemeStore,
    mut board: ChartBoard,
    args: &SeriesArgs,
) -> Result<()> {
    let query = SeriesQuery {
        start_year: args.start,
        end_year: args.end,
        aggregation: args.aggregation.into(),
    };
    let data = client
        .time_series(&query)
        .with_context(|| format!("load series {}-{}", args.start, args.end))?;

    let charts = data.charts();
    board.load(charts.iter().map(|(k, v)| (k.as_str(), *v)), store)?;
    for (name, entry) in board.iter() {
        println!("{name}: {} trace(s)", entry.spec.data.len());
    }
    let title = format!("Exports {}-{}", args.start, args.end);
    write_outputs(&args.output, &title, &board, &[], None)
}

fn cmd_theme(store: &mut ThemeStore, action: Option<&ThemeAction>) -> Result<()> {
    match action {
        None | Some(ThemeAction::Get) => println!("{}", store.active_theme()),
        Some(ThemeAction::Set { value }) => {
            store.set_active_theme((*value).into())?;
            println!("{}", store.active_theme());
        }
        Some(ThemeAction::Toggle) => println!("{}", store.toggle()?),
    }
    Ok(())
}
