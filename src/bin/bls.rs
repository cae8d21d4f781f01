use anyhow::Result;
use blsdata::config::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use blsdata::{Axis, Client, CombinedTable, RequestConfig, Selection, SeriesRequest, Session};
use blsdata::{stats, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bls",
    version,
    about = "Fetch, reshape & query Bureau of Labor Statistics time series"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch series (and optionally select, save, and print catalogs or stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AxisArg {
    /// Series side by side, aligned on (year, period)
    Columns,
    /// Series stacked, one labelled row per observation
    Rows,
}

impl From<AxisArg> for Axis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Columns => Axis::Columns,
            AxisArg::Rows => Axis::Rows,
        }
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Series ids separated by comma or semicolon (e.g., LNS14000000,CUUR0000SA0)
    #[arg(short, long, default_value = "")]
    series: String,
    /// Registration key; selects the v2 endpoint.
    #[arg(short, long)]
    key: Option<String>,
    /// First year (YYYY).
    #[arg(long, default_value = DEFAULT_START_YEAR)]
    start: String,
    /// Last year (YYYY).
    #[arg(long, default_value = DEFAULT_END_YEAR)]
    end: String,
    /// JSON configuration string with seriesid, registrationkey, startyear, endyear.
    /// Ignored when it is not valid JSON.
    #[arg(long)]
    config: Option<String>,
    /// Keep only series at these positions (comma separated).
    #[arg(long, value_delimiter = ',')]
    index: Vec<usize>,
    /// Keep only series with these ids (comma separated).
    #[arg(long, value_delimiter = ',')]
    id: Vec<String>,
    /// Label series by this catalog field instead of the series id.
    #[arg(long)]
    label_by: Option<String>,
    /// How selected series are combined.
    #[arg(long, value_enum, default_value_t = AxisArg::Columns)]
    axis: AxisArg,
    /// Save the combined table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json) of --out. If omitted, inferred from the extension.
    #[arg(long, value_enum, requires = "out")]
    format: Option<OutFormat>,
    /// Print the catalogs of the selected series.
    #[arg(long, default_value_t = false)]
    catalog: bool,
    /// Print per-series statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

/// Render a value with at most three decimals (the precision BLS publishes), `NA` if absent.
fn fmt_value(v: Option<f64>) -> String {
    let Some(x) = v.filter(|x| x.is_finite()) else {
        return "NA".into();
    };
    let mut s = format!("{x:.3}");
    while s.contains('.') && (s.ends_with('0') || s.ends_with('.')) {
        s.pop();
    }
    s
}

/// Series ids from `LNS14000000,CUUR0000SA0` or `LNS14000000; CUUR0000SA0`.
fn series_ids(list: &str) -> Vec<String> {
    list.split([',', ';'])
        .filter_map(|id| {
            let id = id.trim();
            (!id.is_empty()).then(|| id.to_ascii_uppercase())
        })
        .collect()
}

fn print_table(table: &CombinedTable) {
    match table {
        CombinedTable::Wide(t) => {
            println!("Year\tPeriod\t{}", t.labels.join("\t"));
            for ((year, period), row) in t.index.iter().zip(&t.cells) {
                let cells: Vec<String> = row
                    .iter()
                    .map(|c| fmt_value(c.as_ref().map(|o| o.value)))
                    .collect();
                println!("{year}\t{period}\t{}", cells.join("\t"));
            }
        }
        CombinedTable::Stacked(t) => {
            println!("Series\tYear\tPeriod\tPeriod Name\tValue");
            for r in &t.rows {
                let o = &r.observation;
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    r.label,
                    o.year,
                    o.period,
                    o.period_name,
                    fmt_value(Some(o.value))
                );
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let config = args.config.as_deref().and_then(RequestConfig::parse);
    let request = SeriesRequest::resolve(
        config,
        series_ids(&args.series),
        args.key.clone(),
        &args.start,
        &args.end,
    )?;

    let mut session = Session::new(request);
    let resp = session.fetch(&Client::default())?;
    if !resp.is_success() {
        log::warn!("API reported status {}", resp.status);
    }
    session.transform()?;

    let mut selection = Selection::indices(args.index.iter().copied());
    for id in &args.id {
        selection = selection.with_id(id.as_str());
    }

    let table = session.select_tables(&selection, args.label_by.as_deref(), args.axis.into())?;

    match args.out.as_ref() {
        Some(path) => {
            let fmt = match args.format {
                Some(OutFormat::Csv) => "csv",
                Some(OutFormat::Json) => "json",
                None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
            }
            .to_ascii_lowercase();
            match fmt.as_str() {
                "csv" => storage::save_csv(&table, path)?,
                "json" => storage::save_json(&table, path)?,
                other => anyhow::bail!("unsupported format: {}", other),
            }
            eprintln!(
                "Saved {} rows ({} series) to {}",
                table.height(),
                table.labels().len(),
                path.display()
            );
        }
        None => print_table(&table),
    }

    if args.catalog {
        for entry in session.select_catalogs(&selection)? {
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
    }

    if args.stats {
        for s in stats::series_summary(session.results()) {
            if !selection.matches(&s.key) {
                continue;
            }
            println!(
                "{}  count={}  min={} max={} mean={} median={}",
                s.key,
                s.count,
                fmt_value(s.min),
                fmt_value(s.max),
                fmt_value(s.mean),
                fmt_value(s.median)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_trim_trailing_zeros() {
        assert_eq!(fmt_value(Some(3.5)), "3.5");
        assert_eq!(fmt_value(Some(257.971)), "257.971");
        assert_eq!(fmt_value(Some(100.0)), "100");
        assert_eq!(fmt_value(Some(f64::NAN)), "NA");
        assert_eq!(fmt_value(None), "NA");
    }

    #[test]
    fn series_ids_split_and_trim() {
        assert_eq!(
            series_ids(" lns14000000; CUUR0000SA0,,"),
            vec!["LNS14000000".to_string(), "CUUR0000SA0".to_string()]
        );
        assert!(series_ids("").is_empty());
    }
}
