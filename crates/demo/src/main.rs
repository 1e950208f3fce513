// File: crates/demo/src/main.rs
// Summary: Demo loads an optional price CSV and renders every chart type plus animation frames to PNGs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chartframe::theme::{HueGenerator, Theme};
use chartframe::{
    ChartOptions, ChartView, DoubleAxisChart, DoubleAxisOpts, Loader, ManualClock, ScoreChart, VolumeChart, Wave,
    WaveOpts,
};

const MS_PER_DAY: f64 = 86_400_000.0;

/// One row of price history.
#[derive(Clone, Copy, Debug)]
struct Row {
    t: f64,
    usd: f64,
    eth: f64,
    volume: f64,
}

fn main() -> Result<()> {
    let _ = chartframe::telemetry::init_default_tracing();

    let theme = match std::env::var("CHARTFRAME_THEME") {
        Ok(name) => chartframe::theme::find(&name),
        Err(_) => Theme::default(),
    };

    let rows = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            let rows = load_price_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            tracing::info!(rows = rows.len(), path = %path.display(), "loaded price history");
            rows
        }
        None => {
            tracing::info!("no CSV given; using a generated 90 day history");
            synthetic_rows(90)
        }
    };
    if rows.len() < 2 {
        anyhow::bail!("need at least two rows, got {}", rows.len());
    }

    let out = PathBuf::from("target/out");
    let opts = ChartOptions { theme, ..ChartOptions::sized(1024, 480) };

    // 1) Price in both currencies
    let mut prices = DoubleAxisChart::new(opts, DoubleAxisOpts { x_date: true });
    prices.update(
        rows.iter().map(|r| r.t).collect(),
        rows.iter().map(|r| r.usd).collect(),
        rows.iter().map(|r| r.eth).collect(),
    )?;
    write(prices.base(), &out, "prices")?;

    // 2) Volume bars
    let mut volume = VolumeChart::new(ChartOptions { theme, ..ChartOptions::sized(1024, 160) });
    volume.update(rows.iter().map(|r| r.volume).collect(), theme.accent)?;
    write(volume.base(), &out, "volume")?;

    // 3) Score curves for a few made-up pools
    let mut hues = HueGenerator::new();
    let mut score = ScoreChart::new(opts);
    let (mut xs, mut ys, mut colors, mut widths) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for pool in 0..4 {
        let (x, y) = score_curve(pool);
        xs.push(x);
        ys.push(y);
        colors.push(hues.next_color());
        widths.push(if pool == 0 { 3.0 } else { 1.5 });
    }
    score.update(xs, ys, colors, widths)?;
    write(score.base(), &out, "score")?;

    // 4) Ambient animations, a few still frames each
    let clock = ManualClock::new();
    let wave_opts = WaveOpts { message: Some("loading prices".into()), background: Some(theme.background) };
    let wave = Wave::still(ChartOptions { theme, ..ChartOptions::sized(300, 200) }, wave_opts, Arc::new(clock.clone()));
    let loader = Loader::still(ChartOptions { theme, ..ChartOptions::sized(200, 200) }, Arc::new(clock.clone()));
    for frame in 0..4 {
        wave.render()?;
        loader.render()?;
        wave.write_png(out.join(format!("chart_wave_{frame}.png")))?;
        loader.write_png(out.join(format!("chart_loader_{frame}.png")))?;
        clock.advance(Duration::from_millis(250));
    }
    println!("Wrote wave and loader frames to {}", out.display());

    Ok(())
}

fn write(base: &chartframe::ChartBase, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(format!("chart_{name}.png"));
    base.write_png(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Load a price CSV. Recognized headers: a time column (epoch seconds or
/// milliseconds), a USD price, and optionally ETH price and volume.
fn load_price_csv(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date"]).context("no time column")?;
    let i_usd = idx(&["usd", "price", "close", "c"]).context("no usd price column")?;
    let i_eth = idx(&["eth", "eth_price"]);
    let i_vol = idx(&["volume", "vol", "v"]);

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let (Some(t), Some(usd)) = (rec.get(i_time).and_then(parse_time_ms), parse(Some(i_usd))) else {
            tracing::warn!(line = ?rec.position().map(|p| p.line()), "skipping unparsable row");
            continue;
        };
        out.push(Row {
            t,
            usd,
            eth: parse(i_eth).unwrap_or(usd / 2000.0),
            volume: parse(i_vol).unwrap_or(0.0),
        });
    }
    out.sort_by(|a, b| a.t.total_cmp(&b.t));
    Ok(out)
}

/// Epoch milliseconds from epoch seconds or milliseconds.
fn parse_time_ms(s: &str) -> Option<f64> {
    let n = s.trim().parse::<i64>().ok()?;
    if n > 10_i64.pow(11) {
        Some(n as f64)
    } else {
        Some(n as f64 * 1000.0)
    }
}

fn synthetic_rows(days: usize) -> Vec<Row> {
    let start = 1_704_067_200_000.0; // 2024-01-01
    (0..days)
        .map(|i| {
            let d = i as f64;
            let usd = 2200.0 + (d * 0.11).sin() * 350.0 + d * 4.0;
            Row {
                t: start + d * MS_PER_DAY,
                usd,
                eth: 45.0 + (d * 0.07).cos() * 8.0,
                volume: 1.0e6 * (1.5 + (d * 0.9).sin()),
            }
        })
        .collect()
}

fn score_curve(pool: usize) -> (Vec<f64>, Vec<f64>) {
    let peak = 400.0 + pool as f64 * 60.0;
    let width = 0.008 + pool as f64 * 0.002;
    let xs: Vec<f64> = (0..=40).map(|i| -0.02 + i as f64 * 0.001).collect();
    let ys = xs.iter().map(|x| peak * (-(x / width).powi(2)).exp()).collect();
    (xs, ys)
}
