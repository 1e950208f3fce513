// File: crates/chartframe/tests/charts.rs
// Purpose: End-to-end chart behavior: rendering, deferred renders, input handling and errors.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chartframe::geometry::Point;
use chartframe::text::{LabelFont, TextMeasure};
use chartframe::{
    ChartError, ChartOptions, ChartReporters, ChartView, DoubleAxisChart, DoubleAxisOpts, Loader, ManualClock,
    ScoreChart, VolumeChart, Wave, WaveOpts,
};
use skia_safe as skia;

const PNG_MAGIC: [u8; 4] = [137, 80, 78, 71];

fn alpha_at(rgba: &[u8], width: usize, x: usize, y: usize) -> u8 {
    rgba[(y * width + x) * 4 + 3]
}

fn daily_series(days: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let start = 1_704_067_200_000.0; // 2024-01-01T00:00:00Z
    let x = (0..days).map(|i| start + i as f64 * 86_400_000.0).collect();
    let usd = (0..days).map(|i| 2000.0 + (i as f64 * 0.4).sin() * 300.0).collect();
    let eth = (0..days).map(|i| 40.0 + (i as f64 * 0.3).cos() * 12.0).collect();
    (x, usd, eth)
}

#[test]
fn double_axis_renders_png() {
    let mut chart = DoubleAxisChart::new(ChartOptions::sized(640, 360), DoubleAxisOpts { x_date: true });
    let (x, usd, eth) = daily_series(30);
    chart.update(x, usd, eth).expect("render");

    let layout = *chart.base().layout();
    let right = layout.y2_labels.expect("right axis column");
    assert_eq!(layout.plot.x.max, right.x.min);
    assert_eq!(right.x.max, 640.0);

    let out = std::path::PathBuf::from("target/test_out/double_axis.png");
    chart.base().write_png(&out).expect("write png");
    let bytes = chart.base().to_png().expect("png bytes");
    assert!(bytes.starts_with(&PNG_MAGIC), "should be PNG header");
}

#[test]
fn double_axis_requires_date_axis() {
    let mut chart = DoubleAxisChart::new(ChartOptions::sized(320, 200), DoubleAxisOpts::default());
    let (x, usd, eth) = daily_series(5);
    let err = chart.update(x, usd, eth).expect_err("numeric x is unsupported");
    assert!(matches!(err, ChartError::UnsupportedAxis(_)));
}

#[test]
fn mismatched_series_are_rejected() {
    let mut chart = DoubleAxisChart::new(ChartOptions::sized(320, 200), DoubleAxisOpts { x_date: true });
    let err = chart.update(vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0]).expect_err("lengths differ");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let mut score = ScoreChart::new(ChartOptions::sized(320, 200));
    let err = score
        .update(vec![vec![0.0, 1.0]], vec![vec![0.0]], vec![skia::Color::RED], vec![1.0])
        .expect_err("line lengths differ");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn score_chart_draws_lines_and_empty_message() {
    let mut chart = ScoreChart::new(ChartOptions::sized(480, 300));
    chart.update(Vec::new(), Vec::new(), Vec::new(), Vec::new()).expect("empty render");
    assert!(!chart.base().render_scheduled());

    let xs = vec![vec![-0.02, 0.0, 0.02], vec![-0.01, 0.01]];
    let ys = vec![vec![100.0, 450.0, 120.0], vec![300.0, 310.0]];
    chart
        .update(xs, ys, vec![skia::Color::RED, skia::Color::GREEN], vec![2.0, 1.0])
        .expect("render");
    assert!(chart.base().layout().y2_labels.is_none());
    assert!(chart.base().to_png().expect("png").starts_with(&PNG_MAGIC));
}

#[test]
fn label_fonts_have_width() {
    assert!(LabelFont::new(12.0).measure("1,234.5") > 0.0);
    assert!(LabelFont::new(12.0).measure("") == 0.0);
}

#[test]
fn score_chart_reserves_a_label_column() {
    let mut chart = ScoreChart::new(ChartOptions::sized(480, 300));
    chart
        .update(vec![vec![-0.02, 0.0, 0.02]], vec![vec![100.0, 4500.0, 120.0]], vec![skia::Color::RED], vec![2.0])
        .expect("render");
    let layout = chart.base().layout();
    assert!(layout.y_labels.x_range() > 0.0);
    assert!(layout.plot.x.min > 0.0);
    assert!(layout.x_labels.y_range() > 0.0);
}

#[test]
fn volume_bars_fill_their_slots() {
    let mut chart = VolumeChart::new(ChartOptions::sized(400, 100));
    chart.update(vec![1.0, 2.0, 3.0, 4.0], skia::Color::from_rgb(0x05, 0xa3, 0x5a)).expect("render");
    let surface = chart.base().surface().expect("surface");
    let rgba = surface.rgba8();
    // inside the tallest bar
    assert_eq!(alpha_at(rgba, 400, 350, 50), 255);
    // gap before the first bar
    assert_eq!(alpha_at(rgba, 400, 3, 50), 0);
    // above the shortest bar
    assert_eq!(alpha_at(rgba, 400, 50, 10), 0);
}

#[test]
fn hidden_render_is_deferred_until_visible() {
    let mut chart = VolumeChart::new(ChartOptions::sized(200, 100));
    chart.hide();
    chart.update(vec![1.0, 1.0], skia::Color::WHITE).expect("deferred");
    assert!(chart.base().render_scheduled());
    assert!(chart.base().surface().expect("surface").rgba8().iter().all(|&b| b == 0));

    chart.set_visibility(true).expect("redraw");
    assert!(!chart.base().render_scheduled());
    assert!(chart.base().surface().expect("surface").rgba8().iter().any(|&b| b != 0));
}

#[test]
fn zero_sized_surface_defers_until_resized() {
    let mut chart = VolumeChart::new(ChartOptions::sized(0, 0));
    chart.update(vec![3.0, 1.0], skia::Color::WHITE).expect("deferred");
    assert!(chart.base().render_scheduled());

    chart.resize(120, 80).expect("render after resize");
    let surface = chart.base().surface().expect("surface");
    assert_eq!((surface.width(), surface.height()), (120, 80));
    assert!(surface.rgba8().iter().any(|&b| b != 0));
}

#[test]
fn unacquirable_surface_leaves_chart_inert() {
    let mut chart = ScoreChart::new(ChartOptions::sized(-5, 10));
    assert!(chart.base().surface().is_none());
    chart.update(vec![vec![0.0, 1.0]], vec![vec![0.0, 1.0]], vec![skia::Color::RED], vec![1.0]).expect("no-op");
    assert!(matches!(chart.base().to_png(), Err(ChartError::SurfaceUnavailable(_))));
}

#[derive(Default)]
struct Reported {
    zooms: Vec<bool>,
    clicks: Vec<(f64, f64)>,
    resizes: usize,
}

fn reporters(log: &Arc<Mutex<Reported>>) -> ChartReporters {
    let (z, c, r) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
    ChartReporters {
        zoom: Box::new(move |bigger| z.lock().expect("log").zooms.push(bigger)),
        click: Box::new(move |x, y| c.lock().expect("log").clicks.push((x, y))),
        resize: Box::new(move || r.lock().expect("log").resizes += 1),
    }
}

#[test]
fn wheel_zooms_are_rate_limited() {
    let log = Arc::new(Mutex::new(Reported::default()));
    let clock = ManualClock::new();
    let mut chart = VolumeChart::new(ChartOptions::sized(100, 50));
    chart.base_mut().set_reporters(reporters(&log));
    chart.base_mut().set_clock(Arc::new(clock.clone()));

    chart.handle_wheel(-3.0);
    chart.handle_wheel(2.0);
    clock.advance(Duration::from_millis(99));
    chart.handle_wheel(2.0);
    clock.advance(Duration::from_millis(1));
    chart.handle_wheel(2.0);

    assert_eq!(log.lock().expect("log").zooms, vec![true, false]);
}

#[test]
fn pointer_and_click_events() {
    let log = Arc::new(Mutex::new(Reported::default()));
    let mut chart = VolumeChart::new(ChartOptions::sized(100, 50));
    chart.base_mut().set_reporters(reporters(&log));
    chart.update(vec![1.0], skia::Color::WHITE).expect("render");

    chart.handle_mouse_move(10.0, 20.0).expect("redraw");
    assert_eq!(chart.base().mouse_pos(), Some(Point::new(10.0, 20.0)));
    chart.handle_mouse_leave().expect("redraw");
    assert_eq!(chart.base().mouse_pos(), None);

    chart.handle_click(4.0, 5.0);
    chart.resize(120, 60).expect("resize");
    let log = log.lock().expect("log");
    assert_eq!(log.clicks, vec![(4.0, 5.0)]);
    assert_eq!(log.resizes, 1);
}

#[test]
fn wave_still_frame_paints_background() {
    let opts = WaveOpts { message: Some("loading".into()), background: Some(skia::Color::BLACK) };
    let wave = Wave::still(ChartOptions::sized(200, 120), opts, Arc::new(ManualClock::new()));
    wave.render().expect("frame");
    assert!(!wave.is_running());
    let png = wave.to_png().expect("png");
    assert!(png.starts_with(&PNG_MAGIC));
    wave.with_base(|base| {
        let rgba = base.surface().expect("surface").rgba8();
        assert_eq!(alpha_at(rgba, 200, 0, 0), 255);
    });
}

#[test]
fn wave_stroke_sweeps_through_hues() {
    let opts = WaveOpts { message: None, background: Some(skia::Color::BLACK) };
    let wave = Wave::still(ChartOptions::sized(200, 120), opts, Arc::new(ManualClock::new()));
    wave.render().expect("frame");
    wave.with_base(|base| {
        let rgba = base.surface().expect("surface").rgba8();
        let mut dominant = [false; 3];
        for px in rgba.chunks_exact(4) {
            let (lo, hi) = (px[..3].iter().min().copied(), px[..3].iter().max().copied());
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if hi - lo >= 20 {
                    let channel = px[..3].iter().position(|&c| c == hi).unwrap_or(0);
                    dominant[channel] = true;
                }
            }
        }
        assert!(dominant.iter().filter(|&&d| d).count() >= 2, "stroke is a single hue");
    });
}

#[test]
fn wave_animates_until_stopped() {
    let mut wave = Wave::new(ChartOptions::sized(160, 90), WaveOpts::default());
    std::thread::sleep(Duration::from_millis(100));
    assert!(wave.is_running());
    wave.stop().expect("join");
    assert!(!wave.is_running());
    wave.with_base(|base| {
        assert!(base.surface().expect("surface").rgba8().iter().any(|&b| b != 0));
    });
}

#[test]
fn loader_blob_is_centered() {
    let loader = Loader::still(ChartOptions::sized(200, 120), Arc::new(ManualClock::new()));
    loader.render().expect("frame");
    loader.with_base(|base| {
        let rgba = base.surface().expect("surface").rgba8();
        let i = (31 * 200 + 100) * 4;
        assert_eq!(&rgba[i..i + 4], &[0x77, 0x77, 0x77, 0xff]);
        // outside the blob shows the theme background
        assert_eq!(alpha_at(rgba, 200, 2, 2), 255);
        assert_ne!(&rgba[(2 * 200 + 2) * 4..(2 * 200 + 2) * 4 + 3], &[0x77, 0x77, 0x77]);
    });

    loader.hide().expect("hide");
    loader.render().expect("deferred");
    assert!(loader.with_base(|base| base.render_scheduled()));
    loader.show().expect("show");
    assert!(!loader.with_base(|base| base.render_scheduled()));
}

#[test]
fn loader_stops_on_request() {
    let mut loader = Loader::new(ChartOptions::sized(80, 80));
    assert!(loader.is_running());
    loader.stop().expect("join");
    assert!(!loader.is_running());
    // stopping twice is fine
    loader.stop().expect("already stopped");
}
