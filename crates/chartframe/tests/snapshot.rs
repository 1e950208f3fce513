// File: crates/chartframe/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic, text-free frames to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use std::sync::Arc;

use chartframe::{ChartOptions, ChartView, Loader, ManualClock, TickSource, VolumeChart};
use skia_safe as skia;

fn check_snapshot(name: &str, bytes: &[u8]) {
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join(name);

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn golden_volume_bars() {
    let mut chart = VolumeChart::new(ChartOptions::sized(320, 120));
    let vols = vec![4.0, 9.0, 2.5, 7.0, 12.0, 6.0, 3.0, 8.0];
    chart.update(vols, skia::Color::from_rgb(0x05, 0xa3, 0x5a)).expect("render");
    let bytes = chart.base().to_png().expect("png bytes");
    check_snapshot("volume_bars.png", &bytes);
}

#[test]
fn golden_loader_frame() {
    let clock = ManualClock::new();
    clock.advance(std::time::Duration::from_millis(750));
    assert_eq!(clock.now().as_millis(), 750);
    let loader = Loader::still(ChartOptions::sized(160, 160), Arc::new(clock));
    loader.render().expect("frame");
    let bytes = loader.to_png().expect("png bytes");
    check_snapshot("loader_750ms.png", &bytes);
}
