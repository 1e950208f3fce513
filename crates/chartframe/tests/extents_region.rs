// File: crates/chartframe/tests/extents_region.rs
// Purpose: Extents bookkeeping, translator math and scoped canvas state in Region::plot.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chartframe::{ChartSurface, Extents, Region};
use skia_safe as skia;

fn assert_close(got: f64, want: f64, eps: f64) {
    assert!((got - want).abs() <= eps, "{got} != {want} (eps {eps})");
}

#[test]
fn extents_ranges_and_midpoints() {
    let mut e = Extents::new(2.0, 10.0, -4.0, 4.0);
    assert_eq!(e.x_range(), 8.0);
    assert_eq!(e.mid_x(), 6.0);
    assert_eq!(e.y_range(), 8.0);
    assert_eq!(e.mid_y(), 0.0);
    e.set_extents(0.0, 1.0, 0.0, 0.0);
    assert_eq!(e.y_range(), 0.0);
}

#[test]
fn contains_is_strict() {
    let e = Extents::new(0.0, 10.0, 0.0, 10.0);
    assert!(e.contains(5.0, 5.0));
    assert!(e.contains(0.001, 9.999));
    for (x, y) in [(0.0, 5.0), (10.0, 5.0), (5.0, 0.0), (5.0, 10.0), (-1.0, 5.0)] {
        assert!(!e.contains(x, y), "({x}, {y}) is on or outside the edge");
    }
}

#[test]
fn bounding_box_of_series() {
    let xs = [3.0, 1.0, 2.0];
    let ys = [-1.0, 5.0, 0.0];
    let e = Extents::bounding(&xs, &ys).expect("non-empty");
    assert_eq!(e, Extents::new(1.0, 3.0, -1.0, 5.0));
    assert!(Extents::bounding(&[] as &[f64], &ys).is_none());
}

#[test]
fn translator_maps_corners_with_y_flipped() {
    let mut surface = ChartSurface::new(400, 300).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(50.0, 350.0, 20.0, 220.0));
            let t = region.translator(&Extents::new(0.0, 3.0, -1.0, 1.0));
            assert_close(t.x(0.0), 50.0, 1e-9);
            assert_close(t.x(3.0), 350.0, 1e-9);
            assert_close(t.y(-1.0), 220.0, 1e-9);
            assert_close(t.y(1.0), 20.0, 1e-9);
            assert_close(t.w(1.0), 100.0, 1e-9);
            assert_close(t.h(1.0), -100.0, 1e-9);
        })
        .expect("draw");
}

#[test]
fn data_matrix_agrees_with_scalar_mapping() {
    let mut surface = ChartSurface::new(400, 300).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(10.0, 390.0, 5.0, 295.0));
            let t = region.translator(&Extents::new(-50.0, 150.0, 1000.0, 3000.0));
            let m = t.data_matrix();
            for (x, y) in [(-50.0, 1000.0), (0.0, 2000.0), (150.0, 3000.0), (42.5, 1234.0)] {
                let p = m.map_point((x as f32, y as f32));
                assert_close(p.x as f64, t.x(x), 1e-2);
                assert_close(p.y as f64, t.y(y), 1e-2);
            }
        })
        .expect("draw");
}

#[test]
fn data_path_lands_in_screen_space() {
    let mut surface = ChartSurface::new(200, 100).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(0.0, 200.0, 0.0, 100.0));
            region.plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |_, t| {
                let path = t.data_path(|p| {
                    p.move_to((0.0, 0.0));
                    p.line_to((1.0, 1.0));
                });
                let bounds = path.bounds();
                assert_close(bounds.left as f64, 0.0, 1e-4);
                assert_close(bounds.right as f64, 200.0, 1e-4);
                assert_close(bounds.top as f64, 0.0, 1e-4);
                assert_close(bounds.bottom as f64, 100.0, 1e-4);
            });
        })
        .expect("draw");
}

type CanvasState = (usize, skia::Matrix, Option<skia::IRect>);

fn state(canvas: &skia::Canvas) -> CanvasState {
    (canvas.save_count(), canvas.local_to_device_as_3x3(), canvas.device_clip_bounds())
}

#[test]
fn plot_restores_canvas_state() {
    let mut surface = ChartSurface::new(300, 200).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(20.0, 120.0, 30.0, 90.0));
            let data = Extents::new(0.0, 10.0, 0.0, 10.0);
            let before = state(canvas);

            // nothing drawn
            region.plot(&data, |_, _| {});
            assert_eq!(state(canvas), before);

            // inside, the clip is the region and data_coords stacks a transform
            region.plot(&data, |c, t| {
                assert_eq!(c.device_clip_bounds(), Some(skia::IRect::from_ltrb(20, 30, 120, 90)));
                t.data_coords(|| {
                    assert_ne!(c.local_to_device_as_3x3(), before.1);
                    c.draw_rect(skia::Rect::from_xywh(1.0, 1.0, 2.0, 2.0), &skia::Paint::default());
                });
                assert_eq!(c.local_to_device_as_3x3(), before.1);
            });
            assert_eq!(state(canvas), before);

            // error path
            let res: Result<(), &str> = region.plot(&data, |c, t| {
                c.translate((5.0, 5.0));
                t.data_coords(|| Err("bad data"))
            });
            assert!(res.is_err());
            assert_eq!(state(canvas), before);

            // unmasked plot leaves the clip alone while drawing
            region.plot_unmasked(&data, |c, _| {
                assert_eq!(c.device_clip_bounds(), before.2);
            });
            assert_eq!(state(canvas), before);
        })
        .expect("draw");
}

#[test]
fn plot_restores_canvas_state_after_panic() {
    let mut surface = ChartSurface::new(300, 200).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(20.0, 120.0, 30.0, 90.0));
            let before = state(canvas);
            let result = catch_unwind(AssertUnwindSafe(|| {
                region.plot(&Extents::new(0.0, 1.0, 0.0, 1.0), |c, t| {
                    c.scale((2.0, 2.0));
                    t.data_coords(|| panic!("draw failed"))
                })
            }));
            assert!(result.is_err());
            assert_eq!(state(canvas), before);
        })
        .expect("draw");
}

#[test]
fn unplotted_translator_leaves_transform_alone() {
    let mut surface = ChartSurface::new(100, 100).expect("surface");
    surface
        .with_canvas(|canvas| {
            let region = Region::new(canvas, Extents::new(0.0, 100.0, 0.0, 100.0));
            let before = canvas.local_to_device_as_3x3();
            let during = region.translator(&Extents::new(0.0, 2.0, 0.0, 2.0)).data_coords(|| canvas.local_to_device_as_3x3());
            assert_eq!(during, before);
        })
        .expect("draw");
}

#[test]
fn translator_round_trips() {
    let mut surface = ChartSurface::new(8, 8).expect("surface");
    let spans = [(-1.0e4, 1.0e-2), (-3.5, 7.0), (0.0, 1.0), (250.0, 1.0e4), (9_999.0, 0.25)];
    let fractions = [-0.5, 0.0, 0.3, 0.999, 1.5];
    for &(x0, w) in &spans {
        for &(y0, h) in spans.iter().rev() {
            let data = Extents::new(x0, x0 + w, y0, y0 + h);
            for &f in &fractions {
                let (vx, vy) = (x0 + f * w, y0 + (1.0 - f) * h);
                let (rx, ry, px, py) = surface
                    .with_canvas(|canvas| {
                        let region = Region::new(canvas, Extents::new(12.0, 612.0, 7.0, 407.0));
                        let t = region.translator(&data);
                        (t.unx(t.x(vx)), t.uny(t.y(vy)), t.x(t.unx(300.0)), t.y(t.uny(100.0)))
                    })
                    .expect("draw");
                let tol = 1e-9 * (w + h + vx.abs() + vy.abs());
                assert_close(rx, vx, tol);
                assert_close(ry, vy, tol);
                assert_close(px, 300.0, 1e-6);
                assert_close(py, 100.0, 1e-6);
            }
        }
    }
}
