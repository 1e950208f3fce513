// File: crates/chartframe/src/charts/mod.rs
// Summary: Concrete charts plus the shared driver for self-animating ones.

/// Surface accessors shared by [`Wave`] and [`Loader`].
macro_rules! ambient_surface_api {
    ($ty:ty) => {
        impl $ty {
            /// Adopt a new surface size and redraw.
            pub fn resize(&self, width: i32, height: i32) -> $crate::error::ChartResult<()> {
                self.inner.resize(width, height)
            }

            /// Draw the current frame now, outside the animation.
            pub fn render(&self) -> $crate::error::ChartResult<()> {
                self.inner.render()
            }

            pub fn hide(&self) -> $crate::error::ChartResult<()> {
                self.inner.set_visibility(false)
            }

            pub fn show(&self) -> $crate::error::ChartResult<()> {
                self.inner.set_visibility(true)
            }

            pub fn is_running(&self) -> bool {
                self.inner.is_running()
            }

            /// Stop animating. The last frame stays on the surface.
            pub fn stop(&mut self) -> $crate::error::ChartResult<()> {
                self.inner.stop()
            }

            /// PNG of the last drawn frame.
            pub fn to_png(&self) -> $crate::error::ChartResult<Vec<u8>> {
                self.inner.with_base(|base| base.to_png())
            }

            pub fn write_png(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
                self.inner.with_base(|base| base.write_png(path))
            }

            /// Inspect the shared chart state, e.g. visibility or size.
            pub fn with_base<R>(&self, f: impl FnOnce(&$crate::chart::ChartBase) -> R) -> R {
                self.inner.with_base(f)
            }
        }
    };
}

mod double_axis;
mod loader;
mod score;
mod volume;
mod wave;

pub use double_axis::{DoubleAxisChart, DoubleAxisOpts};
pub use loader::{blob_points, Loader};
pub use score::{ScoreChart, ScoreLine};
pub use volume::VolumeChart;
pub use wave::{wave_value, Wave, WaveOpts};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::animation::{Animation, AnimationLength};
use crate::chart::ChartBase;
use crate::clock::TickSource;
use crate::error::ChartResult;

/// Scene state an ambient chart shares with its animation worker.
pub(crate) trait AmbientScene: Send + 'static {
    fn base(&self) -> &ChartBase;
    fn base_mut(&mut self) -> &mut ChartBase;
    /// Recompute screen regions after the surface size changed.
    fn resized(&mut self);
    /// Draw the frame for the current tick.
    fn draw_frame(&mut self) -> ChartResult<()>;
}

/// A poisoned scene only means a frame panicked midway; the next frame
/// repaints everything.
fn lock<S>(scene: &Mutex<S>) -> MutexGuard<'_, S> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns an ambient scene and, when animated, the worker redrawing it every
/// frame until stopped.
pub(crate) struct Ambient<S: AmbientScene> {
    scene: Arc<Mutex<S>>,
    ani: Option<Animation>,
}

impl<S: AmbientScene> Ambient<S> {
    pub(crate) fn new(mut scene: S, clock: Arc<dyn TickSource>, animate: bool) -> Self {
        scene.resized();
        let scene = Arc::new(Mutex::new(scene));
        let ani = animate.then(|| {
            let shared = Arc::clone(&scene);
            Animation::builder(AnimationLength::Forever).clock(clock).spawn(move |_| {
                if let Err(err) = lock(&shared).draw_frame() {
                    tracing::warn!(%err, "ambient frame skipped");
                }
            })
        });
        Self { scene, ani }
    }

    pub(crate) fn resize(&self, width: i32, height: i32) -> ChartResult<()> {
        let mut scene = lock(&self.scene);
        scene.base_mut().resize_surface(width, height);
        scene.resized();
        scene.draw_frame()
    }

    pub(crate) fn render(&self) -> ChartResult<()> {
        lock(&self.scene).draw_frame()
    }

    pub(crate) fn set_visibility(&self, visible: bool) -> ChartResult<()> {
        let mut scene = lock(&self.scene);
        scene.base_mut().set_visible(visible);
        if visible && scene.base_mut().take_scheduled() {
            return scene.draw_frame();
        }
        Ok(())
    }

    pub(crate) fn is_running(&self) -> bool {
        self.ani.as_ref().map_or(false, |a| !a.is_finished())
    }

    /// Stop the animation and wait for its last frame to finish.
    pub(crate) fn stop(&mut self) -> ChartResult<()> {
        match self.ani.take() {
            Some(mut ani) => ani.stop_and_wait().map(|_| ()),
            None => Ok(()),
        }
    }

    pub(crate) fn with_base<R>(&self, f: impl FnOnce(&ChartBase) -> R) -> R {
        f(lock(&self.scene).base())
    }
}
