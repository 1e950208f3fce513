// File: crates/chartframe/src/animation.rs
// Summary: Cancellable fixed-rate progress driver with easing curves.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::clock::{SystemClock, TickSource};
use crate::error::{ChartError, ChartResult};

/// Frames per second of every animation loop.
pub const FPS: u32 = 30;
/// Sleep between frames (1000/30 ms).
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);
/// Span used for [`AnimationLength::Forever`]: ten years.
pub const FOREVER_SPAN: Duration = Duration::from_secs(86_400 * 365 * 10);

/// How long an animation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationLength {
    Finite(Duration),
    /// Ambient animations that run until stopped.
    Forever,
}

impl AnimationLength {
    pub fn span(self) -> Duration {
        match self {
            AnimationLength::Finite(d) => d,
            AnimationLength::Forever => FOREVER_SPAN,
        }
    }
}

impl From<Duration> for AnimationLength {
    fn from(d: Duration) -> Self { AnimationLength::Finite(d) }
}

/// Progress curves mapping `[0,1]` onto `[0,1]`.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInHard,
    EaseOutHard,
    EaseInOutQuad,
    /// Caller-supplied curve; endpoints are not checked.
    Custom(fn(f64) -> f64),
}

impl Easing {
    pub const BUILT_IN: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInHard,
        Easing::EaseOutHard,
        Easing::EaseInOutQuad,
    ];

    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInHard => t * t * t,
            Easing::EaseOutHard => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutQuad => {
                if t < 0.5 { 2.0 * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(2) / 2.0 }
            }
            Easing::Custom(f) => f(t),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInHard => "easeInHard",
            Easing::EaseOutHard => "easeOutHard",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::Custom(_) => "custom",
        }
    }
}

impl FromStr for Easing {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::BUILT_IN
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown easing '{s}'")))
    }
}

/// How a run ended. Completion callbacks cannot tell these apart; callers
/// that care inspect the outcome returned by [`Animation::wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Stopped,
}

/// Shared stop flag. Stopping is cooperative: the loop notices at the top of
/// its next frame.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type DoneFn = Box<dyn FnOnce() + Send>;

/// Configures an animation before it starts.
pub struct AnimationBuilder {
    length: AnimationLength,
    easing: Easing,
    clock: Arc<dyn TickSource>,
    on_done: Option<DoneFn>,
    stop: StopHandle,
}

impl AnimationBuilder {
    pub fn new(length: impl Into<AnimationLength>) -> Self {
        Self {
            length: length.into(),
            easing: Easing::Linear,
            clock: SystemClock::shared(),
            on_done: None,
            stop: StopHandle::default(),
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn TickSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Runs exactly once, after the final progress call or after a stop.
    pub fn on_done(mut self, done: impl FnOnce() + Send + 'static) -> Self {
        self.on_done = Some(Box::new(done));
        self
    }

    /// Handle to stop the animation, usable before it starts.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run the frame loop on the calling thread.
    pub fn run_blocking(self, mut progress: impl FnMut(f64)) -> AnimationOutcome {
        let Self { length, easing, clock, on_done, stop } = self;
        let outcome = drive(length, easing, clock.as_ref(), &stop, &mut progress);
        if let Some(done) = on_done {
            done();
        }
        outcome
    }

    /// Run the frame loop on a worker thread.
    pub fn spawn(self, progress: impl FnMut(f64) + Send + 'static) -> Animation {
        self.spawn_with(progress, |name, body| std::thread::Builder::new().name(name).spawn(body))
    }

    /// [`Self::spawn`] with the thread creation supplied by the caller.
    pub(crate) fn spawn_with<F>(mut self, progress: impl FnMut(f64) + Send + 'static, start_thread: F) -> Animation
    where
        F: FnOnce(String, Box<dyn FnOnce() -> AnimationOutcome + Send>) -> std::io::Result<JoinHandle<AnimationOutcome>>,
    {
        let stop = self.stop.clone();
        let forever = self.length == AnimationLength::Forever;
        // Shared so the completion callback still runs if the worker never starts.
        let done = Arc::new(Mutex::new(self.on_done.take()));
        let worker_done = Arc::clone(&done);
        let body = Box::new(move || {
            let outcome = self.run_blocking(progress);
            if let Some(done) = take_done(&worker_done) {
                done();
            }
            outcome
        });
        match start_thread("chartframe-animation".into(), body) {
            Ok(handle) => Animation { stop, forever, worker: Some(handle), outcome: None },
            Err(err) => {
                tracing::error!(%err, "failed to spawn animation worker");
                if let Some(done) = take_done(&done) {
                    done();
                }
                Animation { stop, forever, worker: None, outcome: Some(AnimationOutcome::Stopped) }
            }
        }
    }
}

fn take_done(done: &Mutex<Option<DoneFn>>) -> Option<DoneFn> {
    done.lock().unwrap_or_else(PoisonError::into_inner).take()
}

fn drive(
    length: AnimationLength,
    easing: Easing,
    clock: &dyn TickSource,
    stop: &StopHandle,
    progress: &mut impl FnMut(f64),
) -> AnimationOutcome {
    let span = length.span();
    let range = span.as_secs_f64();
    let start = clock.now();
    let end = start + span;
    let mut now = start;
    while now < end {
        if stop.is_stopped() {
            tracing::debug!(?length, "animation stopped");
            return AnimationOutcome::Stopped;
        }
        progress(easing.apply((now - start).as_secs_f64() / range));
        clock.sleep(FRAME_INTERVAL);
        now = clock.now();
    }
    progress(1.0);
    AnimationOutcome::Completed
}

/// A running animation. Dropping the handle of a [`AnimationLength::Forever`]
/// run requests a stop without waiting; finite runs are detached and play to
/// completion.
pub struct Animation {
    stop: StopHandle,
    forever: bool,
    worker: Option<JoinHandle<AnimationOutcome>>,
    outcome: Option<AnimationOutcome>,
}

impl Animation {
    /// Start a linear animation on the system clock.
    pub fn start(length: impl Into<AnimationLength>, progress: impl FnMut(f64) + Send + 'static) -> Self {
        AnimationBuilder::new(length).spawn(progress)
    }

    pub fn builder(length: impl Into<AnimationLength>) -> AnimationBuilder {
        AnimationBuilder::new(length)
    }

    /// Request a stop. Idempotent.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, |w| w.is_finished())
    }

    /// Block until the run completes or observes a stop.
    pub fn wait(&mut self) -> ChartResult<AnimationOutcome> {
        if let Some(worker) = self.worker.take() {
            let outcome = worker.join().map_err(|_| ChartError::AnimationPanicked)?;
            self.outcome = Some(outcome);
        }
        self.outcome.ok_or(ChartError::AnimationPanicked)
    }

    pub fn stop_and_wait(&mut self) -> ChartResult<AnimationOutcome> {
        self.stop();
        self.wait()
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        if self.forever {
            self.stop.stop();
        }
    }
}
