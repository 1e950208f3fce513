// File: crates/chartframe/src/sub_animator.rs
// Summary: Composes time-windowed sub-animations into one progress-driven draw pass.

/// A sub-animation active over `[start, end]` of the overall progress.
pub struct TrackedAnimation<C: ?Sized> {
    start: f64,
    end: f64,
    draw: Box<dyn FnMut(&C, f64)>,
}

impl<C: ?Sized> TrackedAnimation<C> {
    pub fn start(&self) -> f64 { self.start }
    pub fn end(&self) -> f64 { self.end }
}

/// Draws several sub-animations from a single overall progress value.
///
/// Frames are kept sorted by `end`, so once one frame has not started yet
/// (sub-progress 0) no later frame has either.
pub struct SubAnimator<C: ?Sized> {
    frames: Vec<TrackedAnimation<C>>,
    prep: Option<Box<dyn FnMut(&C)>>,
}

impl<C: ?Sized> Default for SubAnimator<C> {
    fn default() -> Self {
        Self { frames: Vec::new(), prep: None }
    }
}

impl<C: ?Sized> SubAnimator<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback run at the start of every [`Self::draw`].
    pub fn prep(&mut self, prep: impl FnMut(&C) + 'static) {
        self.prep = Some(Box::new(prep));
    }

    pub fn add_frame(&mut self, start: f64, end: f64, draw: impl FnMut(&C, f64) + 'static) {
        self.frames.push(TrackedAnimation { start, end, draw: Box::new(draw) });
        self.frames.sort_by(|a, b| a.end.total_cmp(&b.end));
    }

    pub fn frames(&self) -> &[TrackedAnimation<C>] {
        &self.frames
    }

    pub fn draw(&mut self, ctx: &C, progress: f64) {
        if let Some(prep) = self.prep.as_mut() {
            prep(ctx);
        }
        for frame in &mut self.frames {
            let sub = sub_progress(frame.start, frame.end, progress);
            if sub == 0.0 {
                break;
            }
            (frame.draw)(ctx, sub);
        }
    }
}

/// Overall progress renormalized to `[start, end]`: 0 at or below `start`,
/// 1 at or above `end`.
pub fn sub_progress(start: f64, end: f64, progress: f64) -> f64 {
    if progress <= start {
        0.0
    } else if progress >= end {
        1.0
    } else {
        (progress - start) / (end - start)
    }
}
