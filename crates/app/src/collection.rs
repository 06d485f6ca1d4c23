//! Light collection and its animation playback loop.

use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use xmaslights_core::{
    normalize::normalize, Animation, Error, Frame, FrameAllocator, Position, Result, Unit,
};

use crate::{
    signals::Checkpoint, FramePacer, NoRender, PlaybackConfig, PlaybackHandle, PlaybackState,
    UnitsRender,
};

/// Vertical offset added to every populated position.
pub const VERTICAL_OFFSET: f64 = 0.3;
/// Time given to the renderer to settle after all units have been reset.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Statistics of a finished animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSummary {
    /// Total number of applied frames, including repeated passes.
    pub frames_applied: usize,
    /// Number of started passes over the animation frames.
    pub passes: usize,
    /// Whether the run has been interrupted by a stop request.
    pub stopped: bool,
}

/// Ordered group of units sharing a single playback schedule.
#[derive(Debug)]
pub struct Collection<R = NoRender> {
    units: Vec<Unit>,
    allocator: FrameAllocator,
    render: R,
    handle: PlaybackHandle,
}

impl Default for Collection<NoRender> {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection<NoRender> {
    /// Creates an empty headless collection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_render(NoRender)
    }
}

impl<R: UnitsRender> Collection<R> {
    /// Creates an empty collection that shows its units with the given renderer.
    pub fn with_render(render: R) -> Self {
        Self {
            units: Vec::new(),
            allocator: FrameAllocator::default(),
            render,
            handle: PlaybackHandle::default(),
        }
    }

    /// Creates an empty collection with the boost settings of the configuration.
    pub fn from_config(config: &PlaybackConfig, render: R) -> Self {
        Self::with_render(render).with_allocator(config.allocator())
    }

    /// Replaces the frame allocator.
    #[must_use]
    pub fn with_allocator(mut self, allocator: FrameAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn into_render(self) -> R {
        self.render
    }

    /// Returns a handle to control the playback of this collection from other tasks.
    pub fn handle(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> PlaybackState {
        self.handle.state()
    }

    pub fn request_pause(&self) {
        self.handle.request_pause();
    }

    pub fn request_resume(&self) {
        self.handle.request_resume();
    }

    pub fn request_stop(&self) {
        self.handle.request_stop();
    }

    /// Adds a single unit at the given position as is.
    pub fn add_unit(&mut self, position: Position) {
        let mut unit = Unit::new(position);
        unit.update();
        self.units.push(unit);
        self.render.render(&self.units);
    }

    /// Adds a unit for each raw coordinate triple and re-centers the whole collection.
    ///
    /// The raw triples have their vertical axis last, so the two last elements are swapped
    /// and the vertical one is lifted by [`VERTICAL_OFFSET`].
    pub fn populate<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        let before = self.units.len();
        self.units.extend(
            positions
                .into_iter()
                .map(|(x, z, y)| Unit::new(Position::new(x, y + VERTICAL_OFFSET, z))),
        );
        log::debug!("Added {} units", self.units.len() - before);

        let positions: Vec<_> = self.units.iter().map(Unit::position).collect();
        for (unit, position) in self.units.iter_mut().zip(normalize(&positions)) {
            unit.set_position(position);
            unit.update();
        }
        self.render.render(&self.units);
    }

    /// Removes all units.
    pub fn clear(&mut self) {
        self.units.clear();
        self.render.render(&self.units);
    }

    /// Decodes a flat channel frame and applies it to the units.
    ///
    /// The frame should contain exactly three channels per unit, otherwise nothing is applied.
    pub fn apply_frame(&mut self, channels: &[u8]) -> Result<()> {
        let frame = Frame::decode(channels, self.units.len())?;
        self.apply(&frame);
        Ok(())
    }

    fn apply(&mut self, frame: &Frame) {
        let prev_colors: Vec<_> = self.units.iter().map(Unit::color).collect();
        let prev_boosted: Vec<_> = self.units.iter().map(Unit::is_boosted).collect();

        let allocation = self.allocator.allocate(&prev_colors, frame, &prev_boosted);
        for ((unit, color), boosted) in self
            .units
            .iter_mut()
            .zip(allocation.colors)
            .zip(allocation.boosted)
        {
            unit.apply(color, boosted);
        }
        self.render.render(&self.units);
    }

    /// Turns every unit off and gives the renderer some time to settle.
    pub async fn reset(&mut self) {
        self.turn_off_units();
        tokio::time::sleep(SETTLE_DELAY).await;
    }

    fn turn_off_units(&mut self) {
        for unit in &mut self.units {
            unit.reset();
        }
        self.render.render(&self.units);
    }

    /// Plays the animation until it is exhausted or stopped.
    ///
    /// When `looping` is set, the animation starts over after its last frame for as long as
    /// looping stays enabled through the [`PlaybackHandle`]. Pause and stop requests are
    /// observed after each frame. Whatever the outcome, all units are turned off and the
    /// collection is idle again once this returns.
    pub async fn animate(
        &mut self,
        animation: Animation,
        looping: bool,
    ) -> Result<PlaybackSummary> {
        let pacer = self.start(&animation, looping)?;
        self.run(animation, pacer).await
    }

    /// Validates the animation and moves an idle collection into the playing state.
    pub(crate) fn start(&self, animation: &Animation, looping: bool) -> Result<FramePacer> {
        let pacer = FramePacer::new(animation.fps)?;
        if self.state() != PlaybackState::Idle {
            return Err(Error::AlreadyPlaying);
        }

        self.handle.clear_requests();
        self.handle.set_looping(looping);
        self.handle.set_state(PlaybackState::Playing);
        Ok(pacer)
    }

    /// Runs a playback which has been started by [`Self::start`].
    pub(crate) async fn run(
        &mut self,
        animation: Animation,
        pacer: FramePacer,
    ) -> Result<PlaybackSummary> {
        log::debug!(
            "Animate {} frames ({} FPS) over {} units",
            animation.len(),
            animation.fps,
            self.units.len()
        );

        // Even if this future is dropped halfway, the collection must not stay lit or playing.
        let mut guard = TeardownGuard::new(self);

        let mut summary = PlaybackSummary::default();
        let outcome = guard.play_frames(&animation, pacer, &mut summary).await;
        if let Err(err) = &outcome {
            log::warn!("Aborting animation: {err}");
        }

        guard.reset().await;
        guard.finish();

        log::info!(
            "Animation finished after {} frames in {} passes",
            summary.frames_applied,
            summary.passes
        );
        outcome.map(|()| summary)
    }

    async fn play_frames(
        &mut self,
        animation: &Animation,
        pacer: FramePacer,
        summary: &mut PlaybackSummary,
    ) -> Result<()> {
        if animation.is_empty() {
            return Ok(());
        }

        loop {
            summary.passes += 1;
            for channels in &animation.frames {
                self.apply_frame(channels)?;
                summary.frames_applied += 1;
                log::trace!("Applied frame {}", summary.frames_applied);

                pacer.wait().await;
                if self.handle.checkpoint().await == Checkpoint::Stop {
                    log::debug!("Stop requested after frame {}", summary.frames_applied);
                    summary.stopped = true;
                    return Ok(());
                }
            }

            if !self.handle.is_looping() {
                return Ok(());
            }
        }
    }
}

/// Turns the units off and returns the collection to the idle state if a run is dropped
/// before its regular teardown.
struct TeardownGuard<'a, R: UnitsRender> {
    collection: &'a mut Collection<R>,
    armed: bool,
}

impl<'a, R: UnitsRender> TeardownGuard<'a, R> {
    fn new(collection: &'a mut Collection<R>) -> Self {
        Self {
            collection,
            armed: true,
        }
    }

    /// Completes the regular teardown, the units have already been reset.
    fn finish(mut self) {
        self.armed = false;
        self.collection.handle.finish();
    }
}

impl<R: UnitsRender> Deref for TeardownGuard<'_, R> {
    type Target = Collection<R>;

    fn deref(&self) -> &Self::Target {
        &*self.collection
    }
}

impl<R: UnitsRender> DerefMut for TeardownGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.collection
    }
}

impl<R: UnitsRender> Drop for TeardownGuard<'_, R> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Animation dropped before its teardown, turning units off");
            self.collection.turn_off_units();
            self.collection.handle.finish();
        }
    }
}
