use std::time::Duration;

use crate::data::record::Dataset;
use crate::data::stats::RidershipStats;
use crate::data::time_key::{TimeKey, derive_keys};
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::playback::driver::TimeIndexDriver;
use crate::playback::state::{PlaybackEvent, PlaybackState};
use crate::playback::ticker::{Clock, SystemClock};
use crate::render::frame::FrameRenderer;
use crate::render::surface::SurfaceProvider;

/// What happened to one render request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was painted and presented.
    Rendered { index: usize, glyphs: usize },
    /// No surface was available; the next trigger paints again.
    Skipped { index: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewCounters {
    pub rendered: u64,
    pub skipped: u64,
}

/// Interactive heatmap session: a dataset, its time axis, and the surfaces it paints into.
///
/// Every control re-renders through the same path. Dropping the view tears it down.
pub struct HeatmapView<P: SurfaceProvider, C: Clock = SystemClock> {
    dataset: Dataset,
    stats: RidershipStats,
    renderer: FrameRenderer,
    provider: P,
    driver: TimeIndexDriver<C>,
    counters: ViewCounters,
    last: Option<FrameOutcome>,
}

impl<P: SurfaceProvider, C: Clock> HeatmapView<P, C> {
    /// Build the view and paint the first key, if there is one.
    pub fn new(
        dataset: Dataset,
        stats: RidershipStats,
        renderer: FrameRenderer,
        provider: P,
        tick_period: Duration,
        clock: C,
    ) -> HeatmapResult<Self> {
        Self::new_at(dataset, stats, renderer, provider, tick_period, clock, 0)
    }

    /// Build the view positioned on key `start` and paint that key only.
    ///
    /// Fails with [`HeatmapError::IndexOutOfRange`] when keys exist and `start` is not one of
    /// them. With no keys nothing is painted and `start` is ignored.
    pub fn new_at(
        dataset: Dataset,
        stats: RidershipStats,
        renderer: FrameRenderer,
        provider: P,
        tick_period: Duration,
        clock: C,
        start: i64,
    ) -> HeatmapResult<Self> {
        let keys = derive_keys(&dataset);
        tracing::debug!(
            keys = keys.len(),
            records = dataset.len(),
            start,
            "heatmap view created"
        );
        let mut view = Self {
            dataset,
            stats,
            renderer,
            provider,
            driver: TimeIndexDriver::new(keys, tick_period, clock),
            counters: ViewCounters::default(),
            last: None,
        };
        if view.driver.key_count() > 0 {
            view.set_index(start)?;
        }
        Ok(view)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn stats(&self) -> &RidershipStats {
        &self.stats
    }

    pub fn keys(&self) -> &[TimeKey] {
        self.driver.keys()
    }

    pub fn state(&self) -> PlaybackState {
        self.driver.state()
    }

    pub fn is_playing(&self) -> bool {
        self.driver.state().is_playing
    }

    pub fn current_key(&self) -> Option<&TimeKey> {
        self.driver.current_key()
    }

    /// The `"{day} {hour}"` caption for the current key; empty when there are no keys.
    pub fn label(&self) -> String {
        self.current_key().map(TimeKey::label).unwrap_or_default()
    }

    /// Largest valid slider position; `None` when there are no keys.
    pub fn slider_max(&self) -> Option<usize> {
        self.driver.key_count().checked_sub(1)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn counters(&self) -> ViewCounters {
        self.counters
    }

    pub fn last_outcome(&self) -> Option<FrameOutcome> {
        self.last
    }

    pub fn next_tick(&self) -> Option<std::time::Instant> {
        self.driver.next_tick()
    }

    pub fn clock(&self) -> &C {
        self.driver.clock()
    }

    /// Jump to key `index` and paint it. Out-of-range positions leave the view untouched.
    pub fn set_index(&mut self, index: i64) -> HeatmapResult<()> {
        if self.driver.is_torn_down() {
            return Ok(());
        }
        let len = self.driver.key_count();
        let in_range = usize::try_from(index).is_ok_and(|i| i < len);
        if !in_range {
            tracing::warn!(index, len, "rejected slider index");
            return Err(HeatmapError::IndexOutOfRange { index, len });
        }
        self.apply(PlaybackEvent::SetIndex(index))
    }

    pub fn play(&mut self) -> HeatmapResult<()> {
        self.apply(PlaybackEvent::Play)
    }

    pub fn pause(&mut self) -> HeatmapResult<()> {
        self.apply(PlaybackEvent::Pause)
    }

    pub fn toggle(&mut self) -> HeatmapResult<()> {
        self.apply(PlaybackEvent::Toggle)
    }

    /// Run every due playback tick; returns how many frames were painted.
    pub fn poll(&mut self) -> HeatmapResult<usize> {
        let due = self.driver.poll();
        let mut painted = 0;
        for idx in due {
            if let FrameOutcome::Rendered { .. } = self.render_index(idx)? {
                painted += 1;
            }
        }
        Ok(painted)
    }

    /// Cancel playback for good. Later controls and polls do nothing.
    pub fn teardown(&mut self) {
        if !self.driver.is_torn_down() {
            tracing::debug!(
                rendered = self.counters.rendered,
                skipped = self.counters.skipped,
                "heatmap view torn down"
            );
        }
        self.driver.teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        self.driver.is_torn_down()
    }

    fn apply(&mut self, event: PlaybackEvent) -> HeatmapResult<()> {
        if let Some(idx) = self.driver.dispatch(event) {
            self.render_index(idx)?;
        }
        Ok(())
    }

    fn render_index(&mut self, index: usize) -> HeatmapResult<FrameOutcome> {
        let Some(key) = self.driver.key(index) else {
            let len = self.driver.key_count();
            return Err(HeatmapError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len,
            });
        };

        let targets = match self.provider.acquire() {
            Ok(t) => t,
            Err(HeatmapError::SurfaceUnavailable(reason)) => {
                tracing::warn!(key = %key, %reason, "surface unavailable, frame skipped");
                self.counters.skipped += 1;
                let outcome = FrameOutcome::Skipped { index };
                self.last = Some(outcome);
                return Ok(outcome);
            }
            Err(e) => return Err(e),
        };
        let glyphs = self
            .renderer
            .render_frame(targets, key, &self.dataset, &self.stats)?;
        self.provider.present(key, index)?;

        tracing::debug!(key = %key, index, glyphs, "frame rendered");
        self.counters.rendered += 1;
        let outcome = FrameOutcome::Rendered { index, glyphs };
        self.last = Some(outcome);
        Ok(outcome)
    }
}

impl<P: SurfaceProvider, C: Clock> Drop for HeatmapView<P, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/view.rs"]
mod tests;
