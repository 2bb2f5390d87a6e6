use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;

use crate::data::time_key::TimeKey;
use crate::playback::state::{PlaybackEffect, PlaybackEvent, PlaybackState, transition};
use crate::playback::ticker::{Clock, Ticker};

/// Owns the time-key sequence, the playback position and the playback timer.
///
/// Timer effects run here; render effects are handed back to the caller as key indices.
pub struct TimeIndexDriver<C: Clock> {
    keys: Arc<[TimeKey]>,
    state: PlaybackState,
    ticker: Ticker,
    clock: C,
    torn_down: bool,
}

impl<C: Clock> TimeIndexDriver<C> {
    pub fn new(keys: Arc<[TimeKey]>, period: Duration, clock: C) -> Self {
        Self {
            keys,
            state: PlaybackState::default(),
            ticker: Ticker::new(period),
            clock,
            torn_down: false,
        }
    }

    pub fn keys(&self) -> &[TimeKey] {
        &self.keys
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_key(&self) -> Option<&TimeKey> {
        self.keys.get(self.state.current_index)
    }

    pub fn key(&self, index: usize) -> Option<&TimeKey> {
        self.keys.get(index)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn next_tick(&self) -> Option<std::time::Instant> {
        self.ticker.next_deadline()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Apply one event; returns the index to render, if any.
    pub fn dispatch(&mut self, event: PlaybackEvent) -> Option<usize> {
        if self.torn_down {
            return None;
        }
        let t = transition(self.state, event, self.keys.len());
        self.state = t.state;

        let mut render = None;
        for effect in t.effects {
            match effect {
                PlaybackEffect::StartTimer => self.ticker.arm(self.clock.now()),
                PlaybackEffect::StopTimer => self.ticker.cancel(),
                PlaybackEffect::Render(idx) => render = Some(idx),
            }
        }
        render
    }

    /// Run every tick that has come due, each one advancing from the index current at that
    /// moment. Returns the indices to render, in order.
    pub fn poll(&mut self) -> SmallVec<[usize; 1]> {
        let mut out = SmallVec::new();
        if self.torn_down {
            return out;
        }
        let due = self.ticker.poll(self.clock.now());
        for _ in 0..due {
            if let Some(idx) = self.dispatch(PlaybackEvent::Tick) {
                out.push(idx);
            }
        }
        out
    }

    /// Stop playback for good: cancels the timer and ignores every later event.
    pub fn teardown(&mut self) {
        self.ticker.cancel();
        self.state.is_playing = false;
        self.torn_down = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
