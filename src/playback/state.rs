use smallvec::SmallVec;

/// Slider position and play/pause flag. Starts at `{0, false}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Slider input; signed so callers can pass through whatever the control produced.
    SetIndex(i64),
    Play,
    Pause,
    Toggle,
    /// One period of the playback timer elapsed.
    Tick,
}

/// Side effects the driver shell runs after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEffect {
    Render(usize),
    StartTimer,
    StopTimer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: PlaybackState,
    pub effects: SmallVec<[PlaybackEffect; 2]>,
}

impl Transition {
    fn unchanged(state: PlaybackState) -> Self {
        Self {
            state,
            effects: SmallVec::new(),
        }
    }

    fn with(state: PlaybackState, effect: PlaybackEffect) -> Self {
        let mut effects = SmallVec::new();
        effects.push(effect);
        Self { state, effects }
    }

    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Pure `(state, event) -> state'` step over `key_count` time keys.
///
/// With no keys there is no valid position and every event is a no-op. Out-of-range indices
/// are rejected rather than clamped. Ticks only count while playing and wrap past the last key.
pub fn transition(state: PlaybackState, event: PlaybackEvent, key_count: usize) -> Transition {
    if key_count == 0 {
        return Transition::unchanged(state);
    }

    match event {
        PlaybackEvent::SetIndex(i) => match usize::try_from(i) {
            Ok(idx) if idx < key_count => Transition::with(
                PlaybackState {
                    current_index: idx,
                    ..state
                },
                PlaybackEffect::Render(idx),
            ),
            _ => Transition::unchanged(state),
        },
        PlaybackEvent::Play if !state.is_playing => Transition::with(
            PlaybackState {
                is_playing: true,
                ..state
            },
            PlaybackEffect::StartTimer,
        ),
        PlaybackEvent::Pause if state.is_playing => Transition::with(
            PlaybackState {
                is_playing: false,
                ..state
            },
            PlaybackEffect::StopTimer,
        ),
        PlaybackEvent::Play | PlaybackEvent::Pause => Transition::unchanged(state),
        PlaybackEvent::Toggle => {
            let next = if state.is_playing {
                PlaybackEvent::Pause
            } else {
                PlaybackEvent::Play
            };
            transition(state, next, key_count)
        }
        PlaybackEvent::Tick if state.is_playing => {
            let idx = (state.current_index + 1) % key_count;
            Transition::with(
                PlaybackState {
                    current_index: idx,
                    ..state
                },
                PlaybackEffect::Render(idx),
            )
        }
        PlaybackEvent::Tick => Transition::unchanged(state),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
