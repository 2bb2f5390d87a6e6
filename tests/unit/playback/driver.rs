use super::*;
use crate::playback::ticker::ManualClock;

const SEC: Duration = Duration::from_secs(1);

fn keys(n: usize) -> Arc<[TimeKey]> {
    (0..n)
        .map(|i| TimeKey::new("Mon", format!("{i:02}")))
        .collect()
}

fn driver(n: usize) -> (TimeIndexDriver<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (TimeIndexDriver::new(keys(n), SEC, clock.clone()), clock)
}

#[test]
fn starts_idle_on_first_key() {
    let (d, _) = driver(3);
    assert_eq!(d.state(), PlaybackState::default());
    assert_eq!(d.current_key(), Some(&TimeKey::new("Mon", "00")));
    assert_eq!(d.next_tick(), None);
}

#[test]
fn playing_advances_once_per_second_and_loops() {
    let (mut d, clock) = driver(3);
    assert_eq!(d.dispatch(PlaybackEvent::Play), None);
    assert!(d.next_tick().is_some());

    clock.advance(SEC);
    assert_eq!(d.poll().as_slice(), &[1]);
    clock.advance(SEC);
    assert_eq!(d.poll().as_slice(), &[2]);
    clock.advance(SEC);
    assert_eq!(d.poll().as_slice(), &[0]);
    assert_eq!(d.state().current_index, 0);
}

#[test]
fn late_poll_runs_every_due_tick() {
    let (mut d, clock) = driver(4);
    d.dispatch(PlaybackEvent::Play);
    clock.advance(SEC * 3);
    assert_eq!(d.poll().as_slice(), &[1, 2, 3]);
}

#[test]
fn next_tick_resumes_from_manual_index() {
    let (mut d, clock) = driver(5);
    d.dispatch(PlaybackEvent::Play);
    clock.advance(SEC);
    assert_eq!(d.poll().as_slice(), &[1]);

    assert_eq!(d.dispatch(PlaybackEvent::SetIndex(3)), Some(3));
    clock.advance(SEC);
    assert_eq!(d.poll().as_slice(), &[4]);
}

#[test]
fn pause_stops_ticks() {
    let (mut d, clock) = driver(3);
    d.dispatch(PlaybackEvent::Play);
    clock.advance(SEC);
    d.poll();
    d.dispatch(PlaybackEvent::Pause);
    clock.advance(SEC * 5);
    assert!(d.poll().is_empty());
    assert_eq!(d.state().current_index, 1);
    assert_eq!(d.next_tick(), None);
}

#[test]
fn teardown_is_final() {
    let (mut d, clock) = driver(3);
    d.dispatch(PlaybackEvent::Play);
    d.teardown();
    clock.advance(SEC * 5);
    assert!(d.poll().is_empty());
    assert_eq!(d.dispatch(PlaybackEvent::Play), None);
    assert_eq!(d.dispatch(PlaybackEvent::SetIndex(1)), None);
    assert_eq!(d.state().current_index, 0);
    assert!(!d.state().is_playing);
    assert!(d.is_torn_down());
}

#[test]
fn empty_key_set_never_moves() {
    let (mut d, clock) = driver(0);
    assert_eq!(d.current_key(), None);
    d.dispatch(PlaybackEvent::Play);
    assert!(!d.state().is_playing);
    clock.advance(SEC * 3);
    assert!(d.poll().is_empty());
}
