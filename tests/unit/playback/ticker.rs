use super::*;

const SEC: Duration = Duration::from_secs(1);

#[test]
fn unarmed_ticker_never_fires() {
    let clock = ManualClock::new();
    let mut t = Ticker::new(SEC);
    clock.advance(SEC * 10);
    assert_eq!(t.poll(clock.now()), 0);
    assert!(!t.is_armed());
}

#[test]
fn fires_once_per_period() {
    let clock = ManualClock::new();
    let mut t = Ticker::new(SEC);
    t.arm(clock.now());
    assert_eq!(t.next_deadline(), Some(clock.now() + SEC));

    clock.advance(Duration::from_millis(999));
    assert_eq!(t.poll(clock.now()), 0);
    clock.advance(Duration::from_millis(1));
    assert_eq!(t.poll(clock.now()), 1);
    assert_eq!(t.poll(clock.now()), 0);

    clock.advance(SEC * 3);
    assert_eq!(t.poll(clock.now()), 3);
}

#[test]
fn cancel_drops_pending_ticks() {
    let clock = ManualClock::new();
    let mut t = Ticker::new(SEC);
    t.arm(clock.now());
    clock.advance(SEC * 2);
    t.cancel();
    assert_eq!(t.poll(clock.now()), 0);
    clock.advance(SEC * 5);
    assert_eq!(t.poll(clock.now()), 0);
    assert_eq!(t.next_deadline(), None);
}

#[test]
fn zero_period_is_inert() {
    let clock = ManualClock::new();
    let mut t = Ticker::new(Duration::ZERO);
    t.arm(clock.now());
    assert_eq!(t.poll(clock.now()), 0);
}

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::new();
    let b = a.clone();
    let start = b.now();
    a.advance(SEC);
    assert_eq!(b.now(), start + SEC);
    assert!(SystemClock.now() <= Instant::now());
}
