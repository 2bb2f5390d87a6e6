use super::*;

fn rec(ridership: f64) -> StationRecord {
    StationRecord {
        station_id: "1".to_string(),
        day: "Mon".to_string(),
        hour: "8".to_string(),
        station_name: "s".to_string(),
        ridership,
        latitude: 40.7,
        longitude: -74.0,
        borough: "Queens".to_string(),
    }
}

#[test]
fn compute_tracks_min_max_and_midpoint() {
    let s = RidershipStats::compute(&[rec(10.0), rec(90.0), rec(40.0)]);
    assert_eq!(s.min(), 10.0);
    assert_eq!(s.max(), 90.0);
    assert_eq!(s.midpoint(), 50.0);
    assert!(s.min() <= s.midpoint() && s.midpoint() <= s.max());
    assert!(!s.is_degenerate());
}

#[test]
fn empty_and_all_zero_datasets_are_degenerate() {
    assert!(RidershipStats::compute(&[]).is_degenerate());
    let zeros = RidershipStats::compute(&[rec(0.0), rec(0.0)]);
    assert!(zeros.is_degenerate());
    assert!(matches!(
        zeros.normalized(1.0),
        Err(HeatmapError::DegenerateStatistics(_))
    ));
}

#[test]
fn new_enforces_ordering() {
    assert!(RidershipStats::new(0.0, 100.0, 50.0).is_ok());
    assert!(RidershipStats::new(0.0, 100.0, 150.0).is_err());
    assert!(RidershipStats::new(10.0, 5.0, 7.0).is_err());
    assert!(RidershipStats::new(0.0, f64::NAN, 0.0).is_err());
}

#[test]
fn midpoint_override_stays_in_bounds() {
    let s = RidershipStats::compute(&[rec(0.0), rec(100.0)]);
    assert_eq!(s.with_midpoint(20.0).unwrap().midpoint(), 20.0);
    assert!(s.with_midpoint(200.0).is_err());
}

#[test]
fn normalized_is_clamped() {
    let s = RidershipStats::new(0.0, 100.0, 50.0).unwrap();
    assert_eq!(s.normalized(50.0).unwrap(), 0.5);
    assert_eq!(s.normalized(250.0).unwrap(), 1.0);
    assert_eq!(s.normalized(-4.0).unwrap(), 0.0);
}
