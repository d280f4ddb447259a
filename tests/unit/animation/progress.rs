use super::*;

#[test]
fn constructor_rejects_bad_intervals() {
    assert!(Progress::new(1.0, 1.0, 0.1).is_err());
    assert!(Progress::new(0.0, 1.0, 0.0).is_err());
    assert!(Progress::new(0.0, 1.0, -0.1).is_err());
    assert!(Progress::new(0.0, 1.0, 2.0).is_err());
    assert!(Progress::new(0.0, f64::INFINITY, 0.1).is_err());
    assert!(Progress::unit(0.5).unwrap().starting_at(1.5).is_err());
}

#[test]
fn value_tracks_initial_plus_n_steps_until_the_bound() {
    let start = 0.2;
    let step = 0.01;
    let mut p = Progress::unit(step).unwrap().starting_at(start).unwrap();
    for n in 1..=79u32 {
        assert_eq!(p.advance(Direction::Forward, BoundPolicy::Wrap), Crossing::None);
        let expected = (start + f64::from(n) * step).min(1.0);
        assert!((p.value() - expected).abs() < 1e-9, "tick {n}");
    }
    assert_eq!(p.advance(Direction::Forward, BoundPolicy::Wrap), Crossing::Wrapped);
    assert_eq!(p.value(), 0.0);
}

#[test]
fn one_step_from_099_wraps_to_zero() {
    let mut p = Progress::unit(0.01).unwrap().starting_at(0.99).unwrap();
    assert_eq!(p.advance(Direction::Forward, BoundPolicy::Wrap), Crossing::Wrapped);
    assert_eq!(p.value(), 0.0);
}

#[test]
fn hundred_hundredths_cross_on_the_hundredth_step() {
    let mut p = Progress::unit(0.01).unwrap();
    for _ in 0..99 {
        assert_eq!(p.advance(Direction::Forward, BoundPolicy::Wrap), Crossing::None);
    }
    assert_eq!(p.advance(Direction::Forward, BoundPolicy::Wrap), Crossing::Wrapped);
    assert_eq!(p.ticks_per_span(), 100);
}

#[test]
fn hold_clamps_on_both_bounds() {
    let mut p = Progress::new(1.0, 3.0, 0.05).unwrap();
    assert_eq!(p.ticks_per_span(), 40);
    let mut crossings = 0;
    for _ in 0..40 {
        if p.advance(Direction::Forward, BoundPolicy::Hold) == Crossing::Held {
            crossings += 1;
        }
        assert!(p.value() >= p.lower() && p.value() <= p.upper());
    }
    assert_eq!(crossings, 1);
    assert_eq!(p.value(), 3.0);

    for _ in 0..39 {
        assert_eq!(p.advance(Direction::Reverse, BoundPolicy::Hold), Crossing::None);
    }
    assert_eq!(p.advance(Direction::Reverse, BoundPolicy::Hold), Crossing::Held);
    assert_eq!(p.value(), 1.0);
}

#[test]
fn normalized_maps_interval_to_unit() {
    let p = Progress::new(1.0, 3.0, 0.05).unwrap().starting_at(2.0).unwrap();
    assert!((p.normalized() - 0.5).abs() < 1e-12);
    assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
}
