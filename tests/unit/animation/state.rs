use super::*;

fn fade_state() -> AnimationState {
    let mut s = AnimationState::new(Progress::unit(0.01).unwrap(), BoundPolicy::Wrap);
    s.start();
    s
}

#[test]
fn inactive_state_does_not_tick() {
    let mut s = AnimationState::new(Progress::unit(0.01).unwrap(), BoundPolicy::Wrap);
    assert_eq!(s.tick(), TickOutcome::Idle);
    assert_eq!(s.value(), 0.0);
    assert_eq!(s.ticks(), 0);
}

#[test]
fn stopping_mid_fade_freezes_progress() {
    let mut s = fade_state();
    for _ in 0..30 {
        s.tick();
    }
    s.stop();
    let value = s.value();
    assert!(!s.is_active());
    assert_eq!(s.tick(), TickOutcome::Idle);
    assert_eq!(s.value(), value);
    assert_eq!(s.ticks(), 30);
    assert_eq!(s.phase(), Phase::A);
}

#[test]
fn phase_flips_exactly_once_per_crossing() {
    let progress = Progress::unit(0.01).unwrap().starting_at(0.99).unwrap();
    let mut s = AnimationState::new(progress, BoundPolicy::Wrap);
    s.start();
    assert_eq!(s.tick(), TickOutcome::Flipped);
    assert_eq!(s.value(), 0.0);
    assert_eq!(s.phase(), Phase::B);
    assert_eq!(s.tick(), TickOutcome::Advanced);
    assert_eq!(s.phase(), Phase::B);
}

#[test]
fn hundred_ticks_cycle_back_with_one_flip() {
    let mut s = fade_state();
    let mut flips = 0;
    for _ in 0..100 {
        if s.tick() == TickOutcome::Flipped {
            flips += 1;
        }
        assert!((0.0..=1.0).contains(&s.value()));
    }
    assert_eq!(flips, 1);
    assert_eq!(s.value(), 0.0);
    assert_eq!(s.phase(), Phase::B);
    assert!(s.is_active());
}

#[test]
fn held_bound_settles_and_stops() {
    let mut s = AnimationState::new(Progress::new(1.0, 3.0, 0.05).unwrap(), BoundPolicy::Hold);
    s.start();
    let mut outcome = TickOutcome::Advanced;
    let mut n = 0;
    while s.is_active() {
        outcome = s.tick();
        n += 1;
    }
    assert_eq!(n, 40);
    assert_eq!(outcome, TickOutcome::Settled);
    assert!(s.is_settled());
    assert_eq!(s.value(), 3.0);
    assert_eq!(s.phase(), Phase::B);
    assert_eq!(s.tick(), TickOutcome::Idle);

    s.start_in(Direction::Reverse);
    assert!(!s.is_settled());
    while s.is_active() {
        s.tick();
    }
    assert_eq!(s.value(), 1.0);
    assert_eq!(s.phase(), Phase::A);
}

#[test]
fn rewind_restores_initial_mode() {
    let mut s = AnimationState::new(Progress::new(1.0, 3.0, 0.5).unwrap(), BoundPolicy::Hold);
    s.start();
    while s.is_active() {
        s.tick();
    }
    s.rewind();
    assert_eq!(s.value(), 1.0);
    assert_eq!(s.phase(), Phase::A);
    assert!(!s.is_settled());
    assert!(!s.is_active());
}

#[test]
fn blend_weights_sum_to_one() {
    for i in 0..=1000 {
        let t = f64::from(i) / 1000.0;
        let (a, b) = blend_weights(t);
        assert!((a + b - 1.0).abs() < 1e-12);
        let (a, b) = Phase::B.weights(t);
        assert!((a + b - 1.0).abs() < 1e-12);
    }
    assert_eq!(Phase::A.weights(0.25), (0.75, 0.25));
    assert_eq!(Phase::B.weights(0.25), (0.25, 0.75));
}
