use glam::DVec3;
use rota::clock::Ticker;
use rota::interpolate::{InterpolationSession, SliderMapping, slerp};
use rota::Orientation;
use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Duration;

const EPS: f64 = 1e-9;

fn pairs() -> Vec<(Orientation, Orientation)> {
    let q = |axis: DVec3, angle: f64| Orientation::from_axis_angle(axis, angle).unwrap();
    vec![
        (Orientation::IDENTITY, q(DVec3::Z, FRAC_PI_2)),
        (q(DVec3::X, 0.3), q(DVec3::new(1.0, 2.0, -1.0), 2.0)),
        (q(DVec3::Y, -2.8), q(DVec3::Y, 2.8)),
        (q(DVec3::new(0.2, -0.4, 0.9), 1.0), q(DVec3::new(-1.0, 0.1, 0.3), 3.0)),
    ]
}

#[test]
fn test_halfway_between_identity_and_quarter_turn() {
    let q1 = Orientation::new(1.0, 0.0, 0.0, 0.0).unwrap();
    let q2 = Orientation::new(0.7071, 0.0, 0.0, 0.7071).unwrap();

    let mid = slerp(&q1, &q2, 0.5);
    println!("slerp(0.5) = {:?}", mid.components());

    let expected = Orientation::new(0.9239, 0.0, 0.0, 0.3827).unwrap();
    assert!(mid.approx_eq(&expected, 1e-4), "Expected 45° about Z");
}

#[test]
fn test_endpoints_are_reproduced() {
    for (q1, q2) in pairs() {
        assert!(slerp(&q1, &q2, 0.0).approx_eq(&q1, EPS));
        assert!(slerp(&q1, &q2, 1.0).approx_eq(&q2, EPS));
    }
}

#[test]
fn test_identical_endpoints_are_fixed() {
    let q = Orientation::from_axis_angle(DVec3::new(1.0, 1.0, 1.0), 1.3).unwrap();
    for t in [0.0, 0.1, 0.5, 0.77, 1.0] {
        assert!(slerp(&q, &q, t).approx_eq(&q, EPS));
        // -q is the same rotation; the path must not leave it.
        assert!(slerp(&q, &q.antipode(), t).approx_eq(&q, EPS));
    }
}

#[test]
fn test_takes_the_shortest_arc() {
    for (q1, q2) in pairs() {
        // Present the end in the far hemisphere to provoke the long way round.
        let far = if q1.dot(&q2) >= 0.0 { q2.antipode() } else { q2 };
        let expected = q1.dot(&q2).abs().clamp(-1.0, 1.0).acos();

        // Sum of the quaternion-space arc along a sampled path.
        let steps = 200;
        let mut length = 0.0;
        let mut previous = q1;
        for i in 1..=steps {
            let current = slerp(&q1, &far, i as f64 / steps as f64);
            length += previous.dot(&current).clamp(-1.0, 1.0).acos();
            previous = current;
        }

        println!("arc = {:.6}, expected = {:.6}", length, expected);
        assert!((length - expected).abs() < 1e-6, "Interpolation took the longer arc");
        assert!(expected <= FRAC_PI_2 + EPS);
    }
}

#[test]
fn test_constant_angular_velocity() {
    let q1 = Orientation::IDENTITY;
    let q2 = Orientation::from_axis_angle(DVec3::X, 0.9 * PI).unwrap();

    let total = q1.angle_to(&q2);
    for t in [0.1, 0.25, 0.6, 0.9] {
        let q = slerp(&q1, &q2, t);
        assert!((q1.angle_to(&q) - t * total).abs() < 1e-9);
        let [w, x, y, z] = q.components();
        assert!(((w * w + x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_progress_outside_unit_interval_is_clamped() {
    let (q1, q2) = pairs()[1];
    assert!(slerp(&q1, &q2, -0.5).approx_eq(&q1, EPS));
    assert!(slerp(&q1, &q2, 1.5).approx_eq(&q2, EPS));
}

#[test]
fn test_session_advance_wraps() {
    let mut session = InterpolationSession::new(
        Orientation::IDENTITY,
        Orientation::from_axis_angle(DVec3::Z, FRAC_PI_2).unwrap(),
        Duration::from_millis(1000),
    );

    // 1. Seven ticks of 100 ms reach t = 0.7.
    for _ in 0..7 {
        session.advance(Duration::from_millis(100));
    }
    assert!((session.progress() - 0.7).abs() < 1e-9);

    // 2. Five more wrap around to 0.2.
    for _ in 0..5 {
        session.advance(Duration::from_millis(100));
    }
    println!("t after wrap = {}", session.progress());
    assert!((session.progress() - 0.2).abs() < 1e-9);
    assert!(session.progress() < 1.0);
}

#[test]
fn test_session_manual_progress_is_clamped() {
    let mut session = InterpolationSession::new(
        Orientation::IDENTITY,
        Orientation::IDENTITY,
        Duration::from_millis(1000),
    );
    session.set_progress(1.7);
    assert_eq!(session.progress(), 1.0);
    session.set_progress(-3.0);
    assert_eq!(session.progress(), 0.0);
    session.set_progress(0.25);
    session.set_progress(f64::NAN);
    assert_eq!(session.progress(), 0.25);
}

#[test]
fn test_endpoint_replacement_keeps_progress() {
    let mut session = InterpolationSession::new(
        Orientation::IDENTITY,
        Orientation::from_axis_angle(DVec3::Z, FRAC_PI_2).unwrap(),
        Duration::from_millis(1000),
    );
    session.set_progress(0.5);

    let new_end = Orientation::from_axis_angle(DVec3::X, FRAC_PI_2).unwrap();
    session.set_end(new_end);
    assert_eq!(session.progress(), 0.5);

    let expected = Orientation::from_axis_angle(DVec3::X, FRAC_PI_2 / 2.0).unwrap();
    assert!(session.evaluate().approx_eq(&expected, EPS), "New end must take effect immediately");

    session.set_start(new_end);
    assert!(session.evaluate().approx_eq(&new_end, EPS));
    assert_eq!(session.progress(), 0.5);
}

#[test]
fn test_slider_mapping() {
    let slider = SliderMapping::default();
    assert_eq!(slider.progress(0), 0.0);
    assert_eq!(slider.progress(500), 0.5);
    assert_eq!(slider.progress(1000), 1.0);
    assert_eq!(slider.progress(1500), 1.0);
    assert_eq!(slider.progress(-20), 0.0);
    assert_eq!(SliderMapping { max: 0 }.progress(10), 0.0);
}

#[test]
fn test_ticker_carries_remainder() {
    let mut ticker = Ticker::new(Duration::from_millis(100));

    // 1. Stopped: time is swallowed.
    assert_eq!(ticker.advance(Duration::from_millis(250)), 0);

    // 2. Running: remainders accumulate into whole ticks.
    ticker.start();
    assert_eq!(ticker.advance(Duration::from_millis(30)), 0);
    assert_eq!(ticker.advance(Duration::from_millis(30)), 0);
    assert_eq!(ticker.advance(Duration::from_millis(30)), 0);
    assert_eq!(ticker.advance(Duration::from_millis(10)), 1);
    assert_eq!(ticker.advance(Duration::from_millis(350)), 3);

    // 3. Stopping drops the partial interval.
    ticker.stop();
    ticker.start();
    assert_eq!(ticker.advance(Duration::from_millis(50)), 0);
    assert_eq!(ticker.advance(Duration::from_millis(50)), 1);
}
