#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use probedemo_core::clock::{Clock, ManualClock, ProcessStart};
use probedemo_core::readiness::{
    evaluate, evaluate_elapsed, ReadinessEvaluator, Status, READY_MESSAGE, STARTING_MESSAGE,
    STARTUP_GRACE,
};

#[test]
fn down_for_whole_grace_period() {
    for ms in [0u64, 1, 15_000, 29_999] {
        let report = evaluate_elapsed(Duration::from_millis(ms), STARTUP_GRACE);
        assert_eq!(report.status, Status::Down, "elapsed={ms}");
        assert_eq!(report.details.message, STARTING_MESSAGE);
        assert_eq!(report.details.startup, "starting");
        assert_eq!(report.details.uptime, format!("{ms}ms"));
    }
}

#[test]
fn up_from_grace_boundary_onwards() {
    for ms in [30_000u64, 30_001, 3_600_000] {
        let report = evaluate_elapsed(Duration::from_millis(ms), STARTUP_GRACE);
        assert_eq!(report.status, Status::Up, "elapsed={ms}");
        assert_eq!(report.details.message, READY_MESSAGE);
        assert_eq!(report.details.startup, "ready");
    }
}

#[test]
fn never_reverts_once_up() {
    let clock = ManualClock::new();
    let eval = ReadinessEvaluator::new(ProcessStart::capture(&clock), STARTUP_GRACE);

    assert!(!eval.evaluate(clock.now()).status.is_up());
    clock.advance(Duration::from_secs(30));
    assert!(eval.evaluate(clock.now()).status.is_up());
    for _ in 0..10 {
        clock.advance(Duration::from_secs(3_600));
        assert!(eval.evaluate(clock.now()).status.is_up());
    }
}

#[test]
fn evaluate_uses_default_grace() {
    let clock = ManualClock::new();
    let start = ProcessStart::capture(&clock);
    clock.advance(Duration::from_millis(29_999));
    assert_eq!(evaluate(clock.now(), start).status, Status::Down);
    clock.advance(Duration::from_millis(1));
    assert_eq!(evaluate(clock.now(), start).status, Status::Up);
}

#[test]
fn report_serializes_like_actuator_health() {
    let report = evaluate_elapsed(Duration::from_millis(1200), STARTUP_GRACE);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "DOWN");
    assert_eq!(json["details"]["startup"], "starting");
    assert_eq!(json["details"]["uptime"], "1200ms");
    assert_eq!(json["details"]["message"], STARTING_MESSAGE);
}
