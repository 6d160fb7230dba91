use coax_core::{DeviceStatus, Signal};

use crate::common::ScenarioBuilder;

#[test]
fn test_completed_attempt_hands_over_to_the_next() {
    // Cable 4: a 2-bit packet finishes its window after round 6, so round 7
    // completes it and immediately releases the queued 3-bit attempt.
    let mut h = ScenarioBuilder::new(4)
        .device('A', 1, &[(1, 2), (2, 3)])
        .build(5);

    h.run_rounds(7);
    let device = h.device('A');
    assert_eq!(device.completed, 1);
    let tx = device.active.as_ref().expect("second attempt active");
    assert_eq!(tx.len, 3);
    assert_eq!(
        tx.remaining, 2,
        "a newly released attempt transmits in its start round"
    );
}

#[test]
fn test_device_idles_until_its_release_round() {
    let mut h = ScenarioBuilder::new(4).device('A', 2, &[(5, 2)]).build(5);

    h.run_rounds(4);
    assert_eq!(h.sim.devices.len(), 1, "pending schedule keeps the device live");
    assert_eq!(h.device('A').status(), DeviceStatus::Idle);
    assert!(h.sim.medium.is_idle());

    h.run_rounds(1);
    assert_eq!(h.sim.medium.cell(2).left, Signal::Carrier('A'));
    assert!(matches!(
        h.device('A').status(),
        DeviceStatus::Sending { .. }
    ));
}

#[test]
fn test_schedule_entries_never_overtake_each_other() {
    // Insertion order rules, even when a later entry has an earlier
    // release round.
    let mut h = ScenarioBuilder::new(6)
        .device('A', 2, &[(3, 5), (1, 9)])
        .build(3);

    h.run_rounds(2);
    assert!(h.device('A').active.is_none());

    h.run_rounds(1);
    let tx = h.device('A').active.as_ref().expect("head entry released");
    assert_eq!(tx.len, 5, "the head entry starts first");
}

#[test]
fn test_drained_device_leaves_the_live_set() {
    let mut h = ScenarioBuilder::new(4).device('A', 0, &[(1, 2)]).build(9);

    let rounds = h.run_to_idle(100);
    assert!(h.sim.is_complete());
    assert_eq!(rounds, 1 + 2 + 4);
    assert!(h.sim.devices.is_empty());
    assert_eq!(h.sim.finished.len(), 1);
    assert_eq!(h.sim.completed_count(), h.sim.scheduled_count());
}
