use std::collections::HashSet;

use coax_core::{Medium, Signal, Transmission, TransmissionState};
use rand::prelude::*;

fn jammed_medium(length: usize, pos: usize) -> Medium {
    let mut medium = Medium::new(length);
    // A second stamp on an occupied cell turns it into jam.
    medium.inject(pos, 'X');
    medium.inject(pos, 'Y');
    medium
}

#[test]
fn test_jam_aborts_and_resets_the_attempt() {
    let mut medium = jammed_medium(10, 2);
    let mut rng = StdRng::seed_from_u64(1);
    let mut tx = Transmission::new('A', 2, 5, 10);
    tx.remaining = 3; // mid-transmission

    let finished = tx.transmit(&mut medium, [1, 2], &mut rng);

    assert!(!finished);
    assert_eq!(tx.state(), TransmissionState::Backoff);
    assert_eq!(tx.remaining, 5, "the whole packet goes again");
    assert_eq!(tx.wait, 10, "detection window rearmed");
    assert!(tx.sleep == 10 || tx.sleep == 20);
    assert_eq!(tx.collisions, 1);
}

#[test]
fn test_backoff_counts_down_without_touching_the_cable() {
    let mut medium = jammed_medium(10, 2);
    let mut rng = StdRng::seed_from_u64(2);
    let mut tx = Transmission::new('A', 2, 5, 10);
    tx.transmit(&mut medium, [1, 2], &mut rng);
    let sleep = tx.sleep;
    assert!(sleep > 0);

    // Jam has long cleared; the station still sits out its whole draw.
    let mut medium = Medium::new(10);
    for _ in 0..sleep {
        assert!(!tx.transmit(&mut medium, [1, 2], &mut rng));
        assert!(medium.is_idle(), "no bits while backing off");
    }

    assert!(!tx.transmit(&mut medium, [1, 2], &mut rng));
    assert_eq!(medium.cell(2).left, Signal::Carrier('A'));
    assert_eq!(tx.remaining, 4, "first retransmitted bit is out");
}

#[test]
fn test_backoff_draw_is_a_whole_number_of_cable_lengths() {
    let mut draws = HashSet::new();
    for seed in 0..64 {
        let mut medium = jammed_medium(10, 2);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tx = Transmission::new('A', 2, 5, 10);
        tx.transmit(&mut medium, [1, 2], &mut rng);
        assert!(tx.sleep == 10 || tx.sleep == 20);
        draws.insert(tx.sleep);
    }
    assert_eq!(draws.len(), 2, "both multipliers must be reachable");
}

#[test]
fn test_expired_detection_window_reports_done() {
    let mut medium = Medium::new(3);
    let mut rng = StdRng::seed_from_u64(3);
    let mut tx = Transmission::new('A', 0, 1, 3);

    assert!(!tx.transmit(&mut medium, [1, 2], &mut rng));
    assert_eq!(tx.remaining, 0);

    for _ in 0..3 {
        medium = medium.propagate();
        assert!(!tx.transmit(&mut medium, [1, 2], &mut rng));
    }

    assert_eq!(tx.state(), TransmissionState::Done);
    assert!(tx.transmit(&mut medium, [1, 2], &mut rng));
    assert!(
        tx.transmit(&mut medium, [1, 2], &mut rng),
        "done is terminal"
    );
}
