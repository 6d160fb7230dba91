use coax_core::{Medium, Signal};

#[test]
fn test_single_signal_spreads_one_cell_per_round() {
    let mut medium = Medium::new(11);
    medium.inject(5, 'A');
    assert_eq!(medium.cell(5).left, Signal::Carrier('A'));
    assert_eq!(medium.cell(5).right, Signal::Carrier('A'));

    medium = medium.propagate();
    assert_eq!(medium.cell(4).left, Signal::Carrier('A'));
    assert_eq!(medium.cell(6).right, Signal::Carrier('A'));
    assert!(medium.cell(5).is_clear());

    medium = medium.propagate();
    assert_eq!(medium.cell(3).left, Signal::Carrier('A'));
    assert_eq!(medium.cell(7).right, Signal::Carrier('A'));
    assert_eq!(medium.render(), "___A___A___");
}

#[test]
fn test_signals_fall_off_the_ends() {
    let mut medium = Medium::new(4);
    medium.inject(0, 'A');

    for _ in 0..3 {
        medium = medium.propagate();
    }
    assert!(!medium.is_idle(), "front still traveling at round 3");

    medium = medium.propagate();
    assert!(medium.is_idle(), "both fronts left the cable");
}

#[test]
fn test_propagate_is_pure() {
    let mut medium = Medium::new(8);
    medium.inject(2, 'A');
    medium.inject(6, 'B');
    let snapshot = medium.clone();

    let first = medium.propagate();
    let second = medium.propagate();

    assert_eq!(medium, snapshot, "propagate must not mutate its input");
    assert_eq!(first, second);
}

#[test]
fn test_fresh_injection_renders_as_its_symbol() {
    // Both travel directions hold the same identifier right after injection;
    // that is not a collision and must not render as one.
    let mut medium = Medium::new(3);
    medium.inject(1, 'A');
    assert_eq!(medium.render(), "_A_");
    assert!(!medium.cell(1).has_jam());
}
