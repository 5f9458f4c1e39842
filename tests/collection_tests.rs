//! Versioned sequence basics: length, version counting, bounds checks.

use failfast_lab::{Fault, SharedSeq, VersionedSeq};

#[test]
fn len_tracks_successful_appends() {
    let mut seq = VersionedSeq::new();
    for i in 0..10 {
        seq.push(i.to_string());
    }
    assert_eq!(seq.len(), 10);
    assert!(!seq.is_empty());
}

#[test]
fn every_structural_mutation_bumps_the_version() {
    let mut seq = VersionedSeq::new();
    assert_eq!(seq.version(), 0);

    seq.push("a".to_string());
    seq.push("b".to_string());
    assert_eq!(seq.version(), 2);

    seq.remove_at(0).unwrap();
    assert_eq!(seq.version(), 3);

    assert!(seq.remove_item(&"b".to_string()));
    assert_eq!(seq.version(), 4);
}

#[test]
fn missing_value_removal_is_not_structural() {
    let mut seq = VersionedSeq::new();
    seq.push("a".to_string());
    let version = seq.version();

    assert!(!seq.remove_item(&"zzz".to_string()));
    assert_eq!(seq.version(), version, "a miss must not bump the version");
}

#[test]
fn positional_removal_is_bounds_checked() {
    let mut seq = VersionedSeq::new();
    seq.push("a".to_string());

    let err = seq.remove_at(1).unwrap_err();
    assert_eq!(err, Fault::BoundsViolation { index: 1, len: 1 });

    // The failed removal must not count as structural.
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.version(), 1);
}

#[test]
fn shared_handles_see_one_sequence() {
    let seq = SharedSeq::new();
    let other = seq.clone();

    seq.push("a".to_string());
    other.push("b".to_string());

    assert_eq!(seq.len(), 2);
    assert_eq!(other.version(), seq.version());
    assert_eq!(seq.get_cloned(1), Some("b".to_string()));
}

#[test]
fn duplicate_elements_are_allowed() {
    let seq = SharedSeq::new();
    seq.push("x".to_string());
    seq.push("x".to_string());
    assert_eq!(seq.len(), 2);

    // Value removal takes the first match only.
    assert!(seq.remove_item(&"x".to_string()));
    assert_eq!(seq.len(), 1);
}
