//! Cache State Store Unit Tests.
//!
//! Verifies construction from a `CacheConfig`, address routing to sets,
//! read-only lookups, and reset. The cache is built directly; no simulator needed.

use csim_core::SimError;
use csim_core::cache::Cache;
use csim_core::common::AccessOutcome;
use csim_core::config::{CacheConfig, SetAllocation};
use rstest::rstest;

fn cache(s: u32, e: usize, b: u32) -> Cache {
    Cache::new(&CacheConfig::new(s, e, b)).unwrap()
}

#[rstest]
#[case(0, 1, 1)]
#[case(1, 2, 2)]
#[case(4, 1, 16)]
#[case(5, 8, 32)]
fn conventional_allocation_has_two_pow_s_sets(
    #[case] s: u32,
    #[case] e: usize,
    #[case] sets: usize,
) {
    let c = cache(s, e, 4);
    assert_eq!(c.num_sets(), sets);
    assert_eq!(c.associativity(), e);
    assert!(c.sets().iter().all(|set| set.ways() == e));
}

#[test]
fn doubled_allocation_leaves_upper_half_unused() {
    let mut config = CacheConfig::new(2, 1, 0);
    config.set_allocation = SetAllocation::Doubled;
    let mut c = Cache::new(&config).unwrap();
    assert_eq!(c.num_sets(), 8);

    for addr in 0..64 {
        let _ = c.access(addr);
    }
    assert!(c.sets()[..4].iter().all(|s| s.occupancy() == 1));
    assert!(c.sets()[4..].iter().all(|s| s.occupancy() == 0));
}

#[test]
fn invalid_geometry_is_rejected() {
    let err = Cache::new(&CacheConfig::new(4, 0, 4)).unwrap_err();
    assert!(matches!(err, SimError::ConfigurationInvalid(_)));

    let err = Cache::new(&CacheConfig::new(40, 1, 30)).unwrap_err();
    assert!(matches!(err, SimError::ConfigurationInvalid(_)));
}

/// Addresses differing only in block offset hit the same line.
#[test]
fn same_block_different_offset_hits() {
    let mut c = cache(4, 1, 4);
    assert_eq!(c.access(0x1000), AccessOutcome::Miss);
    assert_eq!(c.access(0x100f), AccessOutcome::Hit);
    assert_eq!(c.access(0x1010), AccessOutcome::Miss, "next block, next set");
}

#[test]
fn sets_are_independent() {
    let mut c = cache(1, 1, 4);
    // 0x00 -> set 0, 0x10 -> set 1, 0x20 -> set 0 with a new tag.
    assert_eq!(c.access(0x00), AccessOutcome::Miss);
    assert_eq!(c.access(0x10), AccessOutcome::Miss);
    assert_eq!(c.access(0x20), AccessOutcome::MissWithEviction);
    assert!(c.contains(0x10));
    assert!(!c.contains(0x00));
    assert!(c.contains(0x20));
}

#[test]
fn contains_does_not_touch_ranks() {
    let mut c = cache(0, 2, 0);
    let _ = c.access(1);
    let _ = c.access(2);
    let before = c.sets()[0].clone();
    assert!(c.contains(1));
    assert!(!c.contains(3));
    assert_eq!(c.sets()[0], before);
}

#[test]
fn process_uses_decoded_coordinates() {
    let mut c = cache(2, 1, 0);
    let d = c.decode(0x16);
    assert_eq!((d.set_index, d.tag), (2, 5));
    assert_eq!(
        c.process(d.set_index as usize, d.tag),
        Some(AccessOutcome::Miss)
    );
    assert!(c.contains(0x16));
    assert!(c.set(2).is_some_and(|s| s.find(5).is_some()));
    assert!(c.set(4).is_none());
}

#[test]
fn process_rejects_unallocated_set() {
    let mut c = cache(1, 1, 0);
    assert_eq!(c.process(5, 0), None);
    assert_eq!(c.process(2, 0), None);
    assert!(c.sets().iter().all(|s| s.occupancy() == 0));
    assert_eq!(c.process(1, 0), Some(AccessOutcome::Miss));
}

#[test]
fn reset_invalidates_everything() {
    let mut c = cache(2, 2, 2);
    for addr in (0..256).step_by(4) {
        let _ = c.access(addr);
    }
    c.reset();
    assert!(c.sets().iter().all(|s| s.occupancy() == 0));
    assert_eq!(c.access(0), AccessOutcome::Miss);
}
