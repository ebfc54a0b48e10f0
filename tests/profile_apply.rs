//! Integration tests for profile application and range validation.
//!
//! These drive the profile table through a recording fake device, covering:
//! - exact pair sequences for the built-in profiles
//! - fail-fast behavior on a mid-profile request failure
//! - range rejection before any device interaction

use std::io;

use xiaomi_touch::device::{checked_pair, DeviceError, TouchControl};
use xiaomi_touch::modes::TouchMode;
use xiaomi_touch::profiles;

/// Records every set request as a raw (index, value) pair; optionally fails
/// once the nth call comes in.
struct FakeTouch {
    calls: Vec<(i32, u8)>,
    fail_at: Option<usize>,
}

impl FakeTouch {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_at: None,
        }
    }

    fn failing_at(n: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some(n),
        }
    }
}

impl TouchControl for FakeTouch {
    fn set(&mut self, mode: TouchMode, value: u8) -> Result<(), DeviceError> {
        if self.fail_at == Some(self.calls.len()) {
            return Err(DeviceError::RequestFailed {
                mode,
                source: io::Error::new(io::ErrorKind::Other, "injected failure"),
            });
        }
        self.calls.push((mode.index(), value));
        Ok(())
    }
}

// ==================== Profile Sequences ====================

#[test]
fn gaming_profile_issues_exact_pairs_in_order() {
    let mut fake = FakeTouch::new();
    let profile = profiles::find("gaming").unwrap();
    profiles::apply(&mut fake, profile).unwrap();
    assert_eq!(fake.calls, vec![(0, 1), (2, 5), (4, 5), (9, 1), (1, 1)]);
}

#[test]
fn sensitive_profile_issues_exact_pairs_in_order() {
    let mut fake = FakeTouch::new();
    let profile = profiles::find("sensitive").unwrap();
    profiles::apply(&mut fake, profile).unwrap();
    assert_eq!(fake.calls, vec![(2, 5), (3, 5), (4, 5), (5, 5)]);
}

#[test]
fn normal_profile_issues_exact_pairs_in_order() {
    let mut fake = FakeTouch::new();
    let profile = profiles::find("normal").unwrap();
    profiles::apply(&mut fake, profile).unwrap();
    assert_eq!(fake.calls, vec![(0, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
}

#[test]
fn battery_profile_issues_exact_pairs_in_order() {
    let mut fake = FakeTouch::new();
    let profile = profiles::find("battery").unwrap();
    profiles::apply(&mut fake, profile).unwrap();
    assert_eq!(fake.calls, vec![(9, 0), (1, 0), (13, 1)]);
}

// ==================== Fail-Fast ====================

#[test]
fn failed_third_pair_stops_the_profile() {
    let mut fake = FakeTouch::failing_at(2);
    let profile = profiles::find("gaming").unwrap();
    let err = profiles::apply(&mut fake, profile).unwrap_err();
    assert!(matches!(err, DeviceError::RequestFailed { .. }));
    // Pairs 4 and 5 were never attempted; pairs 1 and 2 stay applied.
    assert_eq!(fake.calls, vec![(0, 1), (2, 5)]);
}

#[test]
fn failed_first_pair_applies_nothing() {
    let mut fake = FakeTouch::failing_at(0);
    let profile = profiles::find("battery").unwrap();
    assert!(profiles::apply(&mut fake, profile).is_err());
    assert!(fake.calls.is_empty());
}

// ==================== Unknown Profiles ====================

#[test]
fn unknown_profile_name_resolves_to_nothing() {
    // The dispatcher only opens the device after a successful lookup, so an
    // unknown name means zero device calls by construction.
    assert!(profiles::find("xyz").is_none());
    assert!(profiles::find("gaming ").is_none());
    assert!(profiles::find("Gaming").is_none());
}

// ==================== Range Validation ====================

#[test]
fn out_of_range_pairs_are_rejected() {
    for (mode, value) in [(-1, 0), (21, 0), (0, -1), (0, 6), (100, 3), (5, 100)] {
        assert!(
            checked_pair(mode, value).is_err(),
            "({}, {}) should be rejected",
            mode,
            value
        );
    }
}

#[test]
fn full_valid_grid_is_accepted() {
    for mode in 0..21 {
        for value in 0..=5 {
            let (m, v) = checked_pair(mode, value).unwrap();
            assert_eq!(i64::from(m.index()), mode);
            assert_eq!(i64::from(v), value);
        }
    }
}
