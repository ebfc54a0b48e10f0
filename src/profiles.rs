//! Named presets over the touch mode table.
//!
//! A profile is an ordered list of (mode, value) pairs applied front to
//! back. Application is fail-fast: the first failed set aborts the rest,
//! and pairs already written stay written.

use crate::device::{DeviceError, TouchControl};
use crate::modes::TouchMode;

/// A named preset bundling several mode settings.
pub struct Profile {
    pub name: &'static str,
    pub description: &'static str,
    /// Pairs in application order.
    pub settings: &'static [(TouchMode, u8)],
}

/// Built-in profiles, in lookup order.
pub const PROFILES: &[Profile] = &[
    Profile {
        name: "gaming",
        description: "Best for games",
        settings: &[
            (TouchMode::GameMode, 1),
            (TouchMode::UpThreshold, 5),
            (TouchMode::AimSensitivity, 5),
            (TouchMode::ReportRate, 1),
            (TouchMode::ActiveMode, 1),
        ],
    },
    Profile {
        name: "sensitive",
        description: "High sensitivity",
        settings: &[
            (TouchMode::UpThreshold, 5),
            (TouchMode::Tolerance, 5),
            (TouchMode::AimSensitivity, 5),
            (TouchMode::TapStability, 5),
        ],
    },
    Profile {
        name: "normal",
        description: "Default settings",
        settings: &[
            (TouchMode::GameMode, 0),
            (TouchMode::UpThreshold, 0),
            (TouchMode::Tolerance, 0),
            (TouchMode::AimSensitivity, 0),
            (TouchMode::TapStability, 0),
        ],
    },
    Profile {
        name: "battery",
        description: "Save battery",
        settings: &[
            (TouchMode::ReportRate, 0),
            (TouchMode::ActiveMode, 0),
            (TouchMode::IdleTime, 1),
        ],
    },
];

/// Look up a profile by exact name. First match in table order wins.
pub fn find(name: &str) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.name == name)
}

/// Apply every pair of `profile` in order, stopping at the first failure.
pub fn apply<C: TouchControl>(device: &mut C, profile: &Profile) -> Result<(), DeviceError> {
    println!("Applying {} profile...", profile.name);

    for &(mode, value) in profile.settings {
        device.set(mode, value)?;
        println!("OK: {} = {}", mode, value);
    }

    println!("Done!");
    Ok(())
}

/// Print the profile table to stdout (the `list` command).
pub fn print_profiles() {
    println!("Available Profiles:\n");

    for profile in PROFILES {
        println!("  {:<12} - {}", profile.name, profile.description);
    }

    println!();
    println!("Usage: xiaomi-touch <profile>");
    println!("Example: xiaomi-touch gaming");
}
