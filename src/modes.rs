//! Mode table for the Xiaomi touch driver.
//!
//! Mode indices are the driver's identity contract: the ioctl payload carries
//! the raw index, so the discriminants below must stay in driver order.

use std::fmt;

/// Number of modes the driver exposes.
pub const MODE_COUNT: usize = 21;

/// Highest value accepted for any mode.
pub const VALUE_MAX: u8 = 5;

/// One tunable setting exposed by the touch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TouchMode {
    GameMode = 0,
    ActiveMode = 1,
    UpThreshold = 2,
    Tolerance = 3,
    AimSensitivity = 4,
    TapStability = 5,
    ExpertMode = 6,
    EdgeFilter = 7,
    PanelOrientation = 8,
    ReportRate = 9,
    FodEnable = 10,
    AodEnable = 11,
    ResistRf = 12,
    IdleTime = 13,
    DoubleTap = 14,
    GripMode = 15,
    FodIcon = 16,
    NonUiMode = 17,
    DebugLevel = 18,
    PowerStatus = 19,
    PenEnable = 20,
}

impl TouchMode {
    /// All modes in driver index order.
    pub const ALL: [TouchMode; MODE_COUNT] = [
        TouchMode::GameMode,
        TouchMode::ActiveMode,
        TouchMode::UpThreshold,
        TouchMode::Tolerance,
        TouchMode::AimSensitivity,
        TouchMode::TapStability,
        TouchMode::ExpertMode,
        TouchMode::EdgeFilter,
        TouchMode::PanelOrientation,
        TouchMode::ReportRate,
        TouchMode::FodEnable,
        TouchMode::AodEnable,
        TouchMode::ResistRf,
        TouchMode::IdleTime,
        TouchMode::DoubleTap,
        TouchMode::GripMode,
        TouchMode::FodIcon,
        TouchMode::NonUiMode,
        TouchMode::DebugLevel,
        TouchMode::PowerStatus,
        TouchMode::PenEnable,
    ];

    /// Convert a raw index, rejecting anything outside the driver's table.
    pub fn from_index(index: i64) -> Option<TouchMode> {
        let index = usize::try_from(index).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Raw index as carried in the ioctl payload.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Display name, matching the driver's mode table.
    pub fn name(self) -> &'static str {
        match self {
            TouchMode::GameMode => "Game Mode",
            TouchMode::ActiveMode => "Active Mode",
            TouchMode::UpThreshold => "UP Threshold",
            TouchMode::Tolerance => "Tolerance",
            TouchMode::AimSensitivity => "Aim Sensitivity",
            TouchMode::TapStability => "Tap Stability",
            TouchMode::ExpertMode => "Expert Mode",
            TouchMode::EdgeFilter => "Edge Filter",
            TouchMode::PanelOrientation => "Panel Orientation",
            TouchMode::ReportRate => "Report Rate",
            TouchMode::FodEnable => "FOD Enable",
            TouchMode::AodEnable => "AOD Enable",
            TouchMode::ResistRf => "Resist RF",
            TouchMode::IdleTime => "Idle Time",
            TouchMode::DoubleTap => "Double Tap",
            TouchMode::GripMode => "Grip Mode",
            TouchMode::FodIcon => "FOD Icon",
            TouchMode::NonUiMode => "Non-UI Mode",
            TouchMode::DebugLevel => "Debug Level",
            TouchMode::PowerStatus => "Power Status",
            TouchMode::PenEnable => "Pen Enable",
        }
    }

    /// Value used when turning a mode "on".
    ///
    /// The threshold and sensitivity sliders (modes 2-5) go to full scale;
    /// everything else is a plain toggle.
    pub fn on_value(self) -> u8 {
        match self {
            TouchMode::UpThreshold
            | TouchMode::Tolerance
            | TouchMode::AimSensitivity
            | TouchMode::TapStability => VALUE_MAX,
            _ => 1,
        }
    }
}

impl fmt::Display for TouchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Print the mode table to stdout (the `modes` command).
pub fn print_modes() {
    println!("Touch Modes:\n");

    for mode in TouchMode::ALL {
        println!("  {:2} - {}", mode.index(), mode.name());
    }

    println!();
    println!("Usage:");
    println!("  xiaomi-touch set <mode> <value>  # Set specific value (0-5)");
    println!("  xiaomi-touch on <mode>           # Turn on");
    println!("  xiaomi-touch off <mode>          # Turn off");
    println!();
    println!("Examples:");
    println!("  xiaomi-touch set 4 5    # Max aim sensitivity");
    println!("  xiaomi-touch on 0       # Enable game mode");
    println!("  xiaomi-touch off 15     # Disable grip mode");
}
