//! Gateway to the touch control character device.
//!
//! Every parameter write is one ioctl against `/dev/xiaomi-touch`. The
//! `TouchControl` trait is the seam between the command handlers and the
//! kernel: production code goes through [`TouchDevice`], tests substitute a
//! recording fake.

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;

use crate::modes::{TouchMode, VALUE_MAX};

/// Character device exposed by the touch driver.
pub const DEVICE_PATH: &str = "/dev/xiaomi-touch";

/// Base request code for the set-mode ioctl.
const SET_MODE_REQUEST: libc::c_ulong = 21504;

/// Disabling Game Mode is a distinct request in the driver, not a plain set
/// with value 0. No other (mode, value) pair deviates from the base code.
const GAME_MODE_OFF_REQUEST: libc::c_ulong = SET_MODE_REQUEST + 6;

/// Errors from opening the device or issuing a set request.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Cannot open {path}. Need root access.")]
    PermissionDenied {
        /// Device path the open was attempted on
        path: &'static str,
    },

    #[error("Cannot open {path}: {source}")]
    Open {
        /// Device path the open was attempted on
        path: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Mode must be 0-20 (got {0})")]
    ModeOutOfRange(i64),

    #[error("Value must be 0-5 (got {0})")]
    ValueOutOfRange(i64),

    #[error("Failed to set {mode}: {source}")]
    RequestFailed {
        /// Mode the request was for
        mode: TouchMode,
        #[source]
        source: io::Error,
    },
}

/// The single operation the driver supports.
pub trait TouchControl {
    /// Issue one set request for `mode` = `value`.
    fn set(&mut self, mode: TouchMode, value: u8) -> Result<(), DeviceError>;
}

/// Validate a raw (mode, value) pair from the command line.
///
/// Rejection happens here, before any device interaction; a `TouchMode` that
/// made it through is valid by construction.
pub fn checked_pair(mode: i64, value: i64) -> Result<(TouchMode, u8), DeviceError> {
    let mode = TouchMode::from_index(mode).ok_or(DeviceError::ModeOutOfRange(mode))?;
    if !(0..=i64::from(VALUE_MAX)).contains(&value) {
        return Err(DeviceError::ValueOutOfRange(value));
    }
    Ok((mode, value as u8))
}

/// Request code for one set.
fn request_code(mode: TouchMode, value: u8) -> libc::c_ulong {
    match (mode, value) {
        // The driver's one irregular request.
        (TouchMode::GameMode, 0) => GAME_MODE_OFF_REQUEST,
        _ => SET_MODE_REQUEST,
    }
}

/// Handle on the opened control device.
///
/// The file descriptor is released by `Drop` on every exit path.
pub struct TouchDevice {
    file: File,
}

impl TouchDevice {
    /// Open the control device read-write.
    ///
    /// The device node is root-owned on stock firmware, so a permission
    /// failure gets its own variant and the caller can suggest a retry
    /// under `su`.
    pub fn open() -> Result<Self, DeviceError> {
        let file = File::options()
            .read(true)
            .write(true)
            .open(DEVICE_PATH)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::PermissionDenied {
                    DeviceError::PermissionDenied { path: DEVICE_PATH }
                } else {
                    DeviceError::Open {
                        path: DEVICE_PATH,
                        source: e,
                    }
                }
            })?;
        log::debug!("opened {}", DEVICE_PATH);
        Ok(Self { file })
    }
}

impl TouchControl for TouchDevice {
    fn set(&mut self, mode: TouchMode, value: u8) -> Result<(), DeviceError> {
        let request = request_code(mode, value);
        let arg: [libc::c_int; 2] = [mode.index(), libc::c_int::from(value)];

        log::debug!("ioctl {} [{}, {}]", request, arg[0], arg[1]);
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), request, arg.as_ptr()) };
        if ret < 0 {
            return Err(DeviceError::RequestFailed {
                mode,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_code_full_grid() {
        // Base code for every pair except Game Mode off.
        for mode in TouchMode::ALL {
            for value in 0..=VALUE_MAX {
                let expected = if mode == TouchMode::GameMode && value == 0 {
                    21510
                } else {
                    21504
                };
                assert_eq!(
                    request_code(mode, value),
                    expected,
                    "mode {} value {}",
                    mode.index(),
                    value
                );
            }
        }
    }

    #[test]
    fn test_game_mode_nonzero_uses_base_code() {
        assert_eq!(request_code(TouchMode::GameMode, 1), 21504);
        assert_eq!(request_code(TouchMode::GameMode, 5), 21504);
    }

    #[test]
    fn test_checked_pair_accepts_full_valid_grid() {
        for mode in 0..21 {
            for value in 0..=5 {
                let (m, v) = checked_pair(mode, value).expect("valid pair rejected");
                assert_eq!(i64::from(m.index()), mode);
                assert_eq!(i64::from(v), value);
            }
        }
    }

    #[test]
    fn test_checked_pair_rejects_mode_out_of_range() {
        for mode in [-1, 21, 100, i64::MIN, i64::MAX] {
            let err = checked_pair(mode, 0).unwrap_err();
            assert!(matches!(err, DeviceError::ModeOutOfRange(m) if m == mode));
        }
    }

    #[test]
    fn test_checked_pair_rejects_value_out_of_range() {
        for value in [-1, 6, 100, i64::MIN] {
            let err = checked_pair(0, value).unwrap_err();
            assert!(matches!(err, DeviceError::ValueOutOfRange(v) if v == value));
        }
    }

    #[test]
    fn test_mode_is_checked_before_value() {
        // Both out of range: the mode error wins, matching the original
        // tool's check order.
        let err = checked_pair(99, 99).unwrap_err();
        assert!(matches!(err, DeviceError::ModeOutOfRange(99)));
    }

    #[test]
    fn test_error_messages() {
        let err = DeviceError::ModeOutOfRange(42);
        assert_eq!(err.to_string(), "Mode must be 0-20 (got 42)");

        let err = DeviceError::ValueOutOfRange(-3);
        assert_eq!(err.to_string(), "Value must be 0-5 (got -3)");

        let err = DeviceError::PermissionDenied { path: DEVICE_PATH };
        assert!(err.to_string().contains("Need root access"));
    }
}
