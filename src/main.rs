use clap::{CommandFactory, Parser, Subcommand};

use xiaomi_touch::device::{self, DeviceError, TouchControl, TouchDevice};
use xiaomi_touch::modes::{self, TouchMode};
use xiaomi_touch::profiles;

/// xiaomi-touch: Touchscreen driver control for Xiaomi phones
#[derive(Parser, Debug)]
#[command(name = "xiaomi-touch")]
#[command(version, about = "Touchscreen driver control for Xiaomi phones")]
#[command(long_about = "Configure touchscreen driver parameters through the \
    /dev/xiaomi-touch control device. Apply a named profile, or set \
    individual modes with set/on/off. The device node is root-owned on \
    stock firmware, so device-touching commands usually need su.")]
#[command(after_help = "EXAMPLES:
    # Apply the gaming profile
    xiaomi-touch gaming

    # Back to defaults
    xiaomi-touch normal

    # Max aim sensitivity (mode 4)
    xiaomi-touch set 4 5

    # Game mode on / off
    xiaomi-touch on 0
    xiaomi-touch off 0

    # See what is available
    xiaomi-touch list
    xiaomi-touch modes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all profiles
    List,

    /// Show all touch modes
    Modes,

    /// Print version information
    Version,

    /// Set one mode to a value (0-5)
    #[command(after_help = "EXAMPLES:
    xiaomi-touch set 4 5    # Max aim sensitivity
    xiaomi-touch set 9 1    # Raise report rate")]
    Set {
        /// Mode index (see `xiaomi-touch modes`)
        mode: String,
        /// Value to set (0-5)
        value: String,
    },

    /// Turn a mode on (full scale for the 2-5 sliders, 1 otherwise)
    On {
        /// Mode index (see `xiaomi-touch modes`)
        mode: String,
    },

    /// Turn a mode off
    Off {
        /// Mode index (see `xiaomi-touch modes`)
        mode: String,
    },

    /// Apply a named profile (e.g. `xiaomi-touch gaming`)
    #[command(external_subcommand)]
    Apply(Vec<String>),
}

/// atoi-style integer parse: optional leading whitespace and sign, then the
/// longest digit prefix; anything unparsable is 0.
///
/// The stock tool used atoi(3), so `set garbage garbage` has always meant
/// `set 0 0`. Kept for compatibility rather than silently tightened.
fn lenient_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Set one mode and echo the result.
fn set_one<C: TouchControl>(device: &mut C, mode: TouchMode, value: u8) -> Result<(), DeviceError> {
    device.set(mode, value)?;
    println!("OK: {} = {}", mode, value);
    Ok(())
}

fn run_set(raw_mode: i64, raw_value: i64) -> Result<(), DeviceError> {
    let mut device = TouchDevice::open()?;
    let (mode, value) = device::checked_pair(raw_mode, raw_value)?;
    set_one(&mut device, mode, value)
}

fn run_on(raw_mode: i64) -> Result<(), DeviceError> {
    let mut device = TouchDevice::open()?;
    let mode = TouchMode::from_index(raw_mode).ok_or(DeviceError::ModeOutOfRange(raw_mode))?;
    set_one(&mut device, mode, mode.on_value())
}

fn run_off(raw_mode: i64) -> Result<(), DeviceError> {
    let mut device = TouchDevice::open()?;
    let mode = TouchMode::from_index(raw_mode).ok_or(DeviceError::ModeOutOfRange(raw_mode))?;
    set_one(&mut device, mode, 0)
}

fn run_apply(profile: &profiles::Profile) -> Result<(), DeviceError> {
    let mut device = TouchDevice::open()?;
    profiles::apply(&mut device, profile)
}

/// Print a device error and exit. A permission failure also gets the exact
/// command to retry under su.
fn report_device_error(err: DeviceError) -> ! {
    eprintln!("Error: {}", err);
    if matches!(err, DeviceError::PermissionDenied { .. }) {
        let args: Vec<String> = std::env::args().skip(1).collect();
        eprintln!("Try: su -c 'xiaomi-touch {}'", args.join(" "));
    }
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::List) => profiles::print_profiles(),
        Some(Command::Modes) => modes::print_modes(),
        Some(Command::Version) => {
            println!("Xiaomi Touch Control v{}", env!("CARGO_PKG_VERSION"));
        }
        Some(Command::Set { mode, value }) => {
            if let Err(e) = run_set(lenient_int(&mode), lenient_int(&value)) {
                report_device_error(e);
            }
        }
        Some(Command::On { mode }) => {
            if let Err(e) = run_on(lenient_int(&mode)) {
                report_device_error(e);
            }
        }
        Some(Command::Off { mode }) => {
            if let Err(e) = run_off(lenient_int(&mode)) {
                report_device_error(e);
            }
        }
        Some(Command::Apply(args)) => match args.as_slice() {
            [name] => {
                // Look the profile up before touching the device: an unknown
                // name must not open anything.
                let Some(profile) = profiles::find(name) else {
                    eprintln!("Error: Unknown profile '{}'", name);
                    eprintln!("Use 'xiaomi-touch list' to see available profiles");
                    std::process::exit(1);
                };
                if let Err(e) = run_apply(profile) {
                    report_device_error(e);
                }
            }
            _ => {
                eprintln!("Error: Invalid command\n");
                let _ = Cli::command().print_help();
                std::process::exit(1);
            }
        },
        None => {
            // Brief overview when no command is provided.
            println!("xiaomi-touch {}", env!("CARGO_PKG_VERSION"));
            println!("Touchscreen driver control for Xiaomi phones\n");
            println!("USAGE:");
            println!("    xiaomi-touch <COMMAND>\n");
            println!("COMMANDS:");
            println!("    <profile>  Apply a named profile (gaming, sensitive, normal, battery)");
            println!("    set        Set one mode to a value (0-5)");
            println!("    on         Turn a mode on");
            println!("    off        Turn a mode off");
            println!("    list       Show all profiles");
            println!("    modes      Show all touch modes");
            println!("    version    Print version information\n");
            println!("Run 'xiaomi-touch --help' for more details and examples.");
        }
    }
}
