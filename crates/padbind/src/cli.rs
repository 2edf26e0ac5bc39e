use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use padbind_gamepad::DeviceClass;
use padbind_mapping::{ControlProfile, LogicalInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ClassArg {
    Gamepad,
    ArcadeStick,
    Joystick,
}

impl From<ClassArg> for DeviceClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Gamepad => DeviceClass::Gamepad,
            ClassArg::ArcadeStick => DeviceClass::ArcadeStick,
            ClassArg::Joystick => DeviceClass::Joystick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Toggle {
    On,
    Off,
}

/// Selects the device and mapping a command works on.
#[derive(Debug, Args, PartialEq)]
pub(crate) struct Target {
    /// Unique id of the device. Devices that are not connected are edited offline
    #[arg(short, long)]
    pub device: String,

    /// Control profile, `console` or `arcade`. Defaults to the settings file
    #[arg(short, long)]
    pub profile: Option<ControlProfile>,

    /// Device family used for offline devices
    #[arg(long, value_enum, default_value_t = ClassArg::Gamepad)]
    pub class: ClassArg,

    /// Maple port (0-3) edited on devices that feed every port
    #[arg(long)]
    pub port: Option<u8>,

    /// Game id for per-game mappings
    #[arg(short, long)]
    pub game: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// List connected devices.
    Devices {
        /// Keep running and print hot-plug and input events until Ctrl+C
        #[arg(long)]
        watch: bool,
    },
    /// Show the mapping of a device.
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Bind a logical input to the next physical input of the device.
    Map {
        #[command(flatten)]
        target: Target,
        /// Logical input to bind, e.g. `a`, `dpad_up`, `axis_left`
        input: LogicalInput,
        /// Bind this button code instead of waiting for the device
        #[arg(long, conflicts_with = "axis")]
        button: Option<u32>,
        /// Bind this axis half, written as `<code>+` or `<code>-`
        #[arg(long)]
        axis: Option<String>,
    },
    /// Clear the bindings of a logical input.
    Unmap {
        #[command(flatten)]
        target: Target,
        input: LogicalInput,
    },
    /// Replace the bindings with the recommended defaults.
    Reset {
        #[command(flatten)]
        target: Target,
        /// Use the arcade stick layout instead of the gamepad layout
        #[arg(long)]
        arcade_stick: bool,
    },
    /// Change rumble power, dead zone or saturation. Copied to both profiles.
    Tune {
        #[command(flatten)]
        target: Target,
        /// Rumble power in percent
        #[arg(long)]
        rumble: Option<u8>,
        /// Dead zone as a fraction of full deflection
        #[arg(long)]
        dead_zone: Option<f32>,
        /// Analog saturation factor
        #[arg(long)]
        saturation: Option<f32>,
    },
    /// Keep a separate mapping for the selected game.
    PerGame {
        #[command(flatten)]
        target: Target,
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Change the editor defaults stored in the workspace.
    Settings {
        /// Seconds to wait for a physical input
        #[arg(long)]
        timeout: Option<u64>,
        /// Default maple port
        #[arg(long)]
        port: Option<u8>,
        /// Default control profile
        #[arg(long)]
        profile: Option<ControlProfile>,
        /// Current game id. An empty value clears it
        #[arg(long)]
        game: Option<String>,
    },
}

/// Maps physical gamepad inputs to emulated Dreamcast and arcade controls.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Workspace directory. Defaults to ~/.config/padbind
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_map_with_axis() {
        let cli = Cli::try_parse_from([
            "padbind", "map", "-d", "pad", "-p", "arcade", "--port", "1", "axis_up", "--axis", "1-",
        ])
        .expect("arguments should parse");
        match cli.command {
            Command::Map { target, input, button, axis } => {
                assert_eq!(target.device, "pad");
                assert_eq!(target.profile, Some(ControlProfile::Arcade));
                assert_eq!(target.port, Some(1));
                assert_eq!(target.class, ClassArg::Gamepad);
                assert_eq!(input, LogicalInput::AxisUp);
                assert_eq!(button, None);
                assert_eq!(axis.as_deref(), Some("1-"));
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(Cli::try_parse_from(["padbind", "unmap", "-d", "pad", "turbo"]).is_err());
    }

    #[test]
    fn devices_watch_flag() {
        let cli = Cli::try_parse_from(["padbind", "devices", "--watch"]).expect("arguments should parse");
        assert_eq!(cli.command, Command::Devices { watch: true });
        let cli = Cli::try_parse_from(["padbind", "devices"]).expect("arguments should parse");
        assert_eq!(cli.command, Command::Devices { watch: false });
    }

    #[test]
    fn per_game_toggle() {
        let cli = Cli::try_parse_from(["padbind", "per-game", "-d", "pad", "-g", "T1234", "on"])
            .expect("arguments should parse");
        assert!(matches!(cli.command, Command::PerGame { state: Toggle::On, .. }));
    }
}
