//! Command line interface

use std::time::Duration;

use clap::{Parser, Subcommand};

use rfidscan_core::constants::{DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS, MIN_READ_TIMEOUT_MS};
use rfidscan_transport::SerialConfig;

use crate::monitor::{MonitorMode, MonitorOptions};

/// Serial RFID reader diagnostics with TC Kimlik validation
#[derive(Parser, Debug)]
#[command(name = "rfidscan", version, about)]
pub struct Cli {
    /// Serial port (COM4, /dev/ttyUSB0); auto-detected when omitted
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE, global = true)]
    pub baud: u32,

    /// Read timeout in milliseconds (idle time before a partial line is taken as a frame)
    #[arg(
        long,
        default_value_t = DEFAULT_READ_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(MIN_READ_TIMEOUT_MS..),
        global = true
    )]
    pub timeout_ms: u64,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Monitor the reader without the menu
    Monitor {
        /// Print only format and raw data
        #[arg(long)]
        simple: bool,

        /// Stop after this many seconds
        #[arg(long)]
        duration: Option<u64>,
    },

    /// List serial ports and test which can be opened
    Ports,

    /// Classify and validate numbers given on the command line
    Validate {
        #[arg(required = true)]
        numbers: Vec<String>,
    },
}

impl Cli {
    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig::with_baud_rate(self.baud)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Command {
    /// Session settings for `monitor`
    pub fn monitor_options(&self) -> Option<MonitorOptions> {
        match self {
            Self::Monitor { simple, duration } => {
                let mode = if *simple {
                    MonitorMode::Simple
                } else {
                    MonitorMode::Detailed
                };

                Some(match duration {
                    Some(secs) => MonitorOptions::for_duration(mode, Duration::from_secs(*secs)),
                    None => MonitorOptions::continuous(mode),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rfidscan"]).unwrap();

        assert_eq!(cli.port, None);
        assert_eq!(cli.command, None);
        assert_eq!(cli.serial_config(), SerialConfig::default());
        assert_eq!(cli.read_timeout(), Duration::from_secs(1));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_monitor_command() {
        let cli = Cli::try_parse_from([
            "rfidscan", "monitor", "--simple", "--duration", "30", "--port", "COM4",
        ])
        .unwrap();

        assert_eq!(cli.port.as_deref(), Some("COM4"));
        assert_eq!(
            cli.command.unwrap().monitor_options(),
            Some(MonitorOptions::for_duration(MonitorMode::Simple, Duration::from_secs(30)))
        );
    }

    #[test]
    fn test_monitor_defaults_to_continuous_detailed() {
        let cli = Cli::try_parse_from(["rfidscan", "-p", "/dev/ttyUSB0", "monitor"]).unwrap();

        assert_eq!(
            cli.command.unwrap().monitor_options(),
            Some(MonitorOptions::continuous(MonitorMode::Detailed))
        );
    }

    #[test]
    fn test_baud_rate() {
        let cli = Cli::try_parse_from(["rfidscan", "--baud", "19200"]).unwrap();
        assert_eq!(cli.serial_config().baud_rate, 19200);
    }

    #[test]
    fn test_timeout_lower_bound() {
        assert!(Cli::try_parse_from(["rfidscan", "--timeout-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["rfidscan", "--timeout-ms", "9"]).is_err());

        let cli = Cli::try_parse_from(["rfidscan", "--timeout-ms", "10"]).unwrap();
        assert_eq!(cli.read_timeout(), Duration::from_millis(10));
    }

    #[test]
    fn test_validate_requires_numbers() {
        assert!(Cli::try_parse_from(["rfidscan", "validate"]).is_err());

        let cli = Cli::try_parse_from(["rfidscan", "validate", "10000000146", "12345678901"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Validate {
                numbers: vec!["10000000146".into(), "12345678901".into()],
            })
        );
        assert_eq!(cli.command.unwrap().monitor_options(), None);
    }
}
