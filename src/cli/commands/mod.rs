pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
    value_parser,
};
use std::{net::IpAddr, path::PathBuf};

pub const ARG_PORT: &str = "port";
pub const ARG_LISTEN: &str = "listen";
pub const ARG_DATA_DIR: &str = "data-dir";
pub const ARG_LATENCY_MS: &str = "latency-ms";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("onboard")
        .about("Login, password reset and registration wizard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ONBOARD_PORT")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_LISTEN)
                .long("listen")
                .help("Address to bind")
                .default_value("127.0.0.1")
                .env("ONBOARD_LISTEN")
                .value_parser(value_parser!(IpAddr)),
        )
        .arg(
            Arg::new(ARG_DATA_DIR)
                .long("data-dir")
                .help("Directory holding storage.json")
                .default_value(".onboard")
                .env("ONBOARD_DATA_DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_LATENCY_MS)
                .long("latency-ms")
                .help("Simulated auth service round trip in milliseconds")
                .default_value("600")
                .env("ONBOARD_LATENCY_MS")
                .value_parser(value_parser!(u64)),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::telemetry::LogFormat;
    use std::net::{IpAddr, Ipv4Addr};

    const ENV_VARS: [&str; 6] = [
        "ONBOARD_PORT",
        "ONBOARD_LISTEN",
        "ONBOARD_DATA_DIR",
        "ONBOARD_LATENCY_MS",
        "ONBOARD_LOG_LEVEL",
        "ONBOARD_LOG_FORMAT",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ENV_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "onboard");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Login, password reset and registration wizard".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec!["onboard"]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<IpAddr>(ARG_LISTEN).copied(),
                Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
            );
            assert_eq!(
                matches.get_one::<PathBuf>(ARG_DATA_DIR).cloned(),
                Some(PathBuf::from(".onboard"))
            );
            assert_eq!(matches.get_one::<u64>(ARG_LATENCY_MS).copied(), Some(600));
            assert_eq!(
                matches.get_one::<LogFormat>(logging::ARG_LOG_FORMAT).copied(),
                Some(LogFormat::Pretty)
            );
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(0));
        });
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec![
                "onboard",
                "--port",
                "9090",
                "--listen",
                "0.0.0.0",
                "--data-dir",
                "/tmp/onboard",
                "--latency-ms",
                "0",
                "--log-format",
                "json",
            ]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
            assert_eq!(
                matches.get_one::<IpAddr>(ARG_LISTEN).copied(),
                Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            );
            assert_eq!(
                matches.get_one::<PathBuf>(ARG_DATA_DIR).cloned(),
                Some(PathBuf::from("/tmp/onboard"))
            );
            assert_eq!(matches.get_one::<u64>(ARG_LATENCY_MS).copied(), Some(0));
            assert_eq!(
                matches.get_one::<LogFormat>(logging::ARG_LOG_FORMAT).copied(),
                Some(LogFormat::Json)
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ONBOARD_PORT", Some("443")),
                ("ONBOARD_LISTEN", Some("::1")),
                ("ONBOARD_DATA_DIR", Some("/var/lib/onboard")),
                ("ONBOARD_LATENCY_MS", Some("25")),
                ("ONBOARD_LOG_LEVEL", Some("info")),
                ("ONBOARD_LOG_FORMAT", Some("json")),
            ],
            || {
                let matches = new().get_matches_from(vec!["onboard"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<IpAddr>(ARG_LISTEN).map(IpAddr::is_loopback),
                    Some(true)
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_DATA_DIR).cloned(),
                    Some(PathBuf::from("/var/lib/onboard"))
                );
                assert_eq!(matches.get_one::<u64>(ARG_LATENCY_MS).copied(), Some(25));
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
                assert_eq!(
                    matches.get_one::<LogFormat>(logging::ARG_LOG_FORMAT).copied(),
                    Some(LogFormat::Json)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, level) in levels.iter().enumerate() {
            temp_env::with_vars([("ONBOARD_LOG_LEVEL", Some(*level))], || {
                let matches = new().get_matches_from(vec!["onboard"]);
                assert_eq!(
                    matches
                        .get_one::<u8>(logging::ARG_VERBOSITY)
                        .map(|v| usize::from(*v)),
                    Some(index)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5 {
            temp_env::with_vars([("ONBOARD_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["onboard".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches
                        .get_one::<u8>(logging::ARG_VERBOSITY)
                        .map(|v| usize::from(*v)),
                    Some(index)
                );
            });
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        temp_env::with_vars(cleared(), || {
            assert!(new().try_get_matches_from(["onboard", "--port", "http"]).is_err());
            assert!(
                new()
                    .try_get_matches_from(["onboard", "--listen", "localhost"])
                    .is_err()
            );
            assert!(
                new()
                    .try_get_matches_from(["onboard", "--log-format", "xml"])
                    .is_err()
            );
        });
    }
}
