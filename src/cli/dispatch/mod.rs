//! Maps parsed arguments to the action the binary executes.

use crate::cli::{
    actions::{Action, server::Args},
    commands::{ARG_DATA_DIR, ARG_LATENCY_MS, ARG_LISTEN, ARG_PORT},
};
use anyhow::{Context, Result};
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let listen = matches
        .get_one::<IpAddr>(ARG_LISTEN)
        .copied()
        .context("missing required argument: --listen")?;
    let data_dir = matches
        .get_one::<PathBuf>(ARG_DATA_DIR)
        .cloned()
        .context("missing required argument: --data-dir")?;
    let latency = matches
        .get_one::<u64>(ARG_LATENCY_MS)
        .copied()
        .map(Duration::from_millis)
        .context("missing required argument: --latency-ms")?;

    Ok(Action::Server(Args {
        addr: SocketAddr::new(listen, port),
        data_dir,
        latency,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn builds_the_server_action() -> Result<()> {
        temp_env::with_vars(
            [
                ("ONBOARD_PORT", Some("3000")),
                ("ONBOARD_LISTEN", None),
                ("ONBOARD_DATA_DIR", Some("/tmp/onboard-data")),
                ("ONBOARD_LATENCY_MS", Some("50")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["onboard"]);
                let Action::Server(args) = handler(&matches)?;
                assert_eq!(args.addr, "127.0.0.1:3000".parse::<SocketAddr>()?);
                assert_eq!(args.data_dir, PathBuf::from("/tmp/onboard-data"));
                assert_eq!(args.latency, Duration::from_millis(50));
                Ok(())
            },
        )
    }
}
