use clap::Parser;

use crate::config::PORT_RANGE;

/// Serves a fixed document root over a minimal HTTP/1.1 protocol.
#[derive(Debug, Parser)]
#[command(name = "docserve")]
#[command(about = "Minimal single-request-per-connection file server")]
pub struct Args {
    /// Port to listen on (49152-65535). Defaults to the configured port.
    #[arg(value_parser = clap::value_parser!(u16).range(port_range()))]
    pub port: Option<u16>,
}

fn port_range() -> std::ops::RangeInclusive<i64> {
    i64::from(*PORT_RANGE.start())..=i64::from(*PORT_RANGE.end())
}
