//! The "Dummy Server's" entry point.

use blockdb_common::cli::constants::{DEFAULT_HOST, DEFAULT_PORT};
use blockdb_common::cli::helpers::init_logging;
use blockdb_dummy_server::routes;
use clap::Parser;
use std::error::Error;
use std::net::{IpAddr, SocketAddr};

/// Answers the write endpoints with fixed replies
#[derive(Parser, Debug)]
#[command(name = "blockdb_dummy_server")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: IpAddr,
}

/// The "Dummy Server's" entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);
    let (addr, server) = warp::serve(routes()).try_bind_ephemeral(addr)?;

    log::info!("App listening on {}", addr);
    log::info!("Press Ctrl+C to quit.");

    server.await;

    Ok(())
}
