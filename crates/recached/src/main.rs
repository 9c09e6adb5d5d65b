//! Recached - line-protocol LRU cache daemon

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use recache::Cache;
use recached::server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1024)]
    capacity: usize,

    /// Health check mode (for Docker)
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    // Health check
    if args.health {
        match TcpStream::connect(&args.bind).await {
            Ok(_) => {
                println!("OK");
                std::process::exit(0);
            }
            Err(_) => {
                eprintln!("FAILED");
                std::process::exit(1);
            }
        }
    }

    info!("Starting Recached v{}", env!("CARGO_PKG_VERSION"));
    info!("Binding to {}", args.bind);
    info!("Cache capacity: {}", args.capacity);

    let cache = Arc::new(Cache::new(args.capacity));

    let listener = TcpListener::bind(&args.bind).await?;
    info!("Server listening on {}", args.bind);

    println!("\nRecached ready on {}", args.bind);
    println!("  Try it: nc {} {}", host(&args.bind), port(&args.bind));
    println!("  Commands: PUT <key> <value> | GET <key> | DEL <key> | SIZE");
    println!("  Capacity: {} entries (LRU by last write)\n", args.capacity);

    tokio::select! {
        _ = server::serve(listener, Arc::clone(&cache)) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    info!("Final cache stats: {}", cache.stats());
    Ok(())
}

fn host(bind: &str) -> &str {
    bind.split(':').next().unwrap_or("127.0.0.1")
}

fn port(bind: &str) -> &str {
    bind.split(':').nth(1).unwrap_or("3000")
}
