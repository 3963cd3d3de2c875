//! CalcWire - A Minimal Asynchronous HTTP-Style Calculator Service
//!
//! This is the main entry point for the CalcWire server.
//! It sets up the TCP listener and hands each accepted connection to its
//! own task.

use calcwire::commands::CommandHandler;
use calcwire::connection::{handle_connection, ConnectionStats};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: calcwire::DEFAULT_HOST.to_string(),
            port: calcwire::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("CalcWire version {}", calcwire::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn print_help() {
    println!(
        r#"
CalcWire - A Minimal Asynchronous HTTP-Style Calculator Service

USAGE:
    calcwire [OPTIONS]

OPTIONS:
    -h, --host <HOST>    Host to bind to (default: 0.0.0.0)
    -p, --port <PORT>    Port to listen on (default: 8080)
    -v, --version        Print version information
        --help           Print this help message

EXAMPLES:
    calcwire                       # Start on 0.0.0.0:8080
    calcwire --port 9090           # Start on port 9090
    calcwire --host 127.0.0.1      # Listen on loopback only

CONNECTING:
    Use curl to send a request:
    $ curl -X GET -d "factorial 5" 127.0.0.1:8080
    120
    $ curl -X POST -d "abs 5,87,2,5,1,4,67,6" 127.0.0.1:8080
    22.125
"#
    );
}

fn print_banner(config: &Config) {
    println!(
        r#"
         ██████╗ █████╗ ██╗      ██████╗██╗    ██╗██╗██████╗ ███████╗
        ██╔════╝██╔══██╗██║     ██╔════╝██║    ██║██║██╔══██╗██╔════╝
        ██║     ███████║██║     ██║     ██║ █╗ ██║██║██████╔╝█████╗
        ██║     ██╔══██║██║     ██║     ██║███╗██║██║██╔══██╗██╔══╝
        ╚██████╗██║  ██║███████╗╚██████╗╚███╔███╔╝██║██║  ██║███████╗
         ╚═════╝╚═╝  ╚═╝╚══════╝ ╚═════╝ ╚══╝╚══╝ ╚═╝╚═╝  ╚═╝╚══════╝

CalcWire v{} - Minimal Asynchronous HTTP-Style Calculator Service
──────────────────────────────────────────────────────────────
Server started on {}
Ready to accept connections.

Use Ctrl+C to shutdown gracefully.
"#,
        calcwire::VERSION,
        config.bind_address()
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Print the banner
    print_banner(&config);

    // Create connection statistics
    let stats = Arc::new(ConnectionStats::new());

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, stats) => {}
        _ = shutdown => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Main loop that accepts incoming connections.
///
/// A failed accept is logged and the loop immediately retries; nothing a
/// single connection does can stop the listener.
async fn accept_loop(listener: TcpListener, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let handler = CommandHandler::new();
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
