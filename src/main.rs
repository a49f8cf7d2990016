use anyhow::Result;
use clap::{Parser, Subcommand};
use ytd::config::{
    DEFAULT_HOST, DEFAULT_PLAYER_ENDPOINT, DEFAULT_PORT, DEFAULT_WORKERS, ServerConfig,
    UpstreamConfig,
};
use ytd::{AppContext, InnertubeClient, resolve_stream, start_server};

#[derive(Parser)]
#[command(
    name = "ytd",
    version,
    about = "Resolve YouTube links to playable stream URLs",
    long_about = "An HTTP service that turns a YouTube URL or video id into a direct stream URL.\n\n\
    Examples:\n\
      ytd serve                                          # Listen on 0.0.0.0:8000\n\
      ytd serve -p 9000 --workers 8                      # Custom port and worker threads\n\
      ytd resolve https://youtu.be/dQw4w9WgXcQ           # Print the stream URL\n\
      ytd resolve dQw4w9WgXcQ --itag 18                  # Prefer a specific format"
)]
struct Cli {
    /// Player API key, appended to upstream requests
    #[arg(long, env = "YTD_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Player API endpoint
    #[arg(long, env = "YTD_ENDPOINT", global = true, default_value = DEFAULT_PLAYER_ENDPOINT)]
    endpoint: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, env = "YTD_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "YTD_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Runtime worker threads
        #[arg(short, long, env = "YTD_WORKERS", default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },

    /// Resolve a single URL or video id and print the stream URL
    Resolve {
        /// YouTube URL or video id
        url: String,

        /// Format id (itag) to prefer
        #[arg(long)]
        itag: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ytd=debug,tower_http=debug".to_string()
        } else {
            "ytd=info,tower_http=info".to_string()
        }
    });
    // stdout is reserved for `resolve` output
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let upstream = UpstreamConfig::new(&cli.endpoint, cli.api_key.clone())?;
    if upstream.api_key.is_none() {
        tracing::warn!("No API key configured, player requests are sent without one");
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            workers,
        } => {
            let config = ServerConfig {
                host,
                port,
                workers,
            };
            config.validate()?;

            let client = InnertubeClient::new(&upstream)?;
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.workers)
                .enable_all()
                .build()?;
            rt.block_on(start_server(&config, AppContext::new(client)))
        }
        Commands::Resolve { url, itag } => {
            let client = InnertubeClient::new(&upstream)?;
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            match rt.block_on(resolve_stream(&client, &url, itag)) {
                Ok(stream_url) => {
                    println!("{}", stream_url);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
