//! redis-facade - command line front end for the Redis facade
//!
//! Handy for smoke-testing a server with the same settings a service uses.

use anyhow::Context;
use clap::{Parser, Subcommand};
use redis_facade::utils::logging::{self, LogFormat};
use redis_facade::{RedisSettings, RedisStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "redis-facade", version, about = "Talk to Redis through the facade")]
struct Cli {
    /// YAML settings file; REDIS_* environment variables are used otherwise
    #[arg(short, long, env = "REDIS_FACADE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the key prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Log output format (text or json)
    #[arg(long, env = "REDIS_FACADE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the server answers
    Ping,
    /// Print a string value
    Get { key: String },
    /// Store a string value
    Set {
        key: String,
        value: String,
        /// Expiry in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Delete keys
    Del {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List keys in the namespace matching a glob pattern
    Keys {
        #[arg(default_value = "*")]
        pattern: String,
    },
    /// Publish a message
    Publish { channel: String, message: String },
    /// Print messages until interrupted
    Subscribe {
        #[arg(required = true)]
        channels: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging system
    logging::init(cli.log_format, "warn");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = match &cli.config {
        Some(path) => RedisSettings::from_file(path)
            .await
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RedisSettings::from_env().context("loading settings from environment")?,
    };
    if let Some(prefix) = cli.prefix {
        settings.key_prefix = prefix;
    }

    let store = RedisStore::new(&settings)?;
    info!("Using {}", settings.sanitized_url());

    let result = execute(&store, cli.command).await;
    store.close().await;
    result
}

async fn execute(store: &RedisStore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Ping => {
            println!("{}", store.ping().await?);
        }
        Command::Get { key } => match store.get(&key).await? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Command::Set { key, value, ttl } => {
            store.set(&key, &value, ttl).await?;
            println!("OK");
        }
        Command::Del { keys } => {
            println!("{}", store.delete_many(&keys).await?);
        }
        Command::Keys { pattern } => {
            for key in store.keys(&pattern).await? {
                println!("{}", key);
            }
        }
        Command::Publish { channel, message } => {
            println!("{}", store.publish(&channel, &message).await?);
        }
        Command::Subscribe { channels } => {
            let mut subscription = store.subscribe(&channels).await?;
            loop {
                tokio::select! {
                    message = subscription.next_message() => match message? {
                        Some(message) => println!("{}\t{}", message.channel, message.payload),
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            subscription.unsubscribe_all().await?;
        }
    }
    Ok(())
}
