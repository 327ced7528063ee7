//! Translation Worker CLI
//!
//! Runs the Kafka translation worker, or translates a single text for
//! checking the model endpoint without a broker.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use translation_worker::broker::OffsetReset;
use translation_worker::worker::{setup_signal_handler, Iteration};
use translation_worker::{build_worker, translate_once, HttpTransformer, ServiceConfig};

#[derive(Parser)]
#[command(name = "translation-worker")]
#[command(about = "Translate requests from a Kafka topic and publish the results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as worker, consuming the request topic until stopped
    Worker {
        /// Kafka bootstrap servers (overrides KAFKA_BROKER)
        #[arg(short, long)]
        broker: Option<String>,

        /// Consumer group (overrides KAFKA_GROUP_ID)
        #[arg(short, long)]
        group_id: Option<String>,

        /// Where to start without committed offsets: earliest or latest
        #[arg(long)]
        offset_reset: Option<OffsetReset>,

        /// Request topic (overrides REQUEST_TOPIC)
        #[arg(long)]
        request_topic: Option<String>,

        /// Response topic (overrides RESPONSE_TOPIC)
        #[arg(long)]
        response_topic: Option<String>,

        /// Handle a single poll and exit (for testing)
        #[arg(long)]
        once: bool,
    },

    /// Translate one text through the model endpoint and print the response
    Translate {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// Request id to echo back
        #[arg(long)]
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = ServiceConfig::from_env()?;

    match cli.command {
        Commands::Worker {
            broker,
            group_id,
            offset_reset,
            request_topic,
            response_topic,
            once,
        } => {
            if let Some(broker) = broker {
                config.broker.broker_address = broker;
            }
            if let Some(group_id) = group_id {
                config.broker.group_id = group_id;
            }
            if let Some(offset_reset) = offset_reset {
                config.broker.offset_reset = offset_reset;
            }
            if let Some(topic) = request_topic {
                config.broker.request_topic = topic;
            }
            if let Some(topic) = response_topic {
                config.broker.response_topic = topic.clone();
                config.worker.response_topic = topic;
            }

            info!("Initializing worker...");
            let runner = build_worker(&config)?;

            if once {
                match runner.run_once().await? {
                    Iteration::Idle => println!("No message received"),
                    Iteration::Completed => println!("Message processed successfully"),
                    Iteration::Discarded(kind) => println!("Message discarded ({})", kind),
                }
            } else {
                // Setup graceful shutdown
                let shutdown = runner.shutdown_handle();
                setup_signal_handler(shutdown);

                runner.run().await?;
            }
        }

        Commands::Translate { text, id } => {
            let transformer = HttpTransformer::new(config.transformer)?;
            let id = id.map(serde_json::Value::String).unwrap_or_default();

            let response = translate_once(&transformer, id, &text).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
