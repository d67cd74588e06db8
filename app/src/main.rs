#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy, SearchInput,
    SearchStrategy, ServeInput, ServeStrategy, VersionStrategy,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "scout conversational search assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send a single chat turn
    Chat {
        /// The message to send
        #[arg(short = 'm', long)]
        message: String,

        /// Conversation to continue (new one if omitted)
        #[arg(short = 't', long)]
        thread: Option<String>,

        /// Agent specialization: general, sports, or finance
        #[arg(short = 'a', long, default_value = "general")]
        agent: String,
    },
    /// Run a direct web search
    Search {
        /// Search query
        #[arg(short, long)]
        query: String,

        /// Number of results
        #[arg(short = 'n', long, default_value_t = 5)]
        num_results: usize,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            ServeStrategy.execute(ServeInput { host, port }).await
        }
        Commands::Chat {
            message,
            thread,
            agent,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    message,
                    thread,
                    agent,
                })
                .await
        }
        Commands::Search { query, num_results } => {
            SearchStrategy
                .execute(SearchInput { query, num_results })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
