mod demos;
mod providers;
mod secrets;

use clap::{Parser, Subcommand};
use genai_core::logging::LoggingConfig;

use demos::ModelArgs;

#[derive(Parser, Debug)]
#[command(name = "genai", version, about = "Core generative AI techniques, one demo per subcommand")]
struct Cli {
    /// Log level for the demo crates (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Text completion: sentiment of four product reviews on GitHub Models
    Completion(ModelArgs),
    /// Interactive streaming chat with a .NET programming assistant
    Chat(ModelArgs),
    /// Interactive tool calling (weather, date and time, sums)
    Functions(ModelArgs),
    /// Keyword retrieval-augmented movie recommendations
    Rag(ModelArgs),
    /// Product analysis, recipe and meeting summary as JSON
    Structured(ModelArgs),
    /// Describe a sample image, then the first image found locally
    Vision(demos::vision::VisionArgs),
    /// Sentiment analysis on a local Ollama model
    Local(ModelArgs),
    /// Generate an image with Azure OpenAI and save it
    Image(demos::image::ImageArgs),
    /// Streaming chat on GitHub Models with a friendly assistant
    KernelChat(ModelArgs),
    /// Scripted questions answered with Azure OpenAI function calling
    AzureFunctions(ModelArgs),
    /// Semantic movie search over Ollama embeddings
    VectorRag(ModelArgs),
    /// Manage the user secrets file
    #[command(subcommand)]
    Secrets(secrets::SecretsCommand),
    /// List the supported providers and their configuration
    Providers(providers::ProvidersArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(level) = &cli.log_level {
        logging = logging.level(level.as_str());
    }
    if let Err(e) = logging.init() {
        eprintln!("\x1b[2mlogging disabled: {}\x1b[0m", e);
    }

    tracing::debug!(target: "genai::config", command = ?cli.command, "starting");

    match cli.command {
        Commands::Completion(args) => demos::completion::run(args).await,
        Commands::Chat(args) => demos::chat::run(args).await,
        Commands::Functions(args) => demos::functions::run(args).await,
        Commands::Rag(args) => demos::rag::run(args).await,
        Commands::Structured(args) => demos::structured::run(args).await,
        Commands::Vision(args) => demos::vision::run(args).await,
        Commands::Local(args) => demos::local::run(args).await,
        Commands::Image(args) => demos::image::run(args).await,
        Commands::KernelChat(args) => demos::kernel_chat::run(args).await,
        Commands::AzureFunctions(args) => demos::azure_functions::run(args).await,
        Commands::VectorRag(args) => demos::vector_rag::run(args).await,
        Commands::Secrets(command) => secrets::run(command),
        Commands::Providers(args) => providers::run(args).await,
    }
}
