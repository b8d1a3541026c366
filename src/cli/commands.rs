use clap::{Args, Parser, Subcommand};

use crate::generator;

fn long_version() -> String {
    format!(
        "{} (commit {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_HASH").unwrap_or("dev")
    )
}

#[derive(Parser)]
#[command(
    name = "vextriage",
    version,
    long_version = long_version(),
    about = "Silence negligible CVE alerts by generating VEX with an LLM"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate VEX from a scan report using an LLM
    Generate(GenerateArgs),
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Input scan report (Trivy JSON)
    pub input: String,

    /// Output file
    pub output: String,

    /// LLM backend: auto, openai, anthropic, ollama
    #[arg(long, default_value = "auto")]
    pub llm: String,

    /// LLM model identifier
    #[arg(long)]
    pub llm_model: Option<String>,

    /// LLM endpoint override (ollama)
    #[arg(long)]
    pub llm_base_url: Option<String>,

    /// Temperature
    #[arg(long, default_value_t = generator::DEFAULT_TEMPERATURE)]
    pub llm_temperature: f64,

    /// Number of vulnerabilities to be processed in a single LLM API call
    #[arg(long, default_value_t = generator::DEFAULT_BATCH_SIZE)]
    pub llm_batch_size: usize,

    /// Deterministic sampling seed (0 = backend default)
    #[arg(long, default_value_t = 0)]
    pub llm_seed: i64,

    /// Input format: auto, trivy
    #[arg(long, default_value = "auto")]
    pub input_format: String,

    /// Output format: auto, openvex, trivyignore
    #[arg(long, default_value = "auto")]
    pub output_format: String,

    /// Hint, as an arbitrary text (repeatable)
    #[arg(long = "hint")]
    pub hints: Vec<String>,

    /// Hint: the artifact is a container image (auto-set for Trivy
    /// container_image reports)
    #[arg(long)]
    pub hint_container: bool,

    /// Hint: not a server program
    #[arg(long)]
    pub hint_not_server: bool,

    /// Hint: comma-separated list of used shell commands
    #[arg(long, value_delimiter = ',')]
    pub hint_used_commands: Vec<String>,

    /// Hint: comma-separated list of unused shell commands
    #[arg(long, value_delimiter = ',')]
    pub hint_unused_commands: Vec<String>,

    /// Hint: focus on Confidentiality and Integrity rather than on
    /// Availability
    #[arg(long)]
    pub hint_compromise_on_availability: bool,

    /// Directory to dump debug info (prompts)
    #[arg(long)]
    pub debug_dir: Option<String>,
}
