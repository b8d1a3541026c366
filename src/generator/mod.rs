pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod types;

pub use orchestrator::{
    Generator, GeneratorOpts, DEFAULT_BATCH_SIZE, DEFAULT_RETRY_ON_RATE_LIMIT,
    DEFAULT_SLEEP_ON_RATE_LIMIT, DEFAULT_TEMPERATURE,
};
pub use types::{Hints, LlmOutput, Verdict, Vulnerability};
