pub mod anthropic;
pub mod observer;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod ratelimit;
pub mod router;
pub mod types;

pub use observer::{ChunkObserver, NullObserver, StderrObserver};
pub use provider::LlmProvider;
pub use ratelimit::is_rate_limit;
pub use router::create_provider;
pub use types::GenerateOptions;
