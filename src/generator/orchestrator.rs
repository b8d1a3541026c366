use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::parser;
use super::prompt;
use super::retry::retry_on_rate_limit;
use super::types::{Hints, Vulnerability};
use crate::errors::VexError;
use crate::llm::{ChunkObserver, GenerateOptions, LlmProvider, StderrObserver};
use crate::vex;

pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_SLEEP_ON_RATE_LIMIT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRY_ON_RATE_LIMIT: u32 = 10;

pub struct GeneratorOpts {
    pub llm: Option<Arc<dyn LlmProvider>>,
    pub temperature: f64,
    /// Decrease to avoid rate limit. Zero resolves to the default.
    pub batch_size: usize,
    pub seed: i64,
    pub sleep_on_rate_limit: Duration,
    pub retry_on_rate_limit: u32,
    pub hints: Hints,
    /// When set, the exact prompts are persisted here before each model call.
    pub debug_dir: Option<PathBuf>,
    /// Receives raw output chunks as they arrive. Defaults to stderr.
    pub observer: Option<Arc<dyn ChunkObserver>>,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            llm: None,
            temperature: DEFAULT_TEMPERATURE,
            batch_size: 0,
            seed: 0,
            sleep_on_rate_limit: Duration::ZERO,
            retry_on_rate_limit: 0,
            hints: Hints::default(),
            debug_dir: None,
            observer: None,
        }
    }
}

pub struct Generator {
    llm: Arc<dyn LlmProvider>,
    temperature: f64,
    batch_size: usize,
    seed: i64,
    sleep_on_rate_limit: Duration,
    retry_on_rate_limit: u32,
    hints: Hints,
    debug_dir: Option<PathBuf>,
    observer: Arc<dyn ChunkObserver>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("llm", &self.llm)
            .field("temperature", &self.temperature)
            .field("batch_size", &self.batch_size)
            .field("seed", &self.seed)
            .field("sleep_on_rate_limit", &self.sleep_on_rate_limit)
            .field("retry_on_rate_limit", &self.retry_on_rate_limit)
            .field("debug_dir", &self.debug_dir)
            .finish_non_exhaustive()
    }
}

impl Generator {
    pub fn new(opts: GeneratorOpts) -> Result<Self, VexError> {
        let llm = opts.llm.ok_or_else(|| VexError::Config("no model".into()))?;
        let debug_dir = match opts.debug_dir {
            Some(dir) => match std::fs::create_dir_all(&dir) {
                Ok(()) => Some(dir),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Failed to create the debug dir");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            llm,
            temperature: opts.temperature,
            batch_size: if opts.batch_size == 0 {
                DEFAULT_BATCH_SIZE
            } else {
                opts.batch_size
            },
            seed: opts.seed,
            sleep_on_rate_limit: if opts.sleep_on_rate_limit.is_zero() {
                DEFAULT_SLEEP_ON_RATE_LIMIT
            } else {
                opts.sleep_on_rate_limit
            },
            retry_on_rate_limit: if opts.retry_on_rate_limit == 0 {
                DEFAULT_RETRY_ON_RATE_LIMIT
            } else {
                opts.retry_on_rate_limit
            },
            hints: opts.hints,
            debug_dir,
            observer: opts.observer.unwrap_or_else(|| Arc::new(StderrObserver)),
        })
    }

    /// Walks the vulnerability list in contiguous batches, strictly
    /// sequentially, invoking `handler` once per completed batch.
    ///
    /// Rate-limit-shaped failures retry the same batch with a fixed-interval
    /// sleep; any other failure aborts the remaining batches. Statements
    /// already handed to `handler` are not rolled back.
    pub async fn generate_statements<F>(
        &self,
        vulns: &[Vulnerability],
        mut handler: F,
    ) -> Result<(), VexError>
    where
        F: FnMut(Vec<vex::Statement>) -> Result<(), VexError>,
    {
        for batch in vulns.chunks(self.batch_size) {
            let stmts = retry_on_rate_limit(
                self.sleep_on_rate_limit,
                self.retry_on_rate_limit,
                || self.generate_batch(batch),
            )
            .await?;
            handler(stmts)?;
        }
        Ok(())
    }

    async fn generate_batch(
        &self,
        batch: &[Vulnerability],
    ) -> Result<Vec<vex::Statement>, VexError> {
        let system = prompt::build_system_prompt(&self.hints);
        let human = prompt::build_human_prompt(batch)?;
        self.dump_prompts(&system, &human);

        let opts = GenerateOptions {
            temperature: self.temperature,
            seed: self.seed,
            json_schema: Some(prompt::output_schema()),
        };
        debug!(
            provider = self.llm.provider_name(),
            model = self.llm.model_name(),
            batch_len = batch.len(),
            "Generating verdicts"
        );
        let raw = self
            .llm
            .generate(&system, &human, &opts, self.observer.as_ref())
            .await?;

        let verdicts = parser::parse_verdicts(&raw)?;
        let map: HashMap<String, Vulnerability> = batch
            .iter()
            .map(|v| (v.vuln_id.clone(), v.clone()))
            .collect();
        parser::verdicts_to_statements(&verdicts, &map)
    }

    // Best effort; failure to persist must never fail the run.
    fn dump_prompts(&self, system: &str, human: &str) {
        let Some(dir) = &self.debug_dir else {
            return;
        };
        if let Err(e) = std::fs::write(dir.join("system.prompt"), system) {
            warn!(error = %e, "Failed to write system.prompt");
        }
        if let Err(e) = std::fs::write(dir.join("human.prompt"), human) {
            warn!(error = %e, "Failed to write human.prompt");
        }
    }
}
