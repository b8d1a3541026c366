use crate::errors::VexError;

/// Heuristic rate-limit detection.
///
/// Backends that reach our own HTTP clients surface `VexError::RateLimit`
/// directly. For errors that only carry provider text, fall back to substring
/// matching, e.g. OpenAI (2024-07-11):
/// "API returned unexpected status code: 429: Rate limit reached for
/// gpt-3.5-turbo in organization org-XXXXXXXX on tokens per min (TPM): ..."
///
/// This is brittle by design; replace per-backend with structured error
/// inspection without touching the orchestrator.
pub fn is_rate_limit(err: &VexError) -> bool {
    match err {
        VexError::RateLimit(_) => true,
        other => other.to_string().contains("status code: 429"),
    }
}
