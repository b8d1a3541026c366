pub mod types;

pub use types::VexError;
