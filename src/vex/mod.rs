pub mod types;

pub use types::{Document, Justification, Product, Statement, Status, Vulnerability};
