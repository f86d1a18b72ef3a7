//! Utility module

mod error;
mod span;

pub use error::{Error, Result};
pub use span::Span;
