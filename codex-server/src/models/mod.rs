//! Request-side models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod limit;
pub mod search;
pub mod validation;

pub use limit::SearchLimit;
pub use search::{build_tsquery, SearchParams};
pub use validation::ValidationError;
