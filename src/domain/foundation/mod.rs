//! Foundation value objects shared across the domain.

mod errors;
mod percentage;

pub use errors::ValidationError;
pub use percentage::Percentage;
