// Handler modules
pub mod validate;

// Re-export all handler functions
pub use validate::{build_options, handle_validate};
