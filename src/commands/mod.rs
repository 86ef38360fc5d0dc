//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod completed;
pub mod models;
pub mod split;
pub mod times;

// Re-export main command functions
pub use completed::execute_completed;
pub use models::{
    validate_completed_args, validate_split_args, validate_times_args, CompletedArgs, SplitArgs,
    TimesArgs,
};
pub use split::{execute_split, SplitOutcome};
pub use times::{execute_times, TimesOutcome};
