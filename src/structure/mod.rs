//! Predicted structure files: completion checks and chain splitting.

pub mod split;
pub mod tail;

pub use split::{split_chains, split_chains_text, ChainSplit};
pub use tail::{is_interaction_complete, is_model_complete, read_last_line, replicate_model_path};
