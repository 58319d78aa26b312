//! Cross-venue title matching
//!
//! Scores how likely two market titles describe the same event, using
//! word-set overlap scaled by the larger title.

mod title;

pub use title::{normalize_title, similarity, title_tokens, token_similarity, MAX_SIMILARITY};
