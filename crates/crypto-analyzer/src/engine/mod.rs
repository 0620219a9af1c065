//! Scoring Engine
//!
//! Stages of the recommendation path, leaf-first:
//! aggregate → score (+ additive terms) → select → allocate.

mod aggregator;
mod allocator;
mod scorer;
mod selector;
mod sentiment;

pub use aggregator::aggregate;
pub use allocator::allocate;
pub use scorer::{Scorer, change_score, percentile};
pub use selector::select_top;
pub use sentiment::{ScoringTerm, SentimentBlender, apply_terms};
