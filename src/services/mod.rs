//! Aggregation pipeline over guess datasets.
//!
//! Services are pure functions over immutable snapshots. Each request runs
//! the relevant part of the pipeline from the filtered dataset; nothing is
//! updated incrementally.

pub mod filter;
pub mod frequency;
pub mod peaks;
pub mod summary;


pub use filter::filter_dataset;
pub use frequency::aggregate;
pub use peaks::select_peaks;
pub use summary::{count_at, mean_guess, top_guesses, GuessCount};
