//! Core data types for the guess pipeline.

pub mod criteria;
pub mod dataset;
pub mod frequency;
pub mod mode;
pub mod peak;
pub mod record;

pub use criteria::*;
pub use dataset::*;
pub use frequency::*;
pub use mode::*;
pub use peak::*;
pub use record::*;
