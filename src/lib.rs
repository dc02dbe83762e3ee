//! # Guess Tracker Backend
//!
//! Analytics backend for the guess-tracking dashboard.
//!
//! This crate fetches a flat log of numeric guesses (each tagged with a
//! solo/social mode and a timestamp) from a remote read-only JSON store,
//! filters and aggregates them, and serves chart-ready frequency series,
//! peak annotations, and summary statistics over a REST API. Charts can also
//! be rendered server-side to SVG or PNG.
//!
//! ## Architecture
//!
//! - [`models`]: Core data types (records, datasets, filter criteria, the
//!   dense frequency table)
//! - [`feed`]: Data loading from the remote store, normalization, and the
//!   process-wide TTL snapshot cache
//! - [`services`]: Pure aggregation pipeline (filter, frequency counts,
//!   peak selection, summaries)
//! - [`render`]: Chart model and the pluggable SVG/PNG renderers
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Each request recomputes from the cached immutable snapshot; there is no
//! incremental update path.

pub mod feed;
pub mod models;
pub mod render;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
