//! HTTP server module for the guess-tracker backend.
//!
//! This module provides an axum-based HTTP server that exposes the analytics
//! pipeline as a REST API. It reuses the feed cache, the aggregation
//! services, and the chart renderers from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing and validation                           │
//! │  - JSON serialization / image responses                   │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/, render/)                       │
//! │  - Window filtering and aggregation                       │
//! │  - Peak selection, summaries, chart rendering             │
//! └───────────────────┬──────────────────────────────────────┘
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Feed Layer (feed/)                                       │
//! │  - Remote JSON store fetch and normalization              │
//! │  - TTL snapshot cache                                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
