//! Logic Module - Inference core
//!
//! - `remote/` - Connectivity probe and HTTP client for the inference service
//! - `model/` - Local scorer, coefficient table, shared types
//! - `explain/` - Local feature-importance ranking
//! - `mode` - REMOTE/LOCAL selection
//! - `orchestrator` - Per-operation dispatch

pub mod explain;
pub mod latency;
pub mod mode;
pub mod model;
pub mod orchestrator;
pub mod remote;
