//! Remote Module - Inference service communication
//!
//! This module handles:
//! - Reachability probing with a hard timeout
//! - Health, version, train, predict and explain round trips

pub mod client;
pub mod probe;

pub use client::RemoteClient;
pub use probe::{ConnectivityProber, ProbeOutcome};
