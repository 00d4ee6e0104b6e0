//! School analytics engine: letter grading, score and attendance
//! aggregation, fee collection statistics and trend ordering over
//! caller-supplied record collections.
//!
//! The engine is pure and stateless -- no I/O, no caching, no global state --
//! so every function is safe to call concurrently. The `shuled` binary wraps
//! it in a line-oriented JSON sidecar protocol for the desktop shell; library
//! consumers can call the modules directly.

pub mod attendance;
pub mod error;
pub mod export;
pub mod fees;
pub mod grade;
pub mod ipc;
pub mod models;
pub mod stats;
pub mod trend;
