//! Infrastructure adapters and runtime bootstrap.

pub mod content;
pub mod error;
pub mod export;
pub mod github;
pub mod http;
pub mod remote;
pub mod resume;
pub mod telemetry;
