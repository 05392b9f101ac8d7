//! Application services: the post pipeline and the services built on it.

pub mod blog;
pub mod chrome;
pub mod contributions;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod render;
pub mod sources;
