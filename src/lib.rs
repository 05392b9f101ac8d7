//! folio: a personal blog that merges locally authored markdown posts with
//! externally published articles into one categorized, date-ordered listing.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
