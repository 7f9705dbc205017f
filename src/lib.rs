//! A lean CLI for coordinating GitHub issue cleanup campaigns.
//!
//! The tool keeps one local tracking record per open issue of a repository:
//! who claimed it, when, and whether verification was reported. Claims not
//! reported within the campaign deadline are freed automatically.

pub mod commands;
pub mod config;
pub mod db;
pub mod github;
pub mod models;
