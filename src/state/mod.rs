//! State management module
//!
//! This module handles all application state, including:
//! - The open folder and its scanned models (library.rs)
//! - Shared data structures (data.rs)
//! - The remembered last folder (config.rs)

pub mod config;
pub mod data;
pub mod library;
