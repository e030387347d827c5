//! Views for the main window
//!
//! - model_list.rs: the scrollable list of model names
//! - detail.rs: preview, name and trigger words of the selected model

pub mod detail;
pub mod model_list;
