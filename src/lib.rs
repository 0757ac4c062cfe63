//! tilework - tree-structured workspace layout engine
//!
//! The workspace is a tree of rows and cells separated by draggable
//! dividers. Cells can be split, merged, closed, resized, shown fullscreen
//! and undocked into a floating panel, following the Elm Architecture:
//! every change is a [`Msg`] run through [`update::update`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod model;
pub mod panel;
pub mod panels;
pub mod preset;
pub mod script;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::{Cmd, LayoutEvent};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use messages::Msg;
pub use model::AppModel;
