//! Panel system - content, identity and the panel factory
//!
//! Cells never know what they display. A panel is materialized into a cell's
//! content root by the [`PanelFactory`], which resolves a panel type to a
//! registered content module and runs its setup.
//!
//! ## Architecture
//!
//! - `ContentRoot` / `ContentNode`: the owned content subtree of a container
//! - `PanelIdentity`: which panel a cell shows (id + panel class)
//! - `CleanupHook`: callback a module registers to release its resources
//! - `PanelBinding`: identity and cleanup, always moved together
//! - `PanelFactory`: registry of module loaders with placeholder fallback
//!
//! Concrete modules shipped with the crate live in `crate::panels`.

mod content;
mod factory;

pub use content::{CleanupHook, ContentNode, ContentRoot, PanelBinding, PanelIdentity};
pub use factory::{
    ContentHandle, LoadError, LoadOutcome, ModuleLoader, ModuleShape, PanelArgs, PanelCategory,
    PanelError, PanelFactory, PanelModule, PanelPath, PanelSource,
};
