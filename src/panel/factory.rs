//! Panel factory - resolves panel types to content modules and installs them
//!
//! Modules are registered under a search location (category) and a name.
//! Lookups try the same locations the host has always searched, in order,
//! so `Welcome` finds `InfoPanels/Welcome` when no root-level module exists.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::content::{CleanupHook, ContentNode, ContentRoot};
use crate::panels::placeholder;

// ============================================================================
// Arguments
// ============================================================================

/// Initialization arguments handed to a module's setup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelArgs(Map<String, Value>);

impl PanelArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Overlay `other` on top of these arguments
    pub fn merged(mut self, other: &PanelArgs) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

/// A module's setup reported failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    pub message: String,
}

impl PanelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "setup failed: {}", self.message)
    }
}

impl std::error::Error for PanelError {}

/// Loading a module failed before setup could run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No module registered at any search location
    NotFound,
    /// The loader itself failed
    Failed(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no panel module found"),
            Self::Failed(msg) => write!(f, "module load failed: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

// ============================================================================
// Module contract
// ============================================================================

/// Capability every content module implements
pub trait PanelModule {
    /// Install content into `container`, optionally returning a cleanup hook
    fn setup(
        &self,
        container: &mut ContentRoot,
        args: &PanelArgs,
    ) -> Result<Option<CleanupHook>, PanelError>;
}

impl<F> PanelModule for F
where
    F: Fn(&mut ContentRoot, &PanelArgs) -> Result<Option<CleanupHook>, PanelError>,
{
    fn setup(
        &self,
        container: &mut ContentRoot,
        args: &PanelArgs,
    ) -> Result<Option<CleanupHook>, PanelError> {
        self(container, args)
    }
}

/// What a loader produced
pub enum ModuleShape {
    /// A module with a setup entry point
    Setup(Box<dyn PanelModule>),
    /// A module that exists but exposes no setup entry point
    Inert,
}

/// Produces a module on demand
pub type ModuleLoader = Box<dyn Fn() -> Result<ModuleShape, LoadError>>;

// ============================================================================
// Search locations
// ============================================================================

/// Conventional location a panel module may live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelCategory {
    Root,
    EditorPanels,
    InfoPanels,
    ViewPanels,
    Panels,
}

impl PanelCategory {
    /// Search order used when a panel type carries no category prefix
    pub const SEARCH_ORDER: [PanelCategory; 5] = [
        PanelCategory::Root,
        PanelCategory::EditorPanels,
        PanelCategory::InfoPanels,
        PanelCategory::ViewPanels,
        PanelCategory::Panels,
    ];

    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            PanelCategory::Root => None,
            PanelCategory::EditorPanels => Some("EditorPanels"),
            PanelCategory::InfoPanels => Some("InfoPanels"),
            PanelCategory::ViewPanels => Some("ViewPanels"),
            PanelCategory::Panels => Some("panels"),
        }
    }

    fn from_prefix(prefix: &str) -> Option<PanelCategory> {
        Self::SEARCH_ORDER
            .into_iter()
            .find(|c| c.prefix() == Some(prefix))
    }
}

/// Registry key: category plus module name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelPath {
    pub category: PanelCategory,
    pub name: String,
}

impl PanelPath {
    /// Parse `Name` or `Category/Name`
    pub fn parse(panel_type: &str) -> PanelPath {
        if let Some((prefix, name)) = panel_type.split_once('/') {
            if let Some(category) = PanelCategory::from_prefix(prefix) {
                return PanelPath {
                    category,
                    name: name.to_string(),
                };
            }
        }
        PanelPath {
            category: PanelCategory::Root,
            name: panel_type.to_string(),
        }
    }

    /// Locations to try for a panel type, in order
    pub fn candidates(panel_type: &str) -> Vec<PanelPath> {
        let explicit = panel_type
            .split_once('/')
            .is_some_and(|(prefix, _)| PanelCategory::from_prefix(prefix).is_some());
        if explicit {
            return vec![PanelPath::parse(panel_type)];
        }
        PanelCategory::SEARCH_ORDER
            .into_iter()
            .map(|category| PanelPath {
                category,
                name: panel_type.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for PanelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category.prefix() {
            Some(prefix) => write!(f, "{}/{}", prefix, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Where the content for an instantiation comes from
#[derive(Debug, Clone)]
pub enum PanelSource<'a> {
    /// Already-materialized content, installed as-is
    Materialized(ContentNode),
    /// A panel type resolved through the registry
    Named(&'a str),
}

/// How an instantiation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A module was found and its setup succeeded
    Loaded { path: String },
    /// Direct content was installed
    Materialized,
    /// A placeholder was rendered instead
    Placeholder { reason: String },
}

/// Result of `PanelFactory::instantiate`
#[derive(Debug)]
pub struct ContentHandle {
    pub cleanup: Option<CleanupHook>,
    pub outcome: LoadOutcome,
}

impl ContentHandle {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Placeholder { .. })
    }
}

/// Registry of content module loaders
#[derive(Default)]
pub struct PanelFactory {
    loaders: HashMap<PanelPath, ModuleLoader>,
}

impl fmt::Debug for PanelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<String> = self.loaders.keys().map(|p| p.to_string()).collect();
        paths.sort();
        f.debug_struct("PanelFactory").field("modules", &paths).finish()
    }
}

impl PanelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw loader at `Name` or `Category/Name`
    pub fn register_loader(&mut self, panel_type: &str, loader: ModuleLoader) {
        let path = PanelPath::parse(panel_type);
        tracing::debug!("Registered panel module {}", path);
        self.loaders.insert(path, loader);
    }

    /// Register a module that is cloned for every instantiation
    pub fn register_module<M>(&mut self, panel_type: &str, module: M)
    where
        M: PanelModule + Clone + 'static,
    {
        self.register_loader(
            panel_type,
            Box::new(move || Ok(ModuleShape::Setup(Box::new(module.clone())))),
        );
    }

    /// Register a setup closure as a module
    pub fn register_fn<F>(&mut self, panel_type: &str, setup: F)
    where
        F: Fn(&mut ContentRoot, &PanelArgs) -> Result<Option<CleanupHook>, PanelError>
            + Clone
            + 'static,
    {
        self.register_module(panel_type, setup);
    }

    /// Register a module that exists but has no setup entry point
    pub fn register_inert(&mut self, panel_type: &str) {
        self.register_loader(panel_type, Box::new(|| Ok(ModuleShape::Inert)));
    }

    pub fn is_registered(&self, panel_type: &str) -> bool {
        self.resolve(panel_type).is_some()
    }

    fn resolve(&self, panel_type: &str) -> Option<(PanelPath, &ModuleLoader)> {
        PanelPath::candidates(panel_type)
            .into_iter()
            .find_map(|path| self.loaders.get(&path).map(|loader| (path, loader)))
    }

    /// Install a panel's content into `container`.
    ///
    /// The container is always cleared first. Failures never escape: any
    /// missing module, inert module, loader error or setup error renders a
    /// placeholder naming the panel type and the reason.
    pub fn instantiate(
        &self,
        source: PanelSource<'_>,
        args: &PanelArgs,
        container: &mut ContentRoot,
    ) -> ContentHandle {
        container.clear();

        let panel_type = match source {
            PanelSource::Materialized(node) => {
                container.push(node);
                return ContentHandle {
                    cleanup: None,
                    outcome: LoadOutcome::Materialized,
                };
            }
            PanelSource::Named(panel_type) => panel_type,
        };

        let Some((path, loader)) = self.resolve(panel_type) else {
            tracing::warn!("No panel module found for {}", panel_type);
            return fallback(container, panel_type, &LoadError::NotFound.to_string());
        };

        let module = match loader() {
            Ok(ModuleShape::Setup(module)) => module,
            Ok(ModuleShape::Inert) => {
                tracing::warn!("Panel module {} has no setup entry point", path);
                return fallback(container, panel_type, "no setup entry point");
            }
            Err(e) => {
                tracing::warn!("Failed to load panel module {}: {}", path, e);
                return fallback(container, panel_type, &e.to_string());
            }
        };

        match module.setup(container, args) {
            Ok(cleanup) => {
                tracing::debug!("Loaded panel {} from {}", panel_type, path);
                ContentHandle {
                    cleanup,
                    outcome: LoadOutcome::Loaded {
                        path: path.to_string(),
                    },
                }
            }
            Err(e) => {
                tracing::warn!("Panel {} setup failed: {}", panel_type, e);
                fallback(container, panel_type, &e.to_string())
            }
        }
    }
}

fn fallback(container: &mut ContentRoot, panel_type: &str, reason: &str) -> ContentHandle {
    // A failed setup may have left partial content behind
    container.clear();
    placeholder::render(container, panel_type, reason);
    ContentHandle {
        cleanup: None,
        outcome: LoadOutcome::Placeholder {
            reason: reason.to_string(),
        },
    }
}
