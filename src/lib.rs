pub mod config;
pub mod engine;
pub mod logging;
pub mod pathway;

pub use config::{EmptyCandidatePolicy, EngineConfig};
pub use engine::PathwayEngine;
pub use pathway::provider::{ChildProvider, DeploymentContext, ProgressStore, ProviderError};
pub use pathway::resolver::{PathwayResolver, ResolveError};
pub use pathway::types::{ElementKind, Pathway, PathwayType, PreloadPolicy, WalkableRef};
