pub mod bkt;
pub mod config;
pub mod progress;
pub mod provider;
pub mod resolver;
pub mod types;

pub use progress::{PathwayProgress, PathwayStatus};
pub use resolver::{PathwayResolver, ResolveError};
pub use types::{Pathway, PathwayType, PreloadPolicy, WalkableRef};
