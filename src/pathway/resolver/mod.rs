//! One resolver per traversal policy, behind a closed sum type.

pub mod bkt;
pub mod free;
pub mod graph;
pub mod linear;
pub mod random;

pub use bkt::BktResolver;
pub use free::FreeResolver;
pub use graph::GraphResolver;
pub use linear::LinearResolver;
pub use random::RandomResolver;

use rand::Rng;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::pathway::bkt::BktError;
use crate::pathway::config::ConfigError;
use crate::pathway::provider::{ChildProvider, ProgressStore, ProviderError};
use crate::pathway::types::{Pathway, PathwayType, UnsupportedPathwayType, WalkableRef};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedPathwayType),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mastery(#[from] BktError),
    #[error("progress store: {0}")]
    Store(#[source] ProviderError),
    #[error("child provider: {0}")]
    Children(#[source] ProviderError),
    #[error("pathway {pathway_id} holds {found} progress where {expected} was expected")]
    ProgressKindMismatch {
        pathway_id: Uuid,
        expected: &'static str,
        found: &'static str,
    },
    #[error("pathway {pathway_id} has no candidate walkable before its exit condition")]
    NoCandidateWalkable { pathway_id: Uuid },
}

/// Resolver for a declared pathway type. Construction is pure
/// parameterization; no I/O happens until [`PathwayResolver::resolve`].
#[derive(Debug, Clone)]
pub enum PathwayResolver {
    Linear(LinearResolver),
    Free(FreeResolver),
    Graph(GraphResolver),
    Random(RandomResolver),
    Bkt(BktResolver),
}

impl PathwayResolver {
    pub fn build(pathway: &Pathway, config: &EngineConfig) -> Self {
        match pathway.pathway_type {
            PathwayType::Linear => Self::Linear(LinearResolver::new(pathway)),
            PathwayType::Free => Self::Free(FreeResolver::new(pathway)),
            PathwayType::Graph => Self::Graph(GraphResolver::new(pathway)),
            PathwayType::Random => {
                Self::Random(RandomResolver::new(pathway, config.empty_candidate))
            }
            PathwayType::Bkt => Self::Bkt(BktResolver::new(pathway, config.empty_candidate)),
        }
    }

    pub fn policy(&self) -> PathwayType {
        match self {
            Self::Linear(_) => PathwayType::Linear,
            Self::Free(_) => PathwayType::Free,
            Self::Graph(_) => PathwayType::Graph,
            Self::Random(_) => PathwayType::Random,
            Self::Bkt(_) => PathwayType::Bkt,
        }
    }

    /// Decide which walkable(s) the learner should see next. Performs at
    /// most one progress lookup and one child-list lookup, then pure logic.
    pub async fn resolve<S, C, R>(
        &self,
        store: &S,
        provider: &C,
        learner_id: &str,
        rng: &mut R,
    ) -> Result<Vec<WalkableRef>, ResolveError>
    where
        S: ProgressStore,
        C: ChildProvider,
        R: Rng + ?Sized,
    {
        match self {
            Self::Linear(resolver) => resolver.resolve(store, provider, learner_id).await,
            Self::Free(resolver) => resolver.resolve(provider).await,
            Self::Graph(resolver) => resolver.resolve(store, provider, learner_id).await,
            Self::Random(resolver) => resolver.resolve(store, provider, learner_id, rng).await,
            Self::Bkt(resolver) => resolver.resolve(store, provider, learner_id, rng).await,
        }
    }
}
