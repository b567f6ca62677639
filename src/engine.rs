//! The exposed Resolution API.
//!
//! The engine is stateless between calls: all learner state lives in the
//! externally-owned progress records, so any number of resolutions may run
//! concurrently for any (pathway, learner) pairs. Two concurrent resolutions
//! for the same pair can each read the same latest record and pick different
//! walkables; that race is tolerated (at-least-one-of semantics) — callers
//! needing exactly-once selection serialize outside this engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::pathway::provider::{ChildProvider, ProgressStore};
use crate::pathway::resolver::{PathwayResolver, ResolveError};
use crate::pathway::types::{Pathway, WalkableRef};

pub struct PathwayEngine<S, C> {
    store: S,
    children: C,
    config: EngineConfig,
}

impl<S, C> PathwayEngine<S, C>
where
    S: ProgressStore,
    C: ChildProvider,
{
    pub fn new(store: S, children: C) -> Self {
        Self::with_config(store, children, EngineConfig::default())
    }

    pub fn with_config(store: S, children: C, config: EngineConfig) -> Self {
        Self {
            store,
            children,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve with a fresh OS-seeded RNG.
    pub async fn resolve(
        &self,
        pathway: &Pathway,
        learner_id: &str,
    ) -> Result<Vec<WalkableRef>, ResolveError> {
        let mut rng = StdRng::from_os_rng();
        self.resolve_with_rng(pathway, learner_id, &mut rng).await
    }

    /// Resolve with a caller-supplied randomness source, so selections can
    /// be controlled and replayed.
    pub async fn resolve_with_rng<R>(
        &self,
        pathway: &Pathway,
        learner_id: &str,
        rng: &mut R,
    ) -> Result<Vec<WalkableRef>, ResolveError>
    where
        R: Rng + ?Sized,
    {
        let resolver = PathwayResolver::build(pathway, &self.config);
        tracing::debug!(
            pathway_id = %pathway.id,
            learner_id = %learner_id,
            policy = resolver.policy().as_str(),
            "resolving pathway"
        );

        let walkables = resolver
            .resolve(&self.store, &self.children, learner_id, rng)
            .await?;

        tracing::debug!(
            pathway_id = %pathway.id,
            learner_id = %learner_id,
            count = walkables.len(),
            "pathway resolved"
        );
        Ok(walkables)
    }
}
