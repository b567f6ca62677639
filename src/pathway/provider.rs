//! Trait seams for the two external collaborators resolution consumes: the
//! progress store and the pathway child provider. Both lookups may suspend
//! (network/storage); everything after them is synchronous compute.

use uuid::Uuid;

use super::progress::PathwayProgress;
use super::types::{Pathway, WalkableRef};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque collaborator failure. Backends adapt their own error types through
/// `From`/`new`; the core never names them.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ProviderError(#[from] BoxedError);

impl ProviderError {
    pub fn new(err: impl Into<BoxedError>) -> Self {
        Self(err.into())
    }
}

/// Versioning scope a child lookup resolves against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeploymentContext {
    pub deployment_id: Option<Uuid>,
    pub change_id: Option<Uuid>,
}

impl From<&Pathway> for DeploymentContext {
    fn from(pathway: &Pathway) -> Self {
        Self {
            deployment_id: pathway.deployment_id,
            change_id: pathway.change_id,
        }
    }
}

/// Latest progress per (pathway, learner). `None` means the learner has not
/// started yet; resolvers treat that as the initial state, not an error.
#[allow(async_fn_in_trait)]
pub trait ProgressStore {
    async fn latest(
        &self,
        pathway_id: Uuid,
        learner_id: &str,
    ) -> Result<Option<PathwayProgress>, ProviderError>;
}

/// Current child list of a pathway: ordered for Linear, a deterministic set
/// for the other policies.
#[allow(async_fn_in_trait)]
pub trait ChildProvider {
    async fn children(
        &self,
        pathway_id: Uuid,
        ctx: &DeploymentContext,
    ) -> Result<Vec<WalkableRef>, ProviderError>;
}
