use uuid::Uuid;

use super::ResolveError;
use crate::pathway::provider::{ChildProvider, DeploymentContext};
use crate::pathway::types::{Pathway, WalkableRef};

/// Free traversal: every child is always relevant. No progress lookup.
#[derive(Debug, Clone)]
pub struct FreeResolver {
    pathway_id: Uuid,
    ctx: DeploymentContext,
}

impl FreeResolver {
    pub fn new(pathway: &Pathway) -> Self {
        Self {
            pathway_id: pathway.id,
            ctx: DeploymentContext::from(pathway),
        }
    }

    pub async fn resolve<C>(&self, provider: &C) -> Result<Vec<WalkableRef>, ResolveError>
    where
        C: ChildProvider,
    {
        provider
            .children(self.pathway_id, &self.ctx)
            .await
            .map_err(ResolveError::Children)
    }
}
