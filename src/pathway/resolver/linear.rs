use uuid::Uuid;

use super::ResolveError;
use crate::pathway::progress::{LinearProgress, PathwayProgress};
use crate::pathway::provider::{ChildProvider, DeploymentContext, ProgressStore};
use crate::pathway::types::{Pathway, WalkableRef};

/// Ordered traversal: the next walkable is the first live child the learner
/// has not completed, so children inserted mid-run surface in position.
#[derive(Debug, Clone)]
pub struct LinearResolver {
    pathway_id: Uuid,
    ctx: DeploymentContext,
}

impl LinearResolver {
    pub fn new(pathway: &Pathway) -> Self {
        Self {
            pathway_id: pathway.id,
            ctx: DeploymentContext::from(pathway),
        }
    }

    pub async fn resolve<S, C>(
        &self,
        store: &S,
        provider: &C,
        learner_id: &str,
    ) -> Result<Vec<WalkableRef>, ResolveError>
    where
        S: ProgressStore,
        C: ChildProvider,
    {
        let record = match store
            .latest(self.pathway_id, learner_id)
            .await
            .map_err(ResolveError::Store)?
        {
            Some(PathwayProgress::Linear(record)) => record,
            Some(other) => {
                return Err(ResolveError::ProgressKindMismatch {
                    pathway_id: self.pathway_id,
                    expected: "linear",
                    found: other.kind(),
                })
            }
            None => LinearProgress::start(self.pathway_id, learner_id),
        };

        let children = provider
            .children(self.pathway_id, &self.ctx)
            .await
            .map_err(ResolveError::Children)?;

        Ok(record.next_pending(&children).cloned().into_iter().collect())
    }
}
