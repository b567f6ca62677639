use uuid::Uuid;

use super::ResolveError;
use crate::pathway::config::{ConfigDoc, GraphStart};
use crate::pathway::progress::PathwayProgress;
use crate::pathway::provider::{ChildProvider, DeploymentContext, ProgressStore};
use crate::pathway::types::{Pathway, WalkableRef};

/// Graph traversal: the cursor is advanced by an external progression
/// action, so resolution never derives "next" — it returns the cursor, or
/// the configured starting walkable for a fresh learner. A malformed
/// starting-walkable config degrades to the first provider child instead of
/// escalating; Random/BKT deliberately do not get this forgiveness.
#[derive(Debug, Clone)]
pub struct GraphResolver {
    pathway_id: Uuid,
    ctx: DeploymentContext,
    config: Option<serde_json::Value>,
}

impl GraphResolver {
    pub fn new(pathway: &Pathway) -> Self {
        Self {
            pathway_id: pathway.id,
            ctx: DeploymentContext::from(pathway),
            config: pathway.config.clone(),
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
        match store
            .latest(self.pathway_id, learner_id)
            .await
            .map_err(ResolveError::Store)?
        {
            Some(PathwayProgress::Graph(record)) => return Ok(vec![record.current]),
            Some(other) => {
                return Err(ResolveError::ProgressKindMismatch {
                    pathway_id: self.pathway_id,
                    expected: "graph",
                    found: other.kind(),
                })
            }
            None => {}
        }

        match GraphStart::from_config(ConfigDoc::new(self.config.as_ref())) {
            Ok(start) => Ok(vec![start.walkable]),
            Err(err) => {
                tracing::debug!(
                    pathway_id = %self.pathway_id,
                    error = %err,
                    "starting walkable unreadable, falling back to first child"
                );
                let children = provider
                    .children(self.pathway_id, &self.ctx)
                    .await
                    .map_err(ResolveError::Children)?;
                Ok(children.into_iter().take(1).collect())
            }
        }
    }
}
