use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use super::ResolveError;
use crate::config::EmptyCandidatePolicy;
use crate::pathway::config::{ConfigDoc, RandomSettings};
use crate::pathway::progress::PathwayProgress;
use crate::pathway::provider::{ChildProvider, DeploymentContext, ProgressStore};
use crate::pathway::types::{Pathway, WalkableRef};

/// Random traversal: uniform choice over the children the learner has not
/// completed, until `exitAfter` of them are done. An in-progress walkable
/// always resumes verbatim; a step is never re-randomized.
#[derive(Debug, Clone)]
pub struct RandomResolver {
    pathway_id: Uuid,
    ctx: DeploymentContext,
    config: Option<serde_json::Value>,
    empty_candidate: EmptyCandidatePolicy,
}

impl RandomResolver {
    pub fn new(pathway: &Pathway, empty_candidate: EmptyCandidatePolicy) -> Self {
        Self {
            pathway_id: pathway.id,
            ctx: DeploymentContext::from(pathway),
            config: pathway.config.clone(),
            empty_candidate,
        }
    }

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
        // exitAfter is required; surface the authoring defect before any I/O
        let settings = RandomSettings::from_config(ConfigDoc::new(self.config.as_ref()))?;

        let record = match store
            .latest(self.pathway_id, learner_id)
            .await
            .map_err(ResolveError::Store)?
        {
            Some(PathwayProgress::Random(record)) => Some(record),
            Some(other) => {
                return Err(ResolveError::ProgressKindMismatch {
                    pathway_id: self.pathway_id,
                    expected: "random",
                    found: other.kind(),
                })
            }
            None => None,
        };

        if let Some(ref record) = record {
            if let Some(current) = record.in_progress {
                return Ok(vec![current]);
            }
            if record.is_satisfied(settings.exit_after) {
                return Ok(Vec::new());
            }
        }

        let children = provider
            .children(self.pathway_id, &self.ctx)
            .await
            .map_err(ResolveError::Children)?;

        // candidates come from the live child list at call time, never cached
        let candidates = match record {
            Some(record) => record.remaining(&children),
            None => children,
        };

        match candidates.choose(rng) {
            Some(pick) => Ok(vec![*pick]),
            None => empty_candidates(self.pathway_id, self.empty_candidate),
        }
    }
}

/// Shared Random/BKT handling for a drained candidate set before the exit
/// condition, e.g. `exitAfter` above the child count.
pub(super) fn empty_candidates(
    pathway_id: Uuid,
    policy: EmptyCandidatePolicy,
) -> Result<Vec<WalkableRef>, ResolveError> {
    match policy {
        EmptyCandidatePolicy::TreatComplete => {
            tracing::warn!(
                pathway_id = %pathway_id,
                "candidate set drained before the exit condition; treating pathway as complete"
            );
            Ok(Vec::new())
        }
        EmptyCandidatePolicy::Fault => Err(ResolveError::NoCandidateWalkable { pathway_id }),
    }
}
