use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use super::random::empty_candidates;
use super::ResolveError;
use crate::config::EmptyCandidatePolicy;
use crate::pathway::config::{BktSettings, ConfigDoc};
use crate::pathway::progress::PathwayProgress;
use crate::pathway::provider::{ChildProvider, DeploymentContext, ProgressStore};
use crate::pathway::types::{Pathway, WalkableRef};

/// BKT traversal. Resolution only decides what to show for the current
/// progress snapshot; the mastery update loop itself is driven between
/// visits by the external progression pipeline (`BktProgress::observe`).
#[derive(Debug, Clone)]
pub struct BktResolver {
    pathway_id: Uuid,
    ctx: DeploymentContext,
    config: Option<serde_json::Value>,
    empty_candidate: EmptyCandidatePolicy,
}

impl BktResolver {
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
        // all six probability/threshold fields plus the competency list are
        // required; resolution refuses to run on an under-specified model
        let _settings = BktSettings::from_config(ConfigDoc::new(self.config.as_ref()))?;

        let record = match store
            .latest(self.pathway_id, learner_id)
            .await
            .map_err(ResolveError::Store)?
        {
            Some(PathwayProgress::Bkt(record)) => Some(record),
            Some(other) => {
                return Err(ResolveError::ProgressKindMismatch {
                    pathway_id: self.pathway_id,
                    expected: "bkt",
                    found: other.kind(),
                })
            }
            None => None,
        };

        if let Some(ref record) = record {
            // terminal whether mastery was learned or walkables merely ran
            // out; the competency award stays withheld in the latter case
            if record.is_completed {
                return Ok(Vec::new());
            }
            if let Some(current) = record.in_progress {
                return Ok(vec![current]);
            }
        }

        let children = provider
            .children(self.pathway_id, &self.ctx)
            .await
            .map_err(ResolveError::Children)?;

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
