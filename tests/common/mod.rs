#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use pathway_engine::pathway::progress::PathwayProgress;
use pathway_engine::{ChildProvider, DeploymentContext, ProgressStore, ProviderError, WalkableRef};

#[derive(Default)]
pub struct MemoryProgressStore {
    records: Mutex<HashMap<(Uuid, String), PathwayProgress>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, record: PathwayProgress) {
        let meta = record.meta().clone();
        self.records
            .lock()
            .unwrap()
            .insert((meta.pathway_id, meta.learner_id), record);
    }
}

impl ProgressStore for MemoryProgressStore {
    async fn latest(
        &self,
        pathway_id: Uuid,
        learner_id: &str,
    ) -> Result<Option<PathwayProgress>, ProviderError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(pathway_id, learner_id.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryChildProvider {
    children: Mutex<HashMap<Uuid, Vec<WalkableRef>>>,
}

impl MemoryChildProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pathway_id: Uuid, children: Vec<WalkableRef>) {
        self.children.lock().unwrap().insert(pathway_id, children);
    }
}

impl ChildProvider for MemoryChildProvider {
    async fn children(
        &self,
        pathway_id: Uuid,
        _ctx: &DeploymentContext,
    ) -> Result<Vec<WalkableRef>, ProviderError> {
        Ok(self
            .children
            .lock()
            .unwrap()
            .get(&pathway_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// A store that fails every lookup, for error-path tests.
pub struct FailingProgressStore;

impl ProgressStore for FailingProgressStore {
    async fn latest(
        &self,
        _pathway_id: Uuid,
        _learner_id: &str,
    ) -> Result<Option<PathwayProgress>, ProviderError> {
        Err(ProviderError::new("progress backend unavailable"))
    }
}

pub fn activities(count: usize) -> Vec<WalkableRef> {
    (0..count)
        .map(|_| WalkableRef::activity(Uuid::new_v4()))
        .collect()
}
