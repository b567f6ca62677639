use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
#[error("unsupported pathway type: {0}")]
pub struct UnsupportedPathwayType(pub String);

/// The five traversal policies. The set is closed: adding a variant is a
/// compile error until every dispatch site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathwayType {
    Linear,
    Free,
    Graph,
    Random,
    Bkt,
}

impl PathwayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "LINEAR",
            Self::Free => "FREE",
            Self::Graph => "GRAPH",
            Self::Random => "RANDOM",
            Self::Bkt => "BKT",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, UnsupportedPathwayType> {
        match tag.to_uppercase().as_str() {
            "LINEAR" => Ok(Self::Linear),
            "FREE" => Ok(Self::Free),
            "GRAPH" => Ok(Self::Graph),
            "RANDOM" => Ok(Self::Random),
            "BKT" => Ok(Self::Bkt),
            _ => Err(UnsupportedPathwayType(tag.to_string())),
        }
    }
}

/// How many children a consumer should eagerly fetch. Consumed by callers,
/// never by resolution itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum PreloadPolicy {
    All,
    #[default]
    First,
    None,
}

impl PreloadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::First => "FIRST",
            Self::None => "NONE",
        }
    }

    pub fn fetch_count(&self, total: usize) -> usize {
        match self {
            Self::All => total,
            Self::First => total.min(1),
            Self::None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Activity,
    Interactive,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Interactive => "interactive",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "activity" => Some(Self::Activity),
            "interactive" => Some(Self::Interactive),
            _ => None,
        }
    }
}

/// A presentable child element of a pathway. Produced by the child provider;
/// never created or mutated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkableRef {
    pub element_id: Uuid,
    pub kind: ElementKind,
}

impl WalkableRef {
    pub fn new(element_id: Uuid, kind: ElementKind) -> Self {
        Self { element_id, kind }
    }

    pub fn activity(element_id: Uuid) -> Self {
        Self::new(element_id, ElementKind::Activity)
    }

    pub fn interactive(element_id: Uuid) -> Self {
        Self::new(element_id, ElementKind::Interactive)
    }
}

/// A traversal policy attached to a courseware container. Authored upstream;
/// read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pathway {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub pathway_type: PathwayType,
    #[serde(default)]
    pub preload: PreloadPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_id: Option<Uuid>,
}

impl Pathway {
    pub fn new(id: Uuid, pathway_type: PathwayType) -> Self {
        Self {
            id,
            pathway_type,
            preload: PreloadPolicy::default(),
            config: None,
            deployment_id: None,
            change_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathway_type_round_trips_through_tags() {
        for tag in ["LINEAR", "FREE", "GRAPH", "RANDOM", "BKT"] {
            let parsed = PathwayType::from_tag(tag).unwrap();
            assert_eq!(parsed.as_str(), tag);
        }
        assert_eq!(PathwayType::from_tag("linear").unwrap(), PathwayType::Linear);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = PathwayType::from_tag("SPIRAL").unwrap_err();
        assert!(err.to_string().contains("SPIRAL"));
    }

    #[test]
    fn preload_fetch_counts() {
        assert_eq!(PreloadPolicy::All.fetch_count(7), 7);
        assert_eq!(PreloadPolicy::First.fetch_count(7), 1);
        assert_eq!(PreloadPolicy::First.fetch_count(0), 0);
        assert_eq!(PreloadPolicy::None.fetch_count(7), 0);
    }
}
