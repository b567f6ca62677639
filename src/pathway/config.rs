//! Typed access to the opaque per-pathway configuration document.
//!
//! The document schema is policy-specific; callers ask for concrete values at
//! a field path and get a `ConfigError` when the field is absent, the wrong
//! shape, or unparseable. Required fields never default silently.

use serde_json::Value;
use uuid::Uuid;

use super::bkt::BktParams;
use super::types::{ElementKind, WalkableRef};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing config field: {path}")]
    Missing { path: String },
    #[error("config field {path} has wrong shape, expected {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("config field {path} failed to parse: {reason}")]
    Parse { path: String, reason: String },
    #[error("config field {path} out of range: {value}")]
    OutOfRange { path: String, value: f64 },
}

fn join(path: &[&str]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.join(".")
    }
}

/// Borrowed view over a pathway's `config` document.
#[derive(Debug, Clone, Copy)]
pub struct ConfigDoc<'a> {
    root: Option<&'a Value>,
}

impl<'a> ConfigDoc<'a> {
    pub fn new(root: Option<&'a Value>) -> Self {
        Self { root }
    }

    fn value_at(&self, path: &[&str]) -> Result<&'a Value, ConfigError> {
        let mut current = self.root.ok_or_else(|| ConfigError::Missing {
            path: join(path),
        })?;
        for (depth, segment) in path.iter().enumerate() {
            let map = current.as_object().ok_or_else(|| ConfigError::WrongType {
                path: join(&path[..depth]),
                expected: "object",
            })?;
            current = map.get(*segment).ok_or_else(|| ConfigError::Missing {
                path: join(&path[..=depth]),
            })?;
        }
        Ok(current)
    }

    pub fn u64_at(&self, path: &[&str]) -> Result<u64, ConfigError> {
        self.value_at(path)?
            .as_u64()
            .ok_or_else(|| ConfigError::WrongType {
                path: join(path),
                expected: "non-negative integer",
            })
    }

    pub fn f64_at(&self, path: &[&str]) -> Result<f64, ConfigError> {
        self.value_at(path)?
            .as_f64()
            .ok_or_else(|| ConfigError::WrongType {
                path: join(path),
                expected: "number",
            })
    }

    pub fn str_at(&self, path: &[&str]) -> Result<&'a str, ConfigError> {
        self.value_at(path)?
            .as_str()
            .ok_or_else(|| ConfigError::WrongType {
                path: join(path),
                expected: "string",
            })
    }

    pub fn uuid_at(&self, path: &[&str]) -> Result<Uuid, ConfigError> {
        let raw = self.str_at(path)?;
        Uuid::parse_str(raw).map_err(|err| ConfigError::Parse {
            path: join(path),
            reason: err.to_string(),
        })
    }

    /// A probability field: a number constrained to [0, 1].
    pub fn probability_at(&self, path: &[&str]) -> Result<f64, ConfigError> {
        let value = self.f64_at(path)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::OutOfRange {
                path: join(path),
                value,
            });
        }
        Ok(value)
    }

    /// A positive integer field; zero fails the same way a negative would.
    pub fn positive_u64_at(&self, path: &[&str]) -> Result<u64, ConfigError> {
        let value = self.u64_at(path)?;
        if value == 0 {
            return Err(ConfigError::OutOfRange {
                path: join(path),
                value: 0.0,
            });
        }
        Ok(value)
    }

    pub fn uuid_list_at(&self, path: &[&str]) -> Result<Vec<Uuid>, ConfigError> {
        let items = self
            .value_at(path)?
            .as_array()
            .ok_or_else(|| ConfigError::WrongType {
                path: join(path),
                expected: "array",
            })?;
        items
            .iter()
            .map(|item| {
                let raw = item.as_str().ok_or_else(|| ConfigError::WrongType {
                    path: join(path),
                    expected: "array of strings",
                })?;
                Uuid::parse_str(raw).map_err(|err| ConfigError::Parse {
                    path: join(path),
                    reason: err.to_string(),
                })
            })
            .collect()
    }
}

/// Random-pathway configuration. `exitAfter` is required; a Random pathway
/// without an explicit exit count is an authoring defect that must surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSettings {
    pub exit_after: u64,
}

impl RandomSettings {
    pub fn from_config(doc: ConfigDoc<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            exit_after: doc.positive_u64_at(&["exitAfter"])?,
        })
    }
}

/// Graph-pathway starting walkable. Parse failures are the caller's to
/// forgive: the Graph resolver degrades to the first provider child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStart {
    pub walkable: WalkableRef,
}

impl GraphStart {
    pub fn from_config(doc: ConfigDoc<'_>) -> Result<Self, ConfigError> {
        let element_id = doc.uuid_at(&["startingWalkableId"])?;
        let raw_kind = doc.str_at(&["startingWalkableType"])?;
        let kind = ElementKind::from_tag(raw_kind).ok_or_else(|| ConfigError::Parse {
            path: "startingWalkableType".to_string(),
            reason: format!("unknown element kind: {raw_kind}"),
        })?;
        Ok(Self {
            walkable: WalkableRef::new(element_id, kind),
        })
    }
}

/// BKT-pathway configuration. Every field is required; the mastery threshold
/// semantics must be explicit, so nothing here defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct BktSettings {
    pub exit_after: u64,
    pub params: BktParams,
    /// Initial mastery probability for a learner with no history.
    pub p_l0: f64,
    /// Mastery threshold P(Lₙ) must reach and hold.
    pub p_ln: f64,
    /// Consecutive screens the threshold must hold before completion.
    pub maintain_for: u32,
    /// Document items awarded on mastery, consumed by the external grading
    /// concern.
    pub competency: Vec<Uuid>,
}

impl BktSettings {
    pub fn from_config(doc: ConfigDoc<'_>) -> Result<Self, ConfigError> {
        let maintain_for = doc.positive_u64_at(&["maintainFor"])?;
        let maintain_for = u32::try_from(maintain_for).map_err(|_| ConfigError::OutOfRange {
            path: "maintainFor".to_string(),
            value: maintain_for as f64,
        })?;
        Ok(Self {
            exit_after: doc.positive_u64_at(&["exitAfter"])?,
            params: BktParams {
                p_slip: doc.probability_at(&["P_S"])?,
                p_guess: doc.probability_at(&["P_G"])?,
                p_transit: doc.probability_at(&["P_T"])?,
            },
            p_l0: doc.probability_at(&["P_L0"])?,
            p_ln: doc.probability_at(&["P_LN"])?,
            maintain_for,
            competency: doc.uuid_list_at(&["competency"])?,
        })
    }
}
