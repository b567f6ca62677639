/// What Random/BKT resolution does when the candidate set drains before the
/// exit condition is met. The source behavior left this unguarded; here it
/// is an explicit knob with "treat as complete" as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCandidatePolicy {
    #[default]
    TreatComplete,
    Fault,
}

impl EmptyCandidatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TreatComplete => "complete",
            Self::Fault => "fault",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "complete" => Some(Self::TreatComplete),
            "fault" => Some(Self::Fault),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub empty_candidate: EmptyCandidatePolicy,
    pub log_level: String,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let empty_candidate = std::env::var("PATHWAY_EMPTY_CANDIDATE")
            .ok()
            .and_then(|value| EmptyCandidatePolicy::parse(&value))
            .unwrap_or_default();

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            empty_candidate,
            log_level,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_candidate: EmptyCandidatePolicy::default(),
            log_level: "info".to_string(),
        }
    }
}
