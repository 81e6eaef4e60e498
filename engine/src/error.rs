use fairdice_vrf::VrfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Vrf(#[from] VrfError),

    #[error("no roll to verify")]
    NoRoll,

    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether the error came from malformed round data rather than the environment.
    pub fn is_malformed_round(&self) -> bool {
        matches!(
            self,
            Self::Vrf(VrfError::MalformedInput(_) | VrfError::UnsupportedSides(_))
        )
    }
}
