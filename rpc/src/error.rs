//! RPC error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fairdice_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("no roll to verify")]
    NoRoll,

    #[error("malformed round: {0}")]
    MalformedRound(String),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoRoll => StatusCode::CONFLICT,
            Self::MalformedRound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Engine(_) | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for RpcError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NoRoll => RpcError::NoRoll,
            ref other if other.is_malformed_round() => RpcError::MalformedRound(other.to_string()),
            other => RpcError::Engine(other.to_string()),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdice_vrf::VrfError;

    #[test]
    fn engine_errors_map_to_status_codes() {
        assert_eq!(
            RpcError::from(EngineError::NoRoll).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RpcError::from(EngineError::Vrf(VrfError::MalformedInput("zz".into()))).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RpcError::from(EngineError::Config("bad".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
