use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::aggregate::{ReceptionId, VehicleReception};
use super::payload::ReceptionCreate;

/// What the user is shown after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedReception {
    pub id: ReceptionId,
    pub reception_number: String,
}

impl From<&VehicleReception> for CreatedReception {
    fn from(r: &VehicleReception) -> Self {
        Self {
            id: r.id,
            reception_number: r.reception_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Persists a reception submission.
///
/// Constructed by the caller and passed in, so the form flow runs against an
/// in-memory implementation in tests.
#[async_trait(?Send)]
pub trait ReceptionGateway {
    async fn create_reception(
        &self,
        payload: &ReceptionCreate,
    ) -> Result<CreatedReception, GatewayError>;
}
