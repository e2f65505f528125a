//! REST implementation of [`ReceptionGateway`].
//!
//! Built once in `App` and provided through context as [`SharedGateway`];
//! pages never construct their own client.

use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::a001_vehicle_reception::{
    CreatedReception, GatewayError, ReceptionCreate, ReceptionGateway, VehicleReception,
};
use gloo_net::http::Request;
use leptos::prelude::*;

use crate::shared::api_utils::api_url;
use crate::shared::http::{authorized, error_detail};

const CREATE_PATH: &str = "/api/v1/vehicle-receptions/enhanced";

pub type SharedGateway = Arc<dyn ReceptionGateway + Send + Sync>;

pub struct HttpReceptionGateway {
    create_url: String,
}

impl HttpReceptionGateway {
    pub fn new() -> Self {
        Self::with_url(api_url(CREATE_PATH))
    }

    pub fn with_url(create_url: String) -> Self {
        Self { create_url }
    }
}

impl Default for HttpReceptionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Created,
    Unauthorized,
    Rejected(u16),
}

fn classify(status: u16) -> StatusClass {
    match status {
        200 | 201 => StatusClass::Created,
        401 => StatusClass::Unauthorized,
        other => StatusClass::Rejected(other),
    }
}

#[async_trait(?Send)]
impl ReceptionGateway for HttpReceptionGateway {
    async fn create_reception(
        &self,
        payload: &ReceptionCreate,
    ) -> Result<CreatedReception, GatewayError> {
        let response = authorized(Request::post(&self.create_url))
            .json(payload)
            .map_err(|e| GatewayError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        match classify(response.status()) {
            StatusClass::Created => {}
            StatusClass::Unauthorized => return Err(GatewayError::Unauthorized),
            StatusClass::Rejected(status) => {
                return Err(GatewayError::Rejected {
                    status,
                    message: error_detail(&response).await,
                })
            }
        }

        let created = response
            .json::<VehicleReception>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        log::info!("Reception {} created", created.reception_number);
        Ok(CreatedReception::from(&created))
    }
}

/// Gateway provided by `App`
pub fn use_gateway() -> SharedGateway {
    use_context::<SharedGateway>().expect("ReceptionGateway not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(200), StatusClass::Created);
        assert_eq!(classify(201), StatusClass::Created);
        assert_eq!(classify(401), StatusClass::Unauthorized);
        assert_eq!(classify(403), StatusClass::Rejected(403));
        assert_eq!(classify(422), StatusClass::Rejected(422));
        assert_eq!(classify(500), StatusClass::Rejected(500));
    }
}
