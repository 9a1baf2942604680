use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::api::Api;
use crate::errors::api::DeviceAccessError;
use crate::services::{AccessService, TokenService};
use crate::types::dto::access::{ConnectResponse, DisconnectResponse};

/// Device access API: the HTTP face of the access decision engine
pub struct DeviceAccessApi {
    access_service: Arc<AccessService>,
    token_service: Arc<TokenService>,
}

impl DeviceAccessApi {
    pub fn new(access_service: Arc<AccessService>, token_service: Arc<TokenService>) -> Self {
        Self {
            access_service,
            token_service,
        }
    }
}

impl Api for DeviceAccessApi {}

/// API tags for device-access endpoints
#[derive(Tags)]
enum AccessTags {
    /// Device connection endpoints
    DeviceAccess,
}

#[OpenApi(prefix_path = "/device-access")]
impl DeviceAccessApi {
    /// Connect the session to a device
    ///
    /// Runs the access decision table; depending on device state, posture
    /// and the caller's role the attempt is allowed, allowed with a
    /// recorded alert, or blocked with a recorded attempt.
    #[oai(
        path = "/connect/:device_id",
        method = "post",
        tag = "AccessTags::DeviceAccess"
    )]
    async fn connect(
        &self,
        req: &Request,
        device_id: Path<String>,
        auth: BearerAuth,
    ) -> Result<Json<ConnectResponse>, DeviceAccessError> {
        let claims = self
            .token_service
            .validate_jwt(&auth.0.token)
            .map_err(|_| DeviceAccessError::unauthorized())?;

        let source_ip = self.extract_ip_address(req);
        let user_agent = self.extract_user_agent(req);

        let device = self
            .access_service
            .connect(&claims.sub, &device_id.0, source_ip, user_agent)
            .await?;

        Ok(Json(ConnectResponse {
            success: true,
            message: format!("Connected to device '{}'", device.name),
            device: device.into(),
        }))
    }

    /// Disconnect the session from a device
    #[oai(
        path = "/disconnect/:device_id",
        method = "post",
        tag = "AccessTags::DeviceAccess"
    )]
    async fn disconnect(
        &self,
        device_id: Path<String>,
        auth: BearerAuth,
    ) -> Result<Json<DisconnectResponse>, DeviceAccessError> {
        let claims = self
            .token_service
            .validate_jwt(&auth.0.token)
            .map_err(|_| DeviceAccessError::unauthorized())?;

        let connection = self
            .access_service
            .disconnect(&claims.sub, &device_id.0)
            .await?;

        Ok(Json(DisconnectResponse {
            success: true,
            message: format!("Disconnected from device '{}'", connection.device_name),
        }))
    }
}
