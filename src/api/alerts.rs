use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::api::AlertApiError;
use crate::services::TokenService;
use crate::stores::alert_store::NewAlert;
use crate::stores::{AlertStore, AttemptStore};
use crate::types::dto::alerts::{
    AlertListResponse, AlertResponse, AlertStatsSummary, CreateAlertRequest, DeleteAlertResponse,
    ResolveAlertRequest, SeverityCounts,
};
use crate::types::internal::auth::Claims;
use crate::types::internal::security::{AlertStatus, Severity};

/// Security alerts API endpoints
///
/// Plain persistence surface over security_alerts; the access decision
/// engine writes its own alerts through the recorder, not through here.
pub struct AlertsApi {
    alert_store: Arc<AlertStore>,
    attempt_store: Arc<AttemptStore>,
    token_service: Arc<TokenService>,
}

impl AlertsApi {
    pub fn new(
        alert_store: Arc<AlertStore>,
        attempt_store: Arc<AttemptStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            alert_store,
            attempt_store,
            token_service,
        }
    }

    fn authenticate(&self, auth: &BearerAuth) -> Result<Claims, AlertApiError> {
        self.token_service
            .validate_jwt(&auth.0.token)
            .map_err(|_| AlertApiError::unauthorized())
    }
}

/// API tags for alert endpoints
#[derive(Tags)]
enum AlertTags {
    /// Security alert endpoints
    Alerts,
}

#[OpenApi]
impl AlertsApi {
    /// List alerts, newest first
    #[oai(path = "/alerts", method = "get", tag = "AlertTags::Alerts")]
    async fn list(
        &self,
        status: Query<Option<String>>,
        limit: Query<Option<u64>>,
        auth: BearerAuth,
    ) -> Result<Json<AlertListResponse>, AlertApiError> {
        self.authenticate(&auth)?;

        let status = match status.0.as_deref() {
            Some(raw) => {
                Some(AlertStatus::parse(raw).ok_or_else(|| AlertApiError::invalid_status(raw))?)
            }
            None => None,
        };

        let alerts = self
            .alert_store
            .list(status, limit.0.unwrap_or(50))
            .await
            .map_err(AlertApiError::from_internal_error)?;

        let alerts: Vec<AlertResponse> = alerts.into_iter().map(Into::into).collect();
        let total = alerts.len() as u64;
        Ok(Json(AlertListResponse { alerts, total }))
    }

    /// Record a new security alert
    #[oai(path = "/alerts", method = "post", tag = "AlertTags::Alerts")]
    async fn create(
        &self,
        body: Json<CreateAlertRequest>,
        auth: BearerAuth,
    ) -> Result<Json<AlertResponse>, AlertApiError> {
        self.authenticate(&auth)?;

        let body = body.0;
        let severity = Severity::parse(&body.severity)
            .ok_or_else(|| AlertApiError::invalid_severity(&body.severity))?;

        let alert = self
            .alert_store
            .create(NewAlert {
                device_id: body.device_id,
                alert_type: body.alert_type,
                severity,
                description: body.description,
                source_ip: body.source_ip,
                metadata: body.metadata.unwrap_or_else(|| serde_json::json!({})),
            })
            .await
            .map_err(AlertApiError::from_internal_error)?;

        Ok(Json(alert.into()))
    }

    /// Resolve an active alert
    ///
    /// Sets resolved_at and resolved_by in the same write. Alerts that are
    /// not active are rejected unchanged.
    #[oai(path = "/alerts/:alert_id/resolve", method = "put", tag = "AlertTags::Alerts")]
    async fn resolve(
        &self,
        alert_id: Path<i32>,
        body: Json<ResolveAlertRequest>,
        auth: BearerAuth,
    ) -> Result<Json<AlertResponse>, AlertApiError> {
        let claims = self.authenticate(&auth)?;

        let alert = self
            .alert_store
            .resolve(alert_id.0, &claims.sub, body.0.resolution_note)
            .await
            .map_err(AlertApiError::from_internal_error)?;

        Ok(Json(alert.into()))
    }

    /// Delete an alert
    #[oai(path = "/alerts/:alert_id", method = "delete", tag = "AlertTags::Alerts")]
    async fn delete(
        &self,
        alert_id: Path<i32>,
        auth: BearerAuth,
    ) -> Result<Json<DeleteAlertResponse>, AlertApiError> {
        self.authenticate(&auth)?;

        self.alert_store
            .delete(alert_id.0)
            .await
            .map_err(AlertApiError::from_internal_error)?;

        Ok(Json(DeleteAlertResponse {
            success: true,
            message: format!("Alert {} deleted", alert_id.0),
        }))
    }

    /// Aggregate counts for the dashboard summary card
    #[oai(path = "/alerts/stats/summary", method = "get", tag = "AlertTags::Alerts")]
    async fn stats_summary(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<AlertStatsSummary>, AlertApiError> {
        self.authenticate(&auth)?;

        let counts = self
            .alert_store
            .counts()
            .await
            .map_err(AlertApiError::from_internal_error)?;
        let blocked_attempts_total = self
            .attempt_store
            .count()
            .await
            .map_err(AlertApiError::from_internal_error)?;

        Ok(Json(AlertStatsSummary {
            total: counts.total,
            active: counts.active,
            investigating: counts.investigating,
            resolved: counts.resolved,
            false_positive: counts.false_positive,
            by_severity: SeverityCounts {
                low: counts.low,
                medium: counts.medium,
                high: counts.high,
                critical: counts.critical,
            },
            blocked_attempts_total,
        }))
    }
}
