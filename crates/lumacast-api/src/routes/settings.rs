//! Settings and read-surface routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lumacast_show::application::settings;
use lumacast_show::application::settings::RemotePreferencesView;

use crate::auth::PluginToken;
use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// `"Y"`/`"N"` flag in the plugin's wire shape.
fn yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("y")
}

/// Response carrying the current viewer-control mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerControlModeResponse {
    /// One of `disabled`, `jukebox`, `voting`.
    pub viewer_control_mode: &'static str,
}

/// Response carrying the viewer-control master switch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerControlEnabledResponse {
    /// The switch state after the operation.
    pub viewer_control_enabled: bool,
}

/// Request body for POST /updateViewerControl.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerControlRequest {
    /// `"Y"` to enable, anything else disables.
    pub viewer_control_enabled: String,
}

/// Request body for POST /updateManagedPsa.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedPsaRequest {
    /// `"Y"` to manage PSAs from the play-count signal.
    pub managed_psa_enabled: String,
}

/// Response for POST /updateManagedPsa.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedPsaResponse {
    /// The flag state after the operation.
    pub managed_psa_enabled: bool,
}

/// Request body for POST /pluginVersion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginVersionRequest {
    /// Plugin build identifier.
    #[serde(default)]
    pub plugin_version: Option<String>,
    /// Controller firmware identifier.
    #[serde(default)]
    pub fpp_version: Option<String>,
}

/// GET /viewerControlMode
#[instrument(skip(state))]
async fn viewer_control_mode(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<ViewerControlModeResponse>, ApiError> {
    let mode = settings::viewer_control_mode(&token, state.store.as_ref()).await?;
    Ok(Json(ViewerControlModeResponse {
        viewer_control_mode: mode.as_str(),
    }))
}

/// GET /remotePreferences
#[instrument(skip(state))]
async fn remote_preferences(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<RemotePreferencesView>, ApiError> {
    let view = settings::remote_preferences(&token, state.store.as_ref()).await?;
    Ok(Json(view))
}

/// POST /toggleViewerControl
#[instrument(skip(state))]
async fn toggle_viewer_control(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
) -> Result<Json<ViewerControlEnabledResponse>, ApiError> {
    let enabled = settings::toggle_viewer_control(&token, state.store.as_ref()).await?;
    Ok(Json(ViewerControlEnabledResponse {
        viewer_control_enabled: enabled,
    }))
}

/// POST /updateViewerControl
#[instrument(skip(state, request))]
async fn update_viewer_control(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<ViewerControlRequest>,
) -> Result<Json<ViewerControlEnabledResponse>, ApiError> {
    let enabled = settings::update_viewer_control(
        &token,
        yes(&request.viewer_control_enabled),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(ViewerControlEnabledResponse {
        viewer_control_enabled: enabled,
    }))
}

/// POST /updateManagedPsa
#[instrument(skip(state, request))]
async fn update_managed_psa(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<ManagedPsaRequest>,
) -> Result<Json<ManagedPsaResponse>, ApiError> {
    let managed = settings::update_managed_psa(
        &token,
        yes(&request.managed_psa_enabled),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(ManagedPsaResponse {
        managed_psa_enabled: managed,
    }))
}

/// POST /pluginVersion
#[instrument(skip(state, request))]
async fn plugin_version(
    State(state): State<AppState>,
    PluginToken(token): PluginToken,
    Json(request): Json<PluginVersionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    settings::record_plugin_version(
        &token,
        request.plugin_version,
        request.fpp_version,
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(MessageResponse::success()))
}

/// Returns the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/viewerControlMode", get(viewer_control_mode))
        .route("/remotePreferences", get(remote_preferences))
        .route("/toggleViewerControl", post(toggle_viewer_control))
        .route("/updateViewerControl", post(update_viewer_control))
        .route("/updateManagedPsa", post(update_managed_psa))
        .route("/pluginVersion", post(plugin_version))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use lumacast_core::clock::Clock;
    use lumacast_show::domain::preferences::ViewerControlMode;
    use lumacast_test_support::{FixedClock, InMemoryShowStore, fixtures};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(store: InMemoryShowStore) -> Router {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(Utc::now()));
        router().with_state(AppState::new(Arc::new(store), clock, 100))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("showtoken", "tok");
        let request = match body {
            Some(body) => {
                builder = builder.header("content-type", "application/json");
                builder
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_viewer_control_mode_reports_lowercase_mode() {
        let mut show = fixtures::base_show("tok");
        show.preferences.as_mut().unwrap().viewer_control_mode = ViewerControlMode::Voting;
        let app = app(InMemoryShowStore::with_shows(vec![show]));

        let (status, json) = send(app, "GET", "/viewerControlMode", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["viewerControlMode"], "voting");
    }

    #[tokio::test]
    async fn test_remote_preferences_reports_subdomain_and_mode() {
        let app = app(InMemoryShowStore::with_shows(vec![fixtures::base_show(
            "tok",
        )]));

        let (status, json) = send(app, "GET", "/remotePreferences", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["remoteSubdomain"], "tok-subdomain");
        assert_eq!(json["viewerControlMode"], "disabled");
    }

    #[tokio::test]
    async fn test_toggle_returns_the_post_toggle_state() {
        let app = app(InMemoryShowStore::with_shows(vec![fixtures::base_show(
            "tok",
        )]));

        // The fixture starts enabled, so the first toggle lands on false.
        let (_, json) = send(app.clone(), "POST", "/toggleViewerControl", None).await;
        assert_eq!(json["viewerControlEnabled"], false);

        let (_, json) = send(app, "POST", "/toggleViewerControl", None).await;
        assert_eq!(json["viewerControlEnabled"], true);
    }

    #[tokio::test]
    async fn test_update_viewer_control_parses_the_yes_no_flag() {
        let app = app(InMemoryShowStore::with_shows(vec![fixtures::base_show(
            "tok",
        )]));

        let (_, json) = send(
            app.clone(),
            "POST",
            "/updateViewerControl",
            Some(&serde_json::json!({ "viewerControlEnabled": "N" })),
        )
        .await;
        assert_eq!(json["viewerControlEnabled"], false);

        let (_, json) = send(
            app,
            "POST",
            "/updateViewerControl",
            Some(&serde_json::json!({ "viewerControlEnabled": "y" })),
        )
        .await;
        assert_eq!(json["viewerControlEnabled"], true);
    }

    #[tokio::test]
    async fn test_update_managed_psa_flips_the_flag() {
        let app = app(InMemoryShowStore::with_shows(vec![fixtures::base_show(
            "tok",
        )]));

        let (status, json) = send(
            app,
            "POST",
            "/updateManagedPsa",
            Some(&serde_json::json!({ "managedPsaEnabled": "Y" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["managedPsaEnabled"], true);
    }

    #[tokio::test]
    async fn test_plugin_version_acknowledges() {
        let app = app(InMemoryShowStore::with_shows(vec![fixtures::base_show(
            "tok",
        )]));

        let (status, json) = send(
            app,
            "POST",
            "/pluginVersion",
            Some(&serde_json::json!({ "pluginVersion": "2026.3", "fppVersion": "9.1" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Success");
    }
}
