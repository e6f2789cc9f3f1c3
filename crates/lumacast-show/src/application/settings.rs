//! Settings handlers — viewer-control switches, PSA management, plugin
//! version reporting, and the remote-preference read surface.

use lumacast_core::error::ShowError;
use lumacast_core::token::ShowToken;
use serde::Serialize;
use tracing::info;

use super::load_show;
use crate::domain::preferences::ViewerControlMode;
use crate::store::ShowStore;

/// Read-only view of the preferences the remote front-end needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePreferencesView {
    /// Public subdomain the viewer page is served from.
    pub remote_subdomain: String,
    /// Current participation mode.
    pub viewer_control_mode: ViewerControlMode,
}

/// Returns the current viewer-control mode.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token and
/// `ShowError::PreferencesMissing` when the aggregate carries no
/// preferences.
pub async fn viewer_control_mode(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<ViewerControlMode, ShowError> {
    let show = load_show(token, store).await?;
    Ok(show.preferences()?.viewer_control_mode)
}

/// Returns the remote-facing preference view.
///
/// # Errors
///
/// Same conditions as [`viewer_control_mode`].
pub async fn remote_preferences(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<RemotePreferencesView, ShowError> {
    let show = load_show(token, store).await?;
    let mode = show.preferences()?.viewer_control_mode;
    Ok(RemotePreferencesView {
        remote_subdomain: show.show_subdomain,
        viewer_control_mode: mode,
    })
}

/// Flips the viewer-control master switch and returns the new state.
///
/// # Errors
///
/// Same conditions as [`viewer_control_mode`].
pub async fn toggle_viewer_control(
    token: &ShowToken,
    store: &dyn ShowStore,
) -> Result<bool, ShowError> {
    let mut show = load_show(token, store).await?;
    let enabled = !show.preferences()?.viewer_control_enabled;
    show.preferences_mut()?.viewer_control_enabled = enabled;
    store.save(&show).await?;
    info!(show = %show.show_subdomain, enabled, "toggled viewer control");
    Ok(enabled)
}

/// Sets the viewer-control master switch and returns the new state.
///
/// # Errors
///
/// Same conditions as [`viewer_control_mode`].
pub async fn update_viewer_control(
    token: &ShowToken,
    enabled: bool,
    store: &dyn ShowStore,
) -> Result<bool, ShowError> {
    let mut show = load_show(token, store).await?;
    show.preferences_mut()?.viewer_control_enabled = enabled;
    store.save(&show).await?;
    Ok(enabled)
}

/// Sets whether PSA rotation runs from the play-count signal and returns
/// the new state.
///
/// # Errors
///
/// Same conditions as [`viewer_control_mode`].
pub async fn update_managed_psa(
    token: &ShowToken,
    managed: bool,
    store: &dyn ShowStore,
) -> Result<bool, ShowError> {
    let mut show = load_show(token, store).await?;
    show.preferences_mut()?.manage_psa = managed;
    store.save(&show).await?;
    info!(show = %show.show_subdomain, managed, "updated managed-PSA flag");
    Ok(managed)
}

/// Records the plugin build and controller firmware versions.
///
/// # Errors
///
/// Returns `ShowError::ShowNotFound` for an unresolvable token.
pub async fn record_plugin_version(
    token: &ShowToken,
    plugin_version: Option<String>,
    fpp_version: Option<String>,
    store: &dyn ShowStore,
) -> Result<(), ShowError> {
    let mut show = load_show(token, store).await?;
    show.plugin_version = plugin_version;
    show.fpp_version = fpp_version;
    store.save(&show).await?;
    Ok(())
}

