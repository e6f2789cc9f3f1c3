//! Show-token extractor for axum handlers.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use lumacast_core::token::ShowToken;

use crate::error::ErrorBody;

/// Show token extracted from the plugin's request headers.
///
/// The plugin sends the token in the `showtoken` header; older builds use
/// `remotetoken`, which is accepted as a fallback. A missing or empty
/// header rejects the request with 401 before any handler runs — the token
/// is then resolved against the store inside the handler, so an unknown
/// token surfaces as the usual `show_not_found` response.
#[derive(Debug, Clone)]
pub struct PluginToken(pub ShowToken);

/// Rejection for requests carrying no usable token header.
#[derive(Debug)]
pub struct MissingToken;

impl IntoResponse for MissingToken {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "missing_show_token",
            message: "Missing or invalid show token".to_owned(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for PluginToken
where
    S: Send + Sync,
{
    type Rejection = MissingToken;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("showtoken")
            .or_else(|| parts.headers.get("remotetoken"))
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty());

        raw.map(|token| Self(ShowToken::new(token)))
            .ok_or(MissingToken)
    }
}
