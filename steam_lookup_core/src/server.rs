use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use steamid_ng::SteamID;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    profile::Profile,
    settings::Settings,
    steam::{
        api::{SteamAPI, SteamAPIError},
        friend_code_to_steamid, is_friend_code, ConversionError,
    },
};

const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

const API_KEY_HELP: &str =
    "您需要申请自己的 Steam API Key 才能使用此服务。请访问 https://steamcommunity.com/dev/apikey 申请。";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Request body was not a valid lookup request")]
    MalformedRequest,
    #[error("No friend code was provided")]
    MissingCode,
    #[error("Friend code contains non-digit characters")]
    BadFormat,
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("No Steam API key is configured")]
    MissingApiKey,
    #[error("No profile found for {0}")]
    NotFound(u64),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl LookupError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            Self::MalformedRequest => ("无效的请求数据", None),
            Self::MissingCode => ("请输入好友代码", None),
            Self::BadFormat => ("好友代码格式不正确，请输入纯数字", None),
            Self::Conversion(_) => ("无法转换好友代码，请检查输入是否正确", None),
            Self::MissingApiKey => ("请配置 Steam API Key", Some(API_KEY_HELP)),
            Self::NotFound(_) => ("未找到该用户的信息，请检查好友代码是否正确", None),
        };
        ErrorBody { error, message }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected lookup: {self}");
        (self.status(), Json(self.body())).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(rename = "friendCode", default)]
    pub friend_code: Option<String>,
}

/// Runs every check that can fail before the Steam API is contacted.
///
/// # Errors
/// The first failed check, in the order: missing code, bad format, conversion,
/// missing API key.
pub fn validate(friend_code: Option<&str>, settings: &Settings) -> Result<SteamID, LookupError> {
    let code = friend_code.map(str::trim).unwrap_or_default();
    if code.is_empty() {
        return Err(LookupError::MissingCode);
    }
    if !is_friend_code(code) {
        return Err(LookupError::BadFormat);
    }

    let steamid = friend_code_to_steamid(code)?;

    if !settings.has_api_key() {
        return Err(LookupError::MissingApiKey);
    }

    Ok(steamid)
}

// State *************************

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub steam: Arc<SteamAPI>,
}

impl AppState {
    /// # Errors
    /// If the HTTP client for the Steam API could not be built
    pub fn new(settings: Settings) -> Result<Self, SteamAPIError> {
        let steam = SteamAPI::new(&settings)?;
        Ok(Self {
            settings: Arc::new(settings),
            steam: Arc::new(steam),
        })
    }
}

// Routes *************************

async fn lookup(State(state): State<AppState>, body: Bytes) -> Result<Json<Profile>, LookupError> {
    let request: LookupRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Could not parse lookup request: {e}");
        LookupError::MalformedRequest
    })?;

    let steamid = validate(request.friend_code.as_deref(), &state.settings)?;
    tracing::info!("Looking up {}", u64::from(steamid));

    let (summary, owned) = tokio::join!(
        state.steam.fetch_profile(steamid),
        state.steam.fetch_owned_games(steamid)
    );

    let summary = summary.ok_or(LookupError::NotFound(u64::from(steamid)))?;
    if owned.is_none() {
        tracing::warn!(
            "Game library for {} was unavailable, reporting no games",
            u64::from(steamid)
        );
    }

    Ok(Json(Profile::new(steamid, summary, owned, Utc::now())))
}

#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// `/api.php` is kept for browser clients built against the old endpoint.
///
/// [`CorsLayer`] answers preflight requests but only sends the allowed methods
/// and headers there, so they are also set on every other response.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", post(lookup))
        .route("/api.php", post(lookup))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

/// Serves the lookup API until `shutdown` resolves.
///
/// # Errors
/// If the address could not be bound or the server failed
pub async fn web_main(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()>,
) -> Result<(), hyper::Error> {
    let server = axum::Server::try_bind(&addr)?;
    tracing::info!("Lookup API listening on http://{addr}");

    server
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::BASE_OFFSET;

    fn configured() -> Settings {
        Settings {
            steam_api_key: "0123456789ABCDEF".into(),
            ..Default::default()
        }
    }

    #[test]
    fn validation_order() {
        let settings = configured();
        assert!(matches!(validate(None, &settings), Err(LookupError::MissingCode)));
        assert!(matches!(validate(Some("   "), &settings), Err(LookupError::MissingCode)));
        assert!(matches!(validate(Some("abc123"), &settings), Err(LookupError::BadFormat)));
        assert!(matches!(
            validate(Some("99999999999999999999999"), &settings),
            Err(LookupError::Conversion(_))
        ));

        // Input problems are reported before configuration problems.
        let unconfigured = Settings::default();
        assert!(matches!(validate(Some("x"), &unconfigured), Err(LookupError::BadFormat)));
        assert!(matches!(
            validate(Some("123"), &unconfigured),
            Err(LookupError::MissingApiKey)
        ));
    }

    #[test]
    fn valid_codes_are_trimmed() {
        let steamid = validate(Some(" 22202\n"), &configured()).expect("valid code");
        assert_eq!(u64::from(steamid), BASE_OFFSET + 22202);
    }

    #[test]
    fn error_statuses() {
        assert_eq!(LookupError::MissingCode.status(), StatusCode::BAD_REQUEST);
        assert_eq!(LookupError::MissingApiKey.status(), StatusCode::BAD_REQUEST);
        assert_eq!(LookupError::MalformedRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LookupError::NotFound(BASE_OFFSET).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn error_bodies() {
        let body = serde_json::to_value(LookupError::MissingCode.body()).expect("serializable");
        assert_eq!(body, serde_json::json!({ "error": "请输入好友代码" }));

        let body = serde_json::to_value(LookupError::MissingApiKey.body()).expect("serializable");
        assert_eq!(body["error"], "请配置 Steam API Key");
        assert!(body["message"].as_str().is_some_and(|m| m.contains("apikey")));
    }
}
