//! HTTP surface: the GraphQL endpoint and the sandbox page.

use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AuthSession, SeaOrmSessionStore, SessionChange, SESSION_COOKIE};
use crate::error::StorageError;
use crate::graphql::AppSchema;

#[derive(Clone)]
pub struct AppState {
    pub schema: AppSchema,
    pub sessions: Arc<SeaOrmSessionStore>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(apollo_sandbox).post(graphql_handler))
        .route("/", get(apollo_sandbox))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// GraphQL handler.
///
/// Resolves the session cookie to a user before execution and turns any
/// login/logout recorded during execution into a `Set-Cookie` header.
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    let session = match resolve_session(&state, &headers).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("session lookup failed: {}", e);
            AuthSession::anonymous()
        }
    };

    let graphql_response: GraphQLResponse = state
        .schema
        .execute(req.into_inner().data(session.clone()))
        .await
        .into();
    let mut response = graphql_response.into_response();

    if let Some(change) = session.take_change() {
        let cookie = match change {
            SessionChange::LoggedIn { session_id } => format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                SESSION_COOKIE,
                session_id,
                state.sessions.ttl().as_secs()
            ),
            SessionChange::LoggedOut => {
                format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
            }
        };
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthSession, StorageError> {
    let Some(id) = session_id_from_headers(headers) else {
        return Ok(AuthSession::anonymous());
    };
    match state.sessions.resolve(&id).await? {
        Some(current) => Ok(AuthSession::authenticated(id, current)),
        None => Ok(AuthSession::anonymous()),
    }
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Apollo Sandbox handler.
async fn apollo_sandbox() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Scribe - Apollo Sandbox</title>
    <style>body { margin: 0; overflow: hidden; }</style>
</head>
<body>
    <div id="sandbox" style="width: 100vw; height: 100vh;"></div>
    <script src="https://embeddable-sandbox.cdn.apollographql.com/_latest/embeddable-sandbox.umd.production.min.js"></script>
    <script>
        new window.EmbeddedSandbox({
            target: '#sandbox',
            initialEndpoint: window.location.origin + '/graphql',
        });
    </script>
</body>
</html>"#,
    )
}
