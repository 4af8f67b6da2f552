//! Places Backend - GraphQL service for place search, reviews, and favorites
//!
//! This is the main entry point for the Places backend API.
//! All operations are exposed via GraphQL at /graphql.

mod api;
mod config;
mod db;
mod events;
mod graphql;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::WebSocketUpgrade;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::events::ReviewEvents;
use crate::graphql::{AuthUser, PlacesSchema, verify_token};
use crate::services::{AuthConfig, AuthService, FacebookClient, Mailer, PlacesClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: PlacesSchema,
    pub auth: AuthService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "places_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Places Backend");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    let auth = AuthService::new(AuthConfig::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_days,
    ));
    let places_client = Arc::new(PlacesClient::new(config.google_api_key.clone()));
    let facebook_client = Arc::new(FacebookClient::new());
    let mailer = Mailer::from_config(&config)?;
    let events = ReviewEvents::new();

    let schema = graphql::build_schema(
        db.clone(),
        auth.clone(),
        places_client,
        facebook_client,
        mailer,
        events,
    );
    tracing::info!("GraphQL schema built");

    let cors_origin: HeaderValue = config
        .cors_origin
        .parse()
        .context("Invalid CORS_ORIGIN value")?;

    let state = AppState { db, schema, auth };

    let app = Router::new()
        .merge(api::health::router())
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = match config.host.as_deref() {
        Some(host) => format!("{}:{}", host, config.port)
            .parse()
            .context("Invalid HOST/PORT")?,
        None => SocketAddr::from(([0, 0, 0, 0], config.port)),
    };
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Extract bearer token from Authorization header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| h.starts_with("Bearer "))
        .map(|h| h[7..].to_string())
}

/// GraphQL query/mutation handler with auth context
///
/// Token verification is best-effort: a missing or invalid token leaves the
/// request without a session instead of rejecting it, and resolvers decide
/// what absence means for them.
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = extract_token(&headers)
        && let Ok(user) = verify_token(&state.auth, &token)
    {
        request = request.data(user);
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/graphql/ws")
                .finish(),
        )
        .into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// GraphQL WebSocket handler for subscriptions with auth
async fn graphql_ws_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
    protocol: async_graphql_axum::GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // Header auth covers clients that send the token with the upgrade
    // request; connection_init covers those that send it in the payload.
    let auth_user: Option<AuthUser> =
        extract_token(&headers).and_then(|token| verify_token(&state.auth, &token).ok());

    let auth = state.auth.clone();

    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            let mut ws =
                async_graphql_axum::GraphQLWebSocket::new(socket, state.schema.clone(), protocol);

            if let Some(user) = auth_user {
                let mut data = async_graphql::Data::default();
                data.insert(user);
                ws = ws.with_data(data);
            }

            ws.on_connection_init(move |params| async move {
                if let Some(token) = params
                    .get("Authorization")
                    .or_else(|| params.get("authorization"))
                    .and_then(|v| v.as_str())
                {
                    let token = token.strip_prefix("Bearer ").unwrap_or(token);
                    if let Ok(user) = verify_token(&auth, token) {
                        let mut data = async_graphql::Data::default();
                        data.insert(user);
                        return Ok(data);
                    }
                }
                Ok(async_graphql::Data::default())
            })
            .serve()
        })
}
