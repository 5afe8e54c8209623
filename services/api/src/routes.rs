//! API service routes

use async_graphql::http::{GraphiQLSource, parse_query_string};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRef, RawQuery, State},
    http::{
        HeaderMap, Method, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::error;

use crate::{
    config::BODY_LIMIT_BYTES,
    graphql::{AppSchema, build_schema},
    state::AppState,
};

/// State shared by the HTTP handlers
#[derive(Clone)]
pub struct RouterState {
    pub app: AppState,
    pub schema: AppSchema,
}

impl FromRef<RouterState> for AppState {
    fn from_ref(state: &RouterState) -> Self {
        state.app.clone()
    }
}

impl FromRef<RouterState> for AppSchema {
    fn from_ref(state: &RouterState) -> Self {
        state.schema.clone()
    }
}

/// Create the router for the API service
///
/// `/uploads` is only mounted when `serve_uploads` is set.
pub fn create_router(state: AppState, serve_uploads: bool) -> Router {
    let schema = build_schema(state.clone());
    let uploads_root = state.photos.root().to_path_buf();

    let mut router = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route("/uploads-info", get(uploads_info))
        .route("/graphql", get(graphql_get).post(graphql_handler));

    if serve_uploads {
        router = router.nest_service("/uploads", ServeDir::new(uploads_root));
    }

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(RouterState { app: state, schema })
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Welcome message
pub async fn welcome() -> &'static str {
    "Welcome to the Employee Management API"
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.database {
        Some(database) => match common::database::health_check(database).await {
            Ok(_) => "connected",
            Err(e) => {
                error!("Database health check failed: {}", e);
                "disconnected"
            }
        },
        None => "in-memory",
    };

    Json(json!({
        "status": "ok",
        "service": "employee-api",
        "database": database
    }))
}

/// Contents of the uploads directory
pub async fn uploads_info(State(state): State<AppState>) -> impl IntoResponse {
    let directory = state.photos.root().display().to_string();

    match state.photos.list().await {
        Ok(files) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "directory": directory,
                "fileCount": files.len(),
                "files": files
            })),
        ),
        Err(e) => {
            error!("Failed to list uploads: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": e.to_string(),
                    "directory": directory
                })),
            )
        }
    }
}

/// GraphiQL IDE
fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// `GET /graphql`
///
/// Browsers and requests without a `query` parameter get GraphiQL; anything
/// else is executed from the query string.
pub async fn graphql_get(
    State(schema): State<AppSchema>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.filter(|query| has_query_param(query));
    let Some(query) = query.filter(|_| !accepts_html(&headers)) else {
        return graphiql().into_response();
    };

    match parse_query_string(&query) {
        Ok(request) => GraphQLResponse::from(schema.execute(request).await).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

fn has_query_param(query: &str) -> bool {
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some("query"))
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// GraphQL handler
pub async fn graphql_handler(
    State(schema): State<AppSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}
