//! Items HTTP server.
//!
//! Exposes the listing service over HTTP:
//! - `GET /items?itemIDs=a,b&offset=0&limit=10`
//! - `GET /ping`
//! - `GET /health`

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::errors::{ListItemsError, ValidationError};
use crate::domain::models::{Item, ListItemsRequest, ListItemsResult, ListingConfig, PageMetadata, ServerConfig};
use crate::domain::ports::ItemRepository;
use crate::services::ItemService;

/// Configuration for the items HTTP server.
#[derive(Debug, Clone)]
pub struct ItemsHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for ItemsHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ItemsHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            enable_cors: config.enable_cors,
        }
    }
}

/// Query parameters for item listing.
///
/// `itemIDs` is a comma-separated list; blank segments are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    /// Comma-separated ids to narrow the listing to.
    #[serde(default, rename = "itemIDs")]
    pub item_ids: Option<String>,
    /// Items to skip; defaults to 0.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Page size; defaults to the configured default limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListItemsQuery {
    fn into_request(self, default_limit: usize) -> ListItemsRequest {
        let item_ids = self
            .item_ids
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        ListItemsRequest {
            item_ids,
            offset: self.offset.unwrap_or(0),
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

/// An item as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Description, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            description: item.description,
        }
    }
}

/// Response for an item listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemsResponse {
    /// Items in the page.
    #[serde(rename = "_items")]
    pub items: Vec<ItemResponse>,
    /// Paging metadata.
    #[serde(rename = "_metadata")]
    pub metadata: PageMetadata,
}

impl From<ListItemsResult> for ListItemsResponse {
    fn from(page: ListItemsResult) -> Self {
        Self {
            items: page.items.into_iter().map(ItemResponse::from).collect(),
            metadata: page.metadata,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable machine-readable code.
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

impl From<ValidationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ValidationError) -> Self {
        error_response(StatusCode::BAD_REQUEST, err.to_string(), "INVALID_REQUEST")
    }
}

impl From<ListItemsError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ListItemsError) -> Self {
        match err {
            ListItemsError::Cancelled => {
                error_response(StatusCode::SERVICE_UNAVAILABLE, "request cancelled", "CANCELLED")
            }
            ListItemsError::Upstream(source) => {
                tracing::error!(error = %source, "unable to list items");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "unable to list items", "LIST_ERROR")
            }
        }
    }
}

/// Shared state for the items HTTP server.
struct AppState<R: ItemRepository> {
    service: ItemService<R>,
    listing: ListingConfig,
    /// Parent of every per-request cancellation token.
    shutdown: CancellationToken,
}

/// Items HTTP Server.
pub struct ItemsHttpServer<R: ItemRepository + 'static> {
    config: ItemsHttpConfig,
    listing: ListingConfig,
    service: ItemService<R>,
    shutdown: CancellationToken,
}

impl<R: ItemRepository + 'static> ItemsHttpServer<R> {
    /// Create a server for `service` bounded by `listing`.
    pub fn new(service: ItemService<R>, config: ItemsHttpConfig, listing: ListingConfig) -> Self {
        Self {
            config,
            listing,
            service,
            shutdown: CancellationToken::new(),
        }
    }

    /// Build the router.
    pub fn router(self) -> Router {
        let state = Arc::new(AppState {
            service: self.service,
            listing: self.listing,
            shutdown: self.shutdown,
        });

        let app = Router::new()
            .route("/items", get(list_items::<R>))
            .route("/ping", get(ping))
            .route("/health", get(health_check))
            .with_state(state);

        with_middleware(app, &self.config)
    }

    /// Start the server and run until `shutdown` resolves.
    ///
    /// In-flight store lookups are cancelled once shutdown begins.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let token = self.shutdown.clone();
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "items HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("shutdown requested, cancelling in-flight lookups");
                token.cancel();
            })
            .await?;
        Ok(())
    }
}

/// Wrap `app` in the shared middleware stack.
///
/// Outermost first: request id assignment, tracing, request id echo,
/// optional CORS, panic recovery, timeout.
fn with_middleware(app: Router, config: &ItemsHttpConfig) -> Router {
    let app = app
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(CatchPanicLayer::custom(panic_response));

    let app = if config.enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
    } else {
        app
    };

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "request handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error", "INTERNAL_ERROR").into_response()
}

// Handler functions

async fn ping() -> &'static str {
    "pong"
}

async fn health_check() -> &'static str {
    "OK"
}

async fn list_items<R: ItemRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> Result<Json<ListItemsResponse>, ApiError> {
    let Query(query) = query
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text(), "INVALID_REQUEST"))?;

    let request = query.into_request(state.listing.default_limit);
    request.validate(&state.listing)?;

    let cancel = state.shutdown.child_token();
    let page = state.service.list_items(&request, &cancel).await?;

    Ok(Json(ListItemsResponse::from(page)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_splits_item_ids() {
        let query = ListItemsQuery {
            item_ids: Some("item_1, item_2,,item_3".to_string()),
            offset: Some(4),
            limit: None,
        };
        let request = query.into_request(20);
        assert_eq!(request.item_ids, vec!["item_1", "item_2", "item_3"]);
        assert_eq!(request.offset, 4);
        assert_eq!(request.limit, 20);
    }

    #[test]
    fn test_empty_query_is_unfiltered() {
        let request = ListItemsQuery::default().into_request(10);
        assert!(!request.is_filtered());
        assert_eq!((request.offset, request.limit), (0, 10));
    }

    #[test]
    fn test_response_json_shape() {
        let page = ListItemsResult::new(
            vec![Item::new("x", "n").with_category("c").with_description("d")],
            PageMetadata::new(10, 0, 1),
        );
        let json = serde_json::to_value(ListItemsResponse::from(page)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_items": [{"id": "x", "name": "n", "category": "c", "description": "d"}],
                "_metadata": {"limit": 10, "offset": 0, "total": 1, "hasNext": false}
            })
        );
    }

    #[test]
    fn test_upstream_error_is_generic_500() {
        let (status, Json(body)) = ApiError::from(ListItemsError::Upstream(
            crate::domain::errors::StoreError::Query("secret detail".to_string()),
        ));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "LIST_ERROR");
        assert!(!body.error.contains("secret"));
    }

    mod middleware {
        use super::*;
        use axum::body::Body;
        use axum::http::Request;
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        fn app(request_timeout: Duration) -> Router {
            let routes = Router::new()
                .route("/boom", get(|| async { panic!("handler exploded") as () }))
                .route(
                    "/slow",
                    get(|| async {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        "late"
                    }),
                )
                .route("/ping", get(ping));

            let config = ItemsHttpConfig {
                request_timeout,
                ..ItemsHttpConfig::default()
            };
            with_middleware(routes, &config)
        }

        fn request(uri: &str) -> Request<Body> {
            Request::builder().uri(uri).body(Body::empty()).unwrap()
        }

        #[tokio::test]
        async fn test_panicking_handler_returns_500() {
            let response = app(Duration::from_secs(10)).oneshot(request("/boom")).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(response.headers().contains_key("x-request-id"));

            let body = response.into_body().collect().await.unwrap().to_bytes();
            let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
            assert_eq!(error.code, "INTERNAL_ERROR");
            assert!(!error.error.contains("exploded"));
        }

        #[tokio::test]
        async fn test_request_id_is_generated() {
            let response = app(Duration::from_secs(10)).oneshot(request("/ping")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
            assert!(!id.is_empty());
        }

        #[tokio::test]
        async fn test_request_id_is_echoed() {
            let request = Request::builder()
                .uri("/ping")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap();

            let response = app(Duration::from_secs(10)).oneshot(request).await.unwrap();
            assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
        }

        #[tokio::test]
        async fn test_slow_handler_times_out_with_408() {
            let response = app(Duration::from_millis(20)).oneshot(request("/slow")).await.unwrap();
            assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        }
    }

    #[test]
    fn test_http_config_from_server_config() {
        let config = ItemsHttpConfig::from(&ServerConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.enable_cors);
    }
}
