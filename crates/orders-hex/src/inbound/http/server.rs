use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    serve, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::api_doc::ApiDoc;
use crate::application::order_service::OrderService;
use crate::config::ProfileInfo;
use crate::errors::AppError;
use orders_types::domain::order::{Order, OrderInput, ValidationErrors};
use orders_types::domain::page::{Page, PageRequest, Sort, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use orders_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    pub profile: ProfileInfo,
}

pub struct HttpServer<R>
where
    R: OrderRepository,
{
    pub service: Arc<OrderService<R>>,
    pub config: HttpServerConfig,
}

/// Shared handler state: the order service plus the startup profile values.
pub struct AppState<R: OrderRepository> {
    pub service: Arc<OrderService<R>>,
    pub profile: Arc<ProfileInfo>,
}

impl<R: OrderRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            profile: self.profile.clone(),
        }
    }
}

/// `GET /api/orders?page=0&size=20&sort=price,desc`
///
/// Negative page numbers read as page 0 and sizes below 1 as the default size.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl ListOrdersQuery {
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        let sort = match self.sort.as_deref() {
            None | Some("") => Sort::default(),
            Some(s) => s
                .parse::<Sort>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        };
        let page = self.page.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
        let size = match self.size {
            Some(s) if s >= 1 => s.min(i64::from(MAX_PAGE_SIZE)) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };
        Ok(PageRequest::new(page, size, sort))
    }
}

impl<R> HttpServer<R>
where
    R: OrderRepository,
{
    pub async fn new(service: OrderService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let state = AppState {
            service: self.service.clone(),
            profile: Arc::new(self.config.profile.clone()),
        };
        let app = router(state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!(
            profile = %self.config.profile.active_profile,
            "starting server on {}",
            addr
        );
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

/// Builds the full application router, request tracing included.
pub fn router<R>(state: AppState<R>) -> Router
where
    R: OrderRepository,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "http_request",
                %request_id,
                method = %request.method(),
                uri
            )
        })
        .on_request(
            |request: &axum::extract::Request<_>, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    method = %request.method(),
                    uri = %request.uri(),
                    "request"
                );
            },
        )
        .on_response(
            |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    status = %response.status(),
                    latency_ms = %latency.as_millis(),
                    "response"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .route("/api/config/profile", get(profile::<R>))
        .route(
            "/api/orders",
            get(list_orders::<R>).post(create_order::<R>),
        )
        .route(
            "/api/orders/{id}",
            get(get_order::<R>)
                .put(update_order::<R>)
                .delete(delete_order::<R>),
        )
        .layer(trace_layer)
        .with_state(state)
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|e| AppError::BadRequest(format!("invalid order id {raw:?}: {e}")))
}

fn json_body(payload: Result<Json<OrderInput>, JsonRejection>) -> Result<OrderInput, AppError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/api/config/profile",
    tag = "config",
    responses((status = 200, description = "Active profile and welcome message", body = ProfileInfo))
)]
async fn profile<R>(State(state): State<AppState<R>>) -> Json<ProfileInfo>
where
    R: OrderRepository,
{
    Json(state.profile.as_ref().clone())
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = OrderInput,
    responses(
        (status = 201, description = "Order stored", body = Order),
        (status = 400, description = "Invalid payload", body = ValidationErrors)
    )
)]
async fn create_order<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError>
where
    R: OrderRepository,
{
    let order = state.service.create_order(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    params(
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size, 1 to 2000"),
        ("sort" = Option<String>, Query, description = "`field` or `field,asc|desc`")
    ),
    responses(
        (status = 200, description = "One page of orders", body = Page<Order>),
        (status = 400, description = "Unknown sort field or direction")
    )
)]
async fn list_orders<R>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<Json<Page<Order>>, AppError>
where
    R: OrderRepository,
{
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let page = state.service.list_orders(query.into_page_request()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "No order with this id")
    )
)]
async fn get_order<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository,
{
    let order = state.service.get_order(parse_id(&id)?).await?;
    Ok(Json(order))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderInput,
    responses(
        (status = 200, description = "Order replaced", body = Order),
        (status = 400, description = "Invalid payload", body = ValidationErrors),
        (status = 404, description = "No order with this id")
    )
)]
async fn update_order<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository,
{
    let id = parse_id(&id)?;
    let updated = state.service.update_order(id, json_body(payload)?).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order removed"),
        (status = 404, description = "No order with this id")
    )
)]
async fn delete_order<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: OrderRepository,
{
    state.service.delete_order(parse_id(&id)?).await?;
    Ok(StatusCode::OK)
}
