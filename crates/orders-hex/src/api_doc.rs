//! OpenAPI descriptor served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::config::ProfileInfo;
use crate::inbound::http::server;
use orders_types::domain::order::{FieldError, Order, OrderInput, ValidationErrors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order System API",
        version = "1.0.0",
        description = "RESTful API for managing orders."
    ),
    paths(
        server::create_order,
        server::list_orders,
        server::get_order,
        server::update_order,
        server::delete_order,
        server::profile
    ),
    components(schemas(Order, OrderInput, FieldError, ValidationErrors, ProfileInfo)),
    tags(
        (name = "orders", description = "Order CRUD endpoints"),
        (name = "config", description = "Runtime configuration")
    )
)]
pub struct ApiDoc;
