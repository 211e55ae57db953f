pub(crate) mod server;

pub use server::{router, AppState, HttpServer, HttpServerConfig, ListOrdersQuery};
