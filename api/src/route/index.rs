use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::index::index;

pub fn build_index_routers() -> Router<AppRegistry> {
    Router::new().route("/api", get(index))
}
