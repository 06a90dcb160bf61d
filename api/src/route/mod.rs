pub mod auth;
pub mod event;
pub mod health;
pub mod index;

use axum::Router;
use registry::AppRegistry;

use self::{
    auth::build_auth_routers, event::build_event_routers, health::build_health_check_routers,
    index::build_index_routers,
};

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_index_routers())
        .merge(build_event_routers())
}
