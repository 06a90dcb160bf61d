use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::event::{register_event, show_event, show_event_list, update_event};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", post(register_event).get(show_event_list))
        .route("/:event_id", get(show_event).put(update_event));

    Router::new().nest("/api/events", events_routers)
}
