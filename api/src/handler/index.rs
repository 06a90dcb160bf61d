use axum::response::IntoResponse;
use serde::Serialize;

use crate::{
    hal::{Hal, Links},
    model::event::EVENTS_PATH,
};

#[derive(Serialize)]
struct IndexResponse {
    #[serde(rename = "_links")]
    links: Links,
}

// API の入り口。エラーレスポンスからもここへリンクする
pub async fn index() -> impl IntoResponse {
    Hal(IndexResponse {
        links: Links::new().with("events", EVENTS_PATH),
    })
}
