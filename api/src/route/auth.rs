use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::auth::issue_token;

pub fn build_auth_routers() -> Router<AppRegistry> {
    Router::new().route("/oauth/token", post(issue_token))
}
