//! HAL（`application/hal+json`）形式のレスポンスを組み立てるための型。

use std::collections::BTreeMap;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::error::HAL_JSON;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// rel 名からリンクへの対応表。`_links` としてシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rel: &str, href: impl Into<String>) {
        self.0.insert(rel.to_string(), Link { href: href.into() });
    }

    pub fn with(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.add(rel, href);
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }
}

/// リソース本体のフィールドと `_links` を同じ階層に並べる。
#[derive(Debug, Serialize)]
pub struct EntityModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> EntityModel<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: Links::new(),
        }
    }

    pub fn with_link(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.links.add(rel, href);
        self
    }
}

pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, HAL_JSON)], Json(self.0)).into_response()
    }
}
