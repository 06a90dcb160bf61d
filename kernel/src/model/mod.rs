pub mod auth;
pub mod event;
pub mod id;
pub mod list;
pub mod member;
pub mod role;
