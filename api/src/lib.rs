pub mod extractor;
pub mod hal;
pub mod handler;
pub mod model;
pub mod route;
