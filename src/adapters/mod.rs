// Adapters layer: concrete implementations for external systems (http listing, icon host).

pub mod http;

pub use http::{GitTreeCatalog, HttpIconProbe};
