// Adapters layer: concrete catalog implementations (remote http, in-memory).

pub mod http;
pub mod memory;

pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;
