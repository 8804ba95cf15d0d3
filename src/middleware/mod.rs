pub mod cors;
pub mod request_id;

pub use cors::{apply_cors_headers, Cors, CorsLayer};
pub use request_id::{request_id_middleware, RequestId};
