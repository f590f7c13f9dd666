pub mod errors;
pub mod routes;
pub mod server;

pub use routes::{build_router, AppState, CREATE_DOCUMENT_PATH};
pub use server::{run, serve, IngestApp};
