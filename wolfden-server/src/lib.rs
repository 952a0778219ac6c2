pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod net;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use routes::build_router;
pub use server::serve;
pub use state::AppState;
