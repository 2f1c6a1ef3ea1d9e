pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;

pub use config::ApiConfig;
pub use router::create_router;
pub use session::Session;
pub use state::AppState;
