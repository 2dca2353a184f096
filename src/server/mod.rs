mod admin;
mod chirps;
pub mod dto;
pub mod response;
mod router;
mod sessions;
mod users;
pub mod validation;
mod webhooks;

pub use router::{AppState, create_router};
