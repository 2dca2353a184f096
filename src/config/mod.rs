mod secrets;
mod server;

pub use secrets::Secrets;
pub use server::ServerConfig;
