//! # Chirpy
//!
//! A small backend for posting short text "chirps": users register, log in
//! with a password, and receive a short-lived access token plus a long-lived,
//! revocable refresh token. Users and chirps live in two JSON documents on
//! disk, each behind its own reader/writer lock.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use chirpy::config::Secrets;
//! use chirpy::server::{AppState, create_router};
//! use chirpy::store::{FileChirpStore, FileUserStore};
//!
//! let users = FileUserStore::open("./data/users.json").unwrap();
//! let chirps = FileChirpStore::open("./data/chirps.json").unwrap();
//! let secrets = Secrets::from_env().unwrap();
//!
//! let state = Arc::new(AppState::new(
//!     Arc::new(users),
//!     Arc::new(chirps),
//!     &secrets,
//!     PathBuf::from("."),
//! ));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `chirpy` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
