//! Client-side session state
//!
//! Keeps the signed-in user's token in memory and mirrors it to a
//! [`TokenStorage`] backend so the session survives restarts. Exchanging
//! the token for a fresh one is delegated to a [`TokenRefresher`].

mod session;
mod storage;
mod token;

pub use session::*;
pub use storage::*;
pub use token::*;
