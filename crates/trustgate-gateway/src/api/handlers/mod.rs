//! Request handlers.

mod audit;
mod chat;
mod system;
mod verify;

pub use audit::get_audit;
pub use chat::chat;
pub use system::{health, signing_key};
pub use verify::verify;
