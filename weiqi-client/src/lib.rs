pub mod config;
pub mod session;
pub mod validator;

pub use config::ClientConfig;
pub use session::GameSession;
pub use validator::{MoveRecord, MoveValidator, ValidationError};
