//! Cross-cutting utilities: error envelope, logging, time

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResponse, AppResult};
