//! Error types for the turtle controller

use thiserror::Error;

/// Turtle controller error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: String, value: f64 },

    #[error("failed to publish velocity command: {0}")]
    Publish(String),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
