//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine is shut down; new work is not accepted")]
    ShutDown,
}
