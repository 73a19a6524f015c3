use thiserror::Error;

pub mod credentials;
pub mod locations;
pub mod map;

/// Failure of a request to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Fetch(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl TransportError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }
}
