use thiserror::Error;

/// Errors raised while constructing environments, agents, and schedules
///
/// Every check happens at construction time. Once a component is built,
/// stepping, acting, and learning cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
