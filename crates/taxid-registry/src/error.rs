/// Errors raised while constructing a registry client.
///
/// A client that fails to build is not fatal to the process: startup logs the
/// error and leaves the corresponding handle absent (see
/// [`crate::config::bootstrap`]).
use taxid_core::RegistryError;

/// Failure to construct a registry client.
#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    /// The underlying HTTP client could not be built (TLS backend, proxy
    /// settings).
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// A credential could not be used in an HTTP header.
    #[error("invalid {service} credential: {reason}")]
    InvalidCredential {
        /// The service the credential belongs to.
        service: &'static str,
        /// Why it was refused.
        reason: String,
    },
}

/// Converts a send or body-read failure into a [`RegistryError`].
pub(crate) fn transport(err: &reqwest::Error) -> RegistryError {
    RegistryError::Transport(err.to_string())
}
