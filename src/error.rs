use std::io;

/// Result type alias for seekbuf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening sources or reading through a
/// [`BufferedReader`](crate::BufferedReader).
///
/// End of data is never an error on the bulk read path, it is reported as
/// `Ok(None)` by [`BufferedReader::read`](crate::BufferedReader::read).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying source failed to seek, read or close.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// `reset` was called before any `mark`.
    #[error("Resetting to invalid mark")]
    InvalidMark,

    /// A reader was configured with a buffer that cannot hold a single byte.
    #[error("Buffer capacity must be at least one byte")]
    ZeroCapacity,

    /// The server answered with a status that is neither success nor
    /// partial content.
    #[cfg(feature = "http")]
    #[error("HTTP status {status} for '{url}'")]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// The requested resource.
        url: String,
    },

    /// The request could not be sent or its body could not be read.
    #[cfg(feature = "http")]
    #[error("Request failed")]
    Request(#[source] reqwest::Error),

    /// The server did not report the total length of the resource.
    #[cfg(feature = "http")]
    #[error("Could not determine resource length: {0}")]
    InvalidContentRange(String),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            Error::InvalidMark => io::Error::new(io::ErrorKind::InvalidInput, err),
            Error::ZeroCapacity => io::Error::new(io::ErrorKind::InvalidInput, err),
            #[cfg(feature = "http")]
            other => io::Error::other(other),
        }
    }
}
