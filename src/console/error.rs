#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Please enter a SQL query")]
    Validation,

    #[error("a query is already running")]
    Busy,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The query endpoint could not be reached or its body could not be read.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// A failure reported by a transport that is not backed by reqwest.
    #[error("{0}")]
    Message(String),
}
