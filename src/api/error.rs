#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("experiment api request failed: {0}")]
    Request(String),
    /// The server answered and refused; `message` is shown to the user as is.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("experiment api returned an unreadable response: {0}")]
    Decode(String),
}
