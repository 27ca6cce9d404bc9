#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    /// Non-2xx API response. Display shows the server's details line, which
    /// is what gets recorded as the user-facing error message.
    #[error("{details}")]
    Api { status: u16, details: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}
