use thiserror::Error;

pub const NOT_AN_IMAGE: &str = "Please upload an image file";
pub const GENERATION_FAILED: &str = "Failed to generate code. Please try again.";

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("not an image: {0:?}")]
    NotAnImage(String),

    #[error("a design is already being analyzed")]
    Busy,

    #[error("GEMINI_API_KEY was not set when this build was made")]
    MissingApiKey,

    #[error("could not read file: {0}")]
    Read(String),

    #[error("could not build request: {0}")]
    Request(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("model API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not decode model response: {0}")]
    Decode(String),

    #[error("model refused to answer: {0}")]
    Blocked(String),

    #[error("model response contained no text")]
    EmptyResponse,
}

impl Error {
    /// The only text a failure ever puts on the page.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::NotAnImage(_) => NOT_AN_IMAGE,
            _ => GENERATION_FAILED,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
