use thiserror::Error;

/// Represents errors that can occur when calling the Slides, Drive or Sheets APIs
/// or when building a tool request.
#[derive(Error, Debug)]
pub enum SlidesApiError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Error occurred during the (de)serialization of a JSON body.
    #[error("Failed to deserialize JSON response: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// An error reported by the Google API itself (e.g., 4xx or 5xx status code).
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// An error related to authentication or authorization setup.
    #[error("Authentication setup/configuration error: {0}")]
    AuthSetupError(String),

    /// An error specifically from the authentication library (yup-oauth2) during token fetching/validation.
    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    #[error("Authentication library error: {0}")]
    AuthLibError(#[from] yup_oauth2::Error),

    /// An error indicating invalid input was provided to a tool.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A slide index outside `0..len`.
    #[error("Slide index {index} is out of range. The presentation has {len} slides.")]
    SlideIndexOutOfRange { index: usize, len: usize },

    /// No slide with the given object ID exists in the presentation.
    #[error("Slide with ID {0} not found in presentation")]
    SlideNotFound(String),

    /// A color string that is not `#RRGGBB`.
    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    /// A Sheets range that returned no values.
    #[error("No data found in the specified range: {0}")]
    EmptyRange(String),

    /// An error related to reading environment variables.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    /// An I/O error occurred, e.g. writing an exported PDF or reading a key file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An unexpected or unknown error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// A type alias for `Result<T, SlidesApiError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, SlidesApiError>;
