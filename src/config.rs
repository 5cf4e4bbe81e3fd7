//! Settings read from the environment. Call `dotenvy::dotenv().ok()` first
//! to pick up a `.env` file.

use crate::auth::AuthMethod;
use crate::client::FeedbackOptions;
use crate::errors::{Result, SlidesApiError};
use std::env;
use std::path::PathBuf;

pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";
pub const OUTPUT_DIR_ENV: &str = "GSLIDES_OUTPUT_DIR";
pub const PDF_FEEDBACK_ENV: &str = "GSLIDES_PDF_FEEDBACK";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Service account key file.
    pub credentials_file: Option<PathBuf>,
    /// A bearer token to use as-is; wins over every other method.
    pub access_token: Option<String>,
    /// Billed for API quota, sent as `x-goog-user-project`.
    pub quota_project: Option<String>,
    /// Where feedback PDFs go. Defaults to the system temp dir.
    pub output_dir: Option<PathBuf>,
    pub pdf_feedback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            credentials_file: None,
            access_token: None,
            quota_project: None,
            output_dir: None,
            pdf_feedback: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let pdf_feedback = match get(PDF_FEEDBACK_ENV) {
            Some(value) => parse_flag(PDF_FEEDBACK_ENV, &value)?,
            None => true,
        };
        Ok(Config {
            credentials_file: get(CREDENTIALS_ENV).map(PathBuf::from),
            access_token: get(ACCESS_TOKEN_ENV),
            quota_project: get(PROJECT_ENV),
            output_dir: get(OUTPUT_DIR_ENV).map(PathBuf::from),
            pdf_feedback,
        })
    }

    /// Access token, then service account key, then Application Default
    /// Credentials.
    pub fn auth_method(&self) -> AuthMethod {
        if let Some(token) = &self.access_token {
            return AuthMethod::AccessToken(token.clone());
        }
        match &self.credentials_file {
            Some(key_path) => AuthMethod::ServiceAccount {
                key_path: key_path.clone(),
            },
            None => AuthMethod::ApplicationDefault,
        }
    }

    pub fn feedback_options(&self) -> FeedbackOptions {
        let mut options = if self.pdf_feedback {
            FeedbackOptions::default()
        } else {
            FeedbackOptions::disabled()
        };
        if let Some(dir) = &self.output_dir {
            options.output_dir = dir.clone();
        }
        options
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SlidesApiError::InvalidInput(format!(
            "{} must be true or false, got '{}'",
            key, other
        ))),
    }
}
