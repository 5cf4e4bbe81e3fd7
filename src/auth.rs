//! Credential acquisition for the Slides, Drive and Sheets APIs.
//!
//! The OAuth flows themselves are delegated to `yup-oauth2`; this module only
//! picks a flow and hands out bearer tokens for the default scopes.

use crate::errors::{Result, SlidesApiError};
use log::debug;
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
use yup_oauth2::authenticator::DefaultAuthenticator;

/// Scopes requested when none are given explicitly.
pub const DEFAULT_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/spreadsheets",
];

/// How to obtain credentials.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMethod {
    /// A service account key file.
    ServiceAccount { key_path: PathBuf },
    /// The installed-app OAuth flow; tokens are cached at `token_cache_path`.
    InstalledApp {
        client_secret_path: PathBuf,
        token_cache_path: PathBuf,
    },
    /// Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
    /// then the gcloud `application-default login` file, then the metadata server.
    ApplicationDefault,
    /// A ready-made bearer token. No refresh.
    AccessToken(String),
}

enum TokenSource {
    Static(String),
    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    Authenticator(DefaultAuthenticator),
}

/// Authorized credentials: a token source plus the scopes and quota project
/// used for every call.
pub struct Credentials {
    source: TokenSource,
    scopes: Vec<String>,
    quota_project: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            TokenSource::Static(_) => "static",
            #[cfg(not(target_arch = "wasm32"))]
            #[cfg(feature = "yup-oauth2")]
            TokenSource::Authenticator(_) => "oauth2",
        };
        f.debug_struct("Credentials")
            .field("source", &source)
            .field("scopes", &self.scopes)
            .field("quota_project", &self.quota_project)
            .finish()
    }
}

impl Credentials {
    /// Wraps a bearer token obtained elsewhere.
    pub fn from_access_token(token: impl Into<String>) -> Self {
        Credentials {
            source: TokenSource::Static(token.into()),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            quota_project: None,
        }
    }

    /// Runs the selected flow and returns ready-to-use credentials.
    pub async fn authenticate(method: AuthMethod) -> Result<Self> {
        let source = match method {
            AuthMethod::AccessToken(token) => {
                if token.trim().is_empty() {
                    return Err(SlidesApiError::AuthSetupError(
                        "Access token cannot be empty".to_string(),
                    ));
                }
                TokenSource::Static(token)
            }
            #[cfg(not(target_arch = "wasm32"))]
            #[cfg(feature = "yup-oauth2")]
            other => TokenSource::Authenticator(oauth::build_authenticator(other).await?),
            #[cfg(not(all(not(target_arch = "wasm32"), feature = "yup-oauth2")))]
            other => {
                return Err(SlidesApiError::AuthSetupError(format!(
                    "{:?} requires the `yup-oauth2` feature",
                    other
                )))
            }
        };

        Ok(Credentials {
            source,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            quota_project: None,
        })
    }

    /// Replaces the requested scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Bills API usage to `project` (sent as `x-goog-user-project`).
    pub fn with_quota_project(mut self, project: Option<String>) -> Self {
        self.quota_project = project;
        self
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn quota_project(&self) -> Option<&str> {
        self.quota_project.as_deref()
    }

    /// Returns a bearer token valid for the configured scopes, refreshing it
    /// through the OAuth flow when needed.
    pub async fn access_token(&self) -> Result<String> {
        match &self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            #[cfg(not(target_arch = "wasm32"))]
            #[cfg(feature = "yup-oauth2")]
            TokenSource::Authenticator(auth) => {
                let token = auth.token(&self.scopes).await?;
                debug!("Obtained OAuth token for {} scopes", self.scopes.len());
                token.token().map(str::to_string).ok_or_else(|| {
                    SlidesApiError::AuthSetupError(
                        "OAuth token unexpectedly missing token field".to_string(),
                    )
                })
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
mod oauth {
    use super::AuthMethod;
    use crate::errors::{Result, SlidesApiError};
    use log::{debug, info};
    use std::env;
    use std::future::Future;
    use std::path::{Path, PathBuf};
    use std::pin::Pin;
    use yup_oauth2::authenticator::{ApplicationDefaultCredentialsTypes, DefaultAuthenticator};
    use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
    use yup_oauth2::{
        read_application_secret, read_authorized_user_secret, read_service_account_key,
        ApplicationDefaultCredentialsAuthenticator, ApplicationDefaultCredentialsFlowOpts,
        AuthorizedUserAuthenticator, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
        ServiceAccountAuthenticator,
    };

    /// Prints the consent URL on stderr; stdout may be carrying protocol frames.
    struct StderrFlowDelegate;

    impl InstalledFlowDelegate for StderrFlowDelegate {
        fn present_user_url<'a>(
            &'a self,
            url: &'a str,
            _need_code: bool,
        ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
            Box::pin(async move {
                eprintln!("Open this URL in your browser to authorize access:\n{}", url);
                Ok(String::new())
            })
        }
    }

    pub(super) async fn build_authenticator(method: AuthMethod) -> Result<DefaultAuthenticator> {
        match method {
            AuthMethod::ServiceAccount { key_path } => service_account(&key_path).await,
            AuthMethod::InstalledApp {
                client_secret_path,
                token_cache_path,
            } => {
                let secret = read_application_secret(&client_secret_path)
                    .await
                    .map_err(|e| {
                        SlidesApiError::AuthSetupError(format!(
                            "Failed to read OAuth client secret from '{}': {}",
                            client_secret_path.display(),
                            e
                        ))
                    })?;
                info!("Using installed-app OAuth flow");
                Ok(InstalledFlowAuthenticator::builder(
                    secret,
                    InstalledFlowReturnMethod::HTTPRedirect,
                )
                .persist_tokens_to_disk(token_cache_path)
                .flow_delegate(Box::new(StderrFlowDelegate))
                .build()
                .await?)
            }
            AuthMethod::ApplicationDefault => application_default().await,
            AuthMethod::AccessToken(_) => Err(SlidesApiError::AuthSetupError(
                "Access tokens do not need an authenticator".to_string(),
            )),
        }
    }

    async fn service_account(key_path: &Path) -> Result<DefaultAuthenticator> {
        let sa_key = read_service_account_key(key_path).await.map_err(|e| {
            SlidesApiError::AuthSetupError(format!(
                "Failed to read service account key from '{}': {}",
                key_path.display(),
                e
            ))
        })?;
        info!("Using service account {}", sa_key.client_email);
        Ok(ServiceAccountAuthenticator::builder(sa_key).build().await?)
    }

    /// Location of the file written by `gcloud auth application-default login`.
    fn gcloud_adc_path() -> Option<PathBuf> {
        let config_dir = match env::var_os("CLOUDSDK_CONFIG") {
            Some(dir) => PathBuf::from(dir),
            None if cfg!(windows) => PathBuf::from(env::var_os("APPDATA")?).join("gcloud"),
            None => PathBuf::from(env::var_os("HOME")?)
                .join(".config")
                .join("gcloud"),
        };
        Some(config_dir.join("application_default_credentials.json"))
    }

    async fn application_default() -> Result<DefaultAuthenticator> {
        if env::var_os("GOOGLE_APPLICATION_CREDENTIALS").is_none() {
            if let Some(path) = gcloud_adc_path().filter(|p| p.exists()) {
                debug!("Using gcloud ADC file {}", path.display());
                let secret = read_authorized_user_secret(&path).await.map_err(|e| {
                    SlidesApiError::AuthSetupError(format!(
                        "Failed to read gcloud credentials from '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                return Ok(AuthorizedUserAuthenticator::builder(secret).build().await?);
            }
        }

        let opts = ApplicationDefaultCredentialsFlowOpts::default();
        let auth = match ApplicationDefaultCredentialsAuthenticator::builder(opts).await {
            ApplicationDefaultCredentialsTypes::ServiceAccount(builder) => {
                info!("Using ADC service account from GOOGLE_APPLICATION_CREDENTIALS");
                builder.build().await?
            }
            ApplicationDefaultCredentialsTypes::InstanceMetadata(builder) => {
                info!("Using ADC from the instance metadata server");
                builder.build().await?
            }
        };
        Ok(auth)
    }
}
