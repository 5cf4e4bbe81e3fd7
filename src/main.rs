use anyhow::Context;
use clap::Parser;
use gslides_llm_tools::auth::{AuthMethod, Credentials};
use gslides_llm_tools::client::GoogleClient;
use gslides_llm_tools::config::Config;
use gslides_llm_tools::mcp::McpServer;
use gslides_llm_tools::tools::slides;
use log::info;
use std::path::PathBuf;

/// MCP server exposing Google Slides, Drive and Sheets tools over stdio.
#[derive(Parser, Debug)]
#[command(name = "gslides-mcp", version, about)]
struct Cli {
    /// Service account key file (overrides GOOGLE_APPLICATION_CREDENTIALS).
    #[arg(long, value_name = "KEY_FILE")]
    credentials: Option<PathBuf>,

    /// OAuth client secret file; runs the installed-app flow.
    #[arg(long, value_name = "CLIENT_SECRET_FILE")]
    oauth: Option<PathBuf>,

    /// Where the installed-app flow caches tokens.
    #[arg(long, value_name = "PATH", default_value = "token_cache.json")]
    token_cache: PathBuf,

    /// Use Application Default Credentials.
    #[arg(long)]
    use_adc: bool,

    /// Quota project sent with every request (overrides GOOGLE_CLOUD_PROJECT).
    #[arg(long)]
    project: Option<String>,

    /// Directory for feedback PDFs (overrides GSLIDES_OUTPUT_DIR).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not export PDFs after changes.
    #[arg(long)]
    no_feedback: bool,

    /// Create a presentation to check the credentials, print its ID and exit.
    #[arg(long)]
    test_create_presentation: bool,
}

impl Cli {
    fn auth_method(&self, config: &Config) -> AuthMethod {
        if let Some(client_secret_path) = &self.oauth {
            AuthMethod::InstalledApp {
                client_secret_path: client_secret_path.clone(),
                token_cache_path: self.token_cache.clone(),
            }
        } else if let Some(key_path) = &self.credentials {
            AuthMethod::ServiceAccount {
                key_path: key_path.clone(),
            }
        } else if self.use_adc {
            AuthMethod::ApplicationDefault
        } else {
            config.auth_method()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // stdout carries protocol frames; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Invalid environment configuration")?;
    if cli.project.is_some() {
        config.quota_project = cli.project.clone();
    }
    if cli.output_dir.is_some() {
        config.output_dir = cli.output_dir.clone();
    }
    if cli.no_feedback {
        config.pdf_feedback = false;
    }

    let method = cli.auth_method(&config);
    info!("Authenticating with {:?}", AuthKind(&method));
    let credentials = Credentials::authenticate(method)
        .await
        .context("Failed to set up Google credentials")?
        .with_quota_project(config.quota_project.clone());

    let feedback = config.feedback_options();
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    }
    let client = GoogleClient::from_credentials(credentials).with_feedback(feedback);

    if cli.test_create_presentation {
        let output = slides::create_presentation(&client, "gslides-mcp test presentation")
            .await
            .context("Test presentation could not be created")?;
        println!("{}", output.response.presentation_id);
        return Ok(());
    }

    info!("Serving {} tools on stdio", gslides_llm_tools::mcp::tool_definitions().len());
    McpServer::new(client)
        .serve_stdio()
        .await
        .context("MCP server stopped")?;
    Ok(())
}

/// Logs the auth method without the token.
struct AuthKind<'a>(&'a AuthMethod);

impl std::fmt::Debug for AuthKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            AuthMethod::AccessToken(_) => f.write_str("AccessToken(..)"),
            other => write!(f, "{:?}", other),
        }
    }
}
