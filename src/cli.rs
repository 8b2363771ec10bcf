use crate::config::{
    default_token_file, GatewayConfig, API_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::readme::RAW_GITHUB_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "repo-viewer")]
#[command(about = "Repo Viewer - Browse your GitHub repositories and their READMEs")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Raw content host used for READMEs and their images
    #[arg(long, env = "GITHUB_RAW_URL", default_value = RAW_GITHUB_URL)]
    pub raw_url: String,

    /// File the personal access token is stored in [default: ~/.repo-viewer/token.json]
    #[arg(long, env = "REPO_VIEWER_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "REPO_VIEWER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Retries after a GitHub server error
    #[arg(long, env = "REPO_VIEWER_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a personal access token against GitHub and store it
    SignIn {
        /// Classic personal access token (ghp_...)
        token: String,
    },

    /// List the signed-in user's repositories
    Repos,

    /// Show a repository with its README
    Show {
        /// Numeric repository id, as printed by `repos`
        #[arg(long)]
        id: String,

        /// Repository owner login
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        name: String,
    },

    /// Report whether a token is stored
    Token,
}

impl Cli {
    pub fn token_path(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(default_token_file)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_base_url: self.api_url.clone(),
            raw_base_url: self.raw_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            max_retries: self.max_retries,
            ..Default::default()
        }
    }
}
