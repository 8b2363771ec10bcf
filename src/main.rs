use anyhow::{bail, Context};
use clap::Parser;
use colored::*;
use repo_viewer::cli::{Cli, Command};
use repo_viewer::models::{Repo, RepoDetails, RepoTarget};
use repo_viewer::state::{ReadmeState, ViewState};
use repo_viewer::{FileTokenStore, GitHubClient, RepoDetailsViewModel, RepositoryGateway};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token_path = cli.token_path();
    let store = Arc::new(FileTokenStore::new(token_path.clone()));
    let gateway: Arc<dyn RepositoryGateway> = Arc::new(
        GitHubClient::new(cli.gateway_config(), store).context("Failed to create GitHub client")?,
    );

    match cli.command {
        Command::SignIn { token } => {
            let user = gateway.sign_in(&token).await?;
            println!("✅ Signed in as {}", user.login.bold().green());
        }
        Command::Repos => {
            let repos = gateway.get_repositories().await?;
            println!("{}", "Repositories".bold().green());
            println!("{}", "=".repeat(50).dimmed());
            for repo in &repos {
                print_repo(repo);
            }
            println!("\n📊 {} repositories", repos.len());
        }
        Command::Show { id, owner, name } => {
            let mut handle = RepoDetailsViewModel::spawn(gateway, RepoTarget::new(id, owner, name));
            let state = handle
                .settled()
                .await
                .context("Repository loader stopped unexpectedly")?;
            // A README failure gets one README-only retry before giving up.
            let readme_failed = matches!(state.readme(), Some(ReadmeState::Error));
            let state = if readme_failed {
                handle.retry().await.unwrap_or(state)
            } else {
                state
            };
            print_view_state(&state)?;
        }
        Command::Token => match gateway.get_token().await? {
            Some(_) => println!("✅ A token is stored in {}", token_path.display()),
            None => println!("{}", "No token stored. Run `repo-viewer sign-in <token>`.".yellow()),
        },
    }

    Ok(())
}

fn print_repo(repo: &Repo) {
    let swatch = match repo.color.as_deref().and_then(parse_hex_color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => " ".to_string(),
    };
    println!(
        "{} {} {} {}",
        swatch,
        repo.name.bold(),
        format!("#{}", repo.id).dimmed(),
        repo.language.cyan()
    );
    if !repo.description.is_empty() {
        println!("    {}", repo.description);
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn print_details(repo: &RepoDetails) {
    println!("{}", repo.name.bold().green());
    println!("{}", repo.html_user.underline());
    if !repo.description.is_empty() {
        println!("{}", repo.description);
    }
    println!("{}", "=".repeat(50).dimmed());
    if !repo.license.is_empty() {
        println!("📄 {}", repo.license);
    }
    if !repo.language.is_empty() {
        println!("💻 {}", repo.language);
    }
    println!(
        "⭐ {} stars   🍴 {} forks   👀 {} watchers   🌿 {}",
        repo.stars, repo.forks, repo.watchers, repo.branch
    );
    println!();
}

/// Fails when the repository or its README could not be loaded, after
/// printing whatever did load.
fn print_view_state(state: &ViewState) -> anyhow::Result<()> {
    match state {
        ViewState::Loading => println!("⏳ Loading..."),
        ViewState::Error => bail!("Could not load the repository. Try again."),
        ViewState::Loaded { readme, repo } => {
            print_details(repo);
            match readme {
                ReadmeState::Loading => println!("⏳ Loading README..."),
                ReadmeState::Empty => println!("{}", "No README.md".dimmed()),
                ReadmeState::Error => bail!("Could not load the README. Try again."),
                ReadmeState::Loaded(markdown) => println!("{}", markdown),
            }
        }
    }
    Ok(())
}
