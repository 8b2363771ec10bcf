use crate::error::{RepoViewerError, Result};
use crate::models::RepoDetails;

/// Lifecycle of the README, independent from the repository metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeState {
    Loading,
    /// The repository has no README.
    Empty,
    Error,
    Loaded(String),
}

impl ReadmeState {
    pub fn from_readme(result: Result<String>) -> Self {
        match result {
            Ok(markdown) => ReadmeState::Loaded(markdown),
            Err(RepoViewerError::ReadmeNotFound) => ReadmeState::Empty,
            Err(_) => ReadmeState::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReadmeState::Error)
    }
}

/// What the detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error,
    Loaded { readme: ReadmeState, repo: RepoDetails },
}

impl ViewState {
    pub fn from_details(result: Result<RepoDetails>) -> Self {
        match result {
            Ok(repo) => ViewState::Loaded {
                readme: ReadmeState::Loading,
                repo,
            },
            Err(_) => ViewState::Error,
        }
    }

    /// Swap the README sub-state; only a loaded screen has one.
    pub fn with_readme(self, readme: ReadmeState) -> Self {
        match self {
            ViewState::Loaded { repo, .. } => ViewState::Loaded { readme, repo },
            other => other,
        }
    }

    pub fn repo(&self) -> Option<&RepoDetails> {
        match self {
            ViewState::Loaded { repo, .. } => Some(repo),
            _ => None,
        }
    }

    pub fn readme(&self) -> Option<&ReadmeState> {
        match self {
            ViewState::Loaded { readme, .. } => Some(readme),
            _ => None,
        }
    }

    /// Whether the state can still change without a retry.
    pub fn is_settled(&self) -> bool {
        match self {
            ViewState::Loading => false,
            ViewState::Error => true,
            ViewState::Loaded { readme, .. } => *readme != ReadmeState::Loading,
        }
    }
}
