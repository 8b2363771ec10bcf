pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod github;
pub mod mapper;
pub mod models;
pub mod readme;
pub mod state;
pub mod storage;
pub mod token;
pub mod types;
pub mod view_model;

pub use error::{RepoViewerError, Result, Severity};
pub use github::{GitHubClient, RepositoryGateway};
pub use models::{Repo, RepoDetails, RepoTarget, UserInfo};
pub use state::{ReadmeState, ViewState};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use view_model::{RepoDetailsViewModel, ViewModelHandle};
