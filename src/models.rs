use serde::{Deserialize, Serialize};

/// Signed-in GitHub account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub login: String,
}

/// Repository as shown in the list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub language: String,
    /// Display color for `language`, when the bundled table knows it.
    pub color: Option<String>,
}

/// Repository metadata as shown in the detail screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetails {
    pub id: String,
    pub name: String,
    #[serde(rename = "htmlUser")]
    pub html_user: String,
    pub license: String,
    pub description: String,
    pub language: String,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    /// Default branch, used to locate the README.
    pub branch: String,
}

/// Repository the detail screen is opened for
///
/// The README branch is not part of the target; it comes from the fetched
/// [`RepoDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTarget {
    pub id: String,
    pub owner: String,
    pub name: String,
}

impl RepoTarget {
    pub fn new(id: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }
}
