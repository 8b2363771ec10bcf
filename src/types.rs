use serde::Deserialize;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoDto {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoDto {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Filled in locally from the bundled color table, never sent by GitHub.
    #[serde(skip)]
    pub color_language_rgb: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicenseDto {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoDetailsDto {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub license: Option<LicenseDto>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    // `watchers_count` mirrors stars on the REST API; subscribers are the real watchers.
    #[serde(default)]
    pub subscribers_count: u32,
    pub default_branch: String,
}

/// Entry of the bundled language color table.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorJson {
    pub color: Option<String>,
    pub url: Option<String>,
}
