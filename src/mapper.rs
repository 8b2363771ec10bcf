//! Translation from GitHub wire records to domain records.

use crate::models::{Repo, RepoDetails, UserInfo};
use crate::types::{RepoDetailsDto, RepoDto, UserInfoDto};

const EMPTY_FIELD: &str = "";

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_else(|| EMPTY_FIELD.to_string())
}

pub fn map_user_info(dto: UserInfoDto) -> UserInfo {
    UserInfo { login: dto.login }
}

pub fn map_repo(dto: RepoDto) -> Repo {
    Repo {
        id: dto.id.to_string(),
        name: dto.name,
        description: or_empty(dto.description),
        language: or_empty(dto.language),
        color: dto.color_language_rgb,
    }
}

pub fn map_repo_details(dto: RepoDetailsDto) -> RepoDetails {
    RepoDetails {
        id: dto.id.to_string(),
        name: dto.name,
        html_user: dto.html_url,
        license: or_empty(dto.license.and_then(|license| license.name)),
        description: or_empty(dto.description),
        language: or_empty(dto.language),
        stars: dto.stargazers_count,
        forks: dto.forks_count,
        watchers: dto.subscribers_count,
        branch: dto.default_branch,
    }
}
