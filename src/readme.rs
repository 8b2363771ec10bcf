//! Rewrites relative image references in a README so they resolve against
//! the raw-content host instead of the viewer.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const RAW_GITHUB_URL: &str = "https://raw.githubusercontent.com";

fn image_reference() -> &'static Regex {
    static IMAGE_REFERENCE: OnceLock<Regex> = OnceLock::new();
    IMAGE_REFERENCE.get_or_init(|| {
        Regex::new(concat!(
            r#"!\[(?P<alt>[^\]]*)\]\((?:<(?P<angle>[^>\n]+)>|(?P<md>[^)\s]+))(?P<title>[^)]*)\)"#,
            r#"|(?P<head><img\b[^>]*?\bsrc\s*=\s*["'])(?P<html>[^"'>]+)(?P<quote>["'])"#,
        ))
        .expect("image pattern is valid")
    })
}

fn url_scheme() -> &'static Regex {
    static URL_SCHEME: OnceLock<Regex> = OnceLock::new();
    URL_SCHEME
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid"))
}

/// Whether an image target is a path inside the repository.
pub fn is_relative(target: &str) -> bool {
    !(target.is_empty()
        || target.starts_with("//")
        || target.starts_with('#')
        || url_scheme().is_match(target))
}

/// Where README assets live on the raw-content host.
#[derive(Debug, Clone, Copy)]
pub struct RawLocation<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
}

impl<'a> RawLocation<'a> {
    pub fn new(owner: &'a str, repo: &'a str, branch: &'a str) -> Self {
        Self { owner, repo, branch }
    }

    pub fn url_for(&self, raw_base: &str, path: &str) -> String {
        let path = path.trim_start_matches("./").trim_start_matches('/');
        format!(
            "{}/{}/{}/{}/{}",
            raw_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            path
        )
    }
}

/// Replace every relative image target with its absolute raw-content URL.
///
/// All matches are taken from the input in a single pass, so inserted URLs
/// are never scanned again. Absolute targets are left as they are, which
/// makes the rewrite idempotent.
pub fn rewrite_relative_images(
    markdown: &str,
    location: RawLocation<'_>,
    raw_base: &str,
) -> String {
    image_reference()
        .replace_all(markdown, |caps: &Captures| {
            if let Some(target) = caps.name("angle") {
                // `![alt](<path with spaces.png>)`
                let target = target.as_str();
                if !is_relative(target) {
                    return caps[0].to_string();
                }
                format!(
                    "![{}](<{}>{})",
                    &caps["alt"],
                    location.url_for(raw_base, target),
                    &caps["title"]
                )
            } else if let Some(target) = caps.name("md") {
                let target = target.as_str();
                if !is_relative(target) {
                    return caps[0].to_string();
                }
                format!(
                    "![{}]({}{})",
                    &caps["alt"],
                    location.url_for(raw_base, target),
                    &caps["title"]
                )
            } else {
                let target = &caps["html"];
                if !is_relative(target) {
                    return caps[0].to_string();
                }
                format!(
                    "{}{}{}",
                    &caps["head"],
                    location.url_for(raw_base, target),
                    &caps["quote"]
                )
            }
        })
        .into_owned()
}
