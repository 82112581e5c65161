// src/core/github_release.rs

use crate::{
    constants::{BOILERPLATE_SUFFIX, NO_SUFFIX_FLAG},
    core::{
        operation::{DownloadTarget, Operation},
        option_parser::ParsedOptions,
    },
    error::CommandError,
    system::{
        fs_ops::WorkDir,
        http::HttpClient,
    },
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::{io::Write, path::PathBuf, rc::Rc};

lazy_static! {
    static ref GITHUB_REFERENCE_RE: Regex = Regex::new(r"^github:([^/]+)/([^/]+)$").unwrap();
}

/// The subset of a GitHub release object this tool reads.
#[derive(Deserialize, Debug)]
struct Release {
    #[serde(default)]
    tag_name: String,
    zipball_url: Option<String>,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Deserialize, Debug)]
struct ReleaseAsset {
    browser_download_url: Option<String>,
}

/// `github:<user>/<repo>`: the newest release of a GitHub repository.
///
/// The repository looked up is `<repo>-boilerpl8` unless `-B` is given. The
/// release's first uploaded asset is preferred; without one, the release's
/// source zipball is used and saved as `<repo>_<tag>.zip`.
pub struct GithubRelease {
    client: Rc<dyn HttpClient>,
    api_base: String,
}

impl std::fmt::Debug for GithubRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubRelease")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GithubRelease {
    /// The reference prefix handled by this operation.
    pub const SCHEMA: &'static str = "github:";

    /// Queries `api_base` (normally [`crate::constants::GITHUB_API_BASE`]) through `client`.
    pub fn new(client: Rc<dyn HttpClient>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn releases_url(&self, user: &str, repo: &str, append_suffix: bool) -> String {
        let suffix = if append_suffix { BOILERPLATE_SUFFIX } else { "" };
        format!(
            "{}/repos/{}/{}{}/releases",
            self.api_base.trim_end_matches('/'),
            user,
            repo,
            suffix
        )
    }
}

impl Operation for GithubRelease {
    fn schema(&self) -> &'static str {
        Self::SCHEMA
    }

    fn resolve(
        &self,
        reference: &str,
        options: &ParsedOptions,
    ) -> Result<DownloadTarget, CommandError> {
        let caps = GITHUB_REFERENCE_RE.captures(reference).ok_or_else(|| {
            CommandError::InvalidReferenceFormat {
                reference: reference.to_string(),
                reason: "unexpected format (expected 'github:<USER>/<REPO>').",
            }
        })?;
        let user = caps.get(1).map_or("", |m| m.as_str());
        let repo = caps.get(2).map_or("", |m| m.as_str());

        let keep_name = options.is_set(NO_SUFFIX_FLAG);
        let api_url = self.releases_url(user, repo, !keep_name);

        let body = self.client.get_text(&api_url).map_err(|source| {
            let hint = if keep_name {
                "confirm repository name, or try without '-B' option."
            } else {
                "confirm repository name, or maybe you missed '-B' option."
            };
            CommandError::RepositoryNotFound {
                repo: repo.to_string(),
                api_url: api_url.clone(),
                hint,
                source,
            }
        })?;

        let releases: Vec<Release> =
            serde_json::from_str(&body).map_err(|source| CommandError::InvalidReleaseListing {
                api_url: api_url.clone(),
                source,
            })?;

        let no_asset = || CommandError::NoDownloadableAsset {
            user: user.to_string(),
            repo: repo.to_string(),
        };
        let latest = releases.into_iter().next().ok_or_else(no_asset)?;
        log::debug!("Latest release of {}/{}: {:?}", user, repo, latest);

        match latest.assets.into_iter().next() {
            Some(asset) => {
                let url = asset
                    .browser_download_url
                    .filter(|u| !u.is_empty())
                    .ok_or_else(no_asset)?;
                let suggested_filename = url.rsplit('/').next().unwrap_or(&url).to_string();
                Ok(DownloadTarget {
                    location: url,
                    suggested_filename,
                })
            }
            None => {
                let url = latest
                    .zipball_url
                    .filter(|u| !u.is_empty())
                    .ok_or_else(no_asset)?;
                Ok(DownloadTarget {
                    location: url,
                    suggested_filename: format!("{}_{}.zip", repo, latest.tag_name),
                })
            }
        }
    }

    fn download(
        &self,
        target: &DownloadTarget,
        workdir: &WorkDir,
    ) -> Result<PathBuf, CommandError> {
        print!("{}", format!(t!("download.info.start"), url = target.location));
        std::io::stdout().flush().ok();

        let content = self
            .client
            .get_bytes(&target.location)
            .map_err(|source| CommandError::DownloadFailed {
                url: target.location.clone(),
                source,
            })?;
        println!("{}", t!("download.info.done"));

        let path = workdir.resolve(&target.suggested_filename);
        workdir.write_file(&path, &content)?;
        log::debug!("Saved {} bytes to '{}'", content.len(), path.display());
        Ok(path)
    }
}
