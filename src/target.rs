use crate::error::{ParseError, ResolveError};
use crate::utils::Platform;
use std::fmt;
use std::str::FromStr;

/// Default host serving plugin release archives
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// Where a plugin is installed from: `owner/repo[@tag]` or `name[@tag]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Repository { owner: String, repo: String },
    Plugin { name: String },
}

/// Parsed form of an install target specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub source: Source,
    pub release_tag: Option<String>,
}

impl InstallTarget {
    /// Parse a specifier such as `mackerelio/mackerel-plugin-sample@v1.0.1`.
    ///
    /// Purely syntactic: no trimming or case folding is applied.
    pub fn parse(target: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError(target.to_string());

        let mut at_parts = target.split('@');
        let owner_repo = at_parts.next().unwrap_or_default();
        let release_tag = at_parts.next().map(str::to_string);
        if at_parts.next().is_some() {
            return Err(invalid());
        }

        let parts: Vec<&str> = owner_repo.split('/').collect();
        let source = match parts.as_slice() {
            [name] => Source::Plugin {
                name: name.to_string(),
            },
            [owner, repo] => Source::Repository {
                owner: owner.to_string(),
                repo: repo.to_string(),
            },
            _ => return Err(invalid()),
        };

        Ok(Self {
            source,
            release_tag,
        })
    }

    pub fn owner(&self) -> Option<&str> {
        match &self.source {
            Source::Repository { owner, .. } => Some(owner),
            Source::Plugin { .. } => None,
        }
    }

    pub fn repo(&self) -> Option<&str> {
        match &self.source {
            Source::Repository { repo, .. } => Some(repo),
            Source::Plugin { .. } => None,
        }
    }

    pub fn plugin_name(&self) -> Option<&str> {
        match &self.source {
            Source::Plugin { name } => Some(name),
            Source::Repository { .. } => None,
        }
    }

    /// Build the release archive URL for `platform`.
    ///
    /// Only `owner/repo@tag` targets with every part non-empty resolve; there
    /// is no registry to look up bare plugin names or the latest tag.
    pub fn download_url(&self, base: &str, platform: &Platform) -> Result<String, ResolveError> {
        match &self.source {
            Source::Repository { owner, repo } if !owner.is_empty() && !repo.is_empty() => {
                // An empty tag (`owner/repo@`) counts as no tag
                let tag = self
                    .release_tag
                    .as_deref()
                    .filter(|tag| !tag.is_empty())
                    .ok_or(ResolveError::TagRequired)?;
                let filename = format!("{repo}_{}_{}.zip", platform.os, platform.arch);
                Ok(format!(
                    "{}/{owner}/{repo}/releases/download/{tag}/{filename}",
                    base.trim_end_matches('/')
                ))
            }
            _ => Err(ResolveError::OwnerRepoRequired),
        }
    }
}

impl FromStr for InstallTarget {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Repository { owner, repo } => write!(f, "{owner}/{repo}")?,
            Source::Plugin { name } => write!(f, "{name}")?,
        }
        if let Some(tag) = &self.release_tag {
            write!(f, "@{tag}")?;
        }
        Ok(())
    }
}
