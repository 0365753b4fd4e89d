//! Docker Hub tags API client.
//!
//! Used to decide which official base image repository carries a given
//! distribution tag before any container is created.

use std::fmt::{self, Display, Formatter};

use serde::Deserialize;

use crate::{Error, Result};

const DOCKER_HUB_API_BASE: &str = "https://hub.docker.com/v2";

/// One page of the tags listing for a repository.
#[derive(Debug, Deserialize)]
pub struct TagPage {
    pub next: Option<String>,
    pub results: Vec<TagEntry>,
}

/// A single tag as returned by the tags listing.
#[derive(Debug, Deserialize)]
pub struct TagEntry {
    pub name: String,
}

/// Anything that can enumerate the tags of an official image repository.
///
/// The production implementation talks to Docker Hub; tests substitute an
/// in-memory double.
#[allow(async_fn_in_trait)]
pub trait TagSource {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>>;
}

/// The base image repositories a build can run on, in probe order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageOs {
    Debian,
    Ubuntu,
}

impl ImageOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOs::Debian => "debian",
            ImageOs::Ubuntu => "ubuntu",
        }
    }
}

impl Display for ImageOs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Docker Hub API client.
#[derive(Clone)]
pub struct DockerHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl DockerHubClient {
    pub fn new() -> Self {
        Self::with_base_url(DOCKER_HUB_API_BASE.to_string())
    }

    /// Point the client at a different API root.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("debdock/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
        }
    }

    /// List every tag of a repository, following pagination.
    pub async fn query_tags(&self, user: &str, repository: &str) -> Result<Vec<String>> {
        let mut url = format!(
            "{}/repositories/{}/{}/tags?page_size=100",
            self.base_url, user, repository
        );
        let mut tags = Vec::new();

        loop {
            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                return Err(Error::Registry(format!(
                    "Failed to list tags for {}/{}: {}",
                    user,
                    repository,
                    response.status()
                )));
            }

            let page: TagPage = response.json().await?;
            tags.extend(page.results.into_iter().map(|tag| tag.name));

            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(tags)
    }
}

impl Default for DockerHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for DockerHubClient {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        self.query_tags("library", repository).await
    }
}

/// Decide which official base image publishes `distribution` as a tag.
///
/// Repositories are probed in a fixed order and the first match wins, so a
/// tag present under both debian and ubuntu resolves to debian.
pub async fn resolve_image_os<S: TagSource>(source: &S, distribution: &str) -> Result<ImageOs> {
    for os in [ImageOs::Debian, ImageOs::Ubuntu] {
        let tags = source.list_tags(os.as_str()).await?;
        if tags.iter().any(|tag| tag == distribution) {
            return Ok(os);
        }
    }

    Err(Error::DistributionNotFound(distribution.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct StaticTags(HashMap<&'static str, Vec<String>>);

    impl TagSource for StaticTags {
        async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
            Ok(self.0.get(repository).cloned().unwrap_or_default())
        }
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[tokio::test]
    async fn test_debian_wins_when_both_publish_the_tag() {
        let source = StaticTags(HashMap::from([
            ("debian", tags(&["bookworm", "unstable"])),
            ("ubuntu", tags(&["noble", "unstable"])),
        ]));

        let os = resolve_image_os(&source, "unstable").await.unwrap();
        assert_eq!(os, ImageOs::Debian);
    }

    #[tokio::test]
    async fn test_ubuntu_only_tag_resolves_to_ubuntu() {
        let source = StaticTags(HashMap::from([
            ("debian", tags(&["bookworm", "trixie"])),
            ("ubuntu", tags(&["noble", "jammy"])),
        ]));

        let os = resolve_image_os(&source, "noble").await.unwrap();
        assert_eq!(os, ImageOs::Ubuntu);
    }

    #[tokio::test]
    async fn test_unknown_distribution_fails() {
        let source = StaticTags(HashMap::from([
            ("debian", tags(&["bookworm"])),
            ("ubuntu", tags(&["noble"])),
        ]));

        let err = resolve_image_os(&source, "slackware").await.unwrap_err();
        assert!(matches!(err, Error::DistributionNotFound(_)));
    }

    #[test]
    fn test_tag_page_deserializes() {
        let page: TagPage = serde_json::from_str(
            r#"{"count": 2, "next": null, "results": [{"name": "bookworm"}, {"name": "trixie"}]}"#,
        )
        .unwrap();

        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "bookworm");
    }
}
