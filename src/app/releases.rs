//! Release feed: fetch from the GitHub releases API and normalize for display

use crate::constants::{BUILD_TAG_PREFIX, HTTP_USER_AGENT};
use crate::types::*;
use tracing::{debug, warn};

/// Shown verbatim in the modal body; the specific cause only goes to the log.
const FETCH_ERROR: &str = "An error occurred while fetching the data.";

/// Fetch the release list and normalize it. Every failure mode (request,
/// status, parse) collapses to the same user-facing message.
pub async fn fetch_github_releases(url: &str) -> Result<Vec<Version>, String> {
    let client = match reqwest::Client::builder().user_agent(HTTP_USER_AGENT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client");
            return Err(FETCH_ERROR.to_string());
        }
    };

    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<Vec<GithubRelease>>().await {
                Ok(releases) => {
                    debug!(count = releases.len(), "Release list fetched");
                    Ok(releases_to_versions(releases))
                }
                Err(e) => {
                    warn!(error = %e, "Release list body did not parse");
                    Err(FETCH_ERROR.to_string())
                }
            }
        }
        Ok(response) => {
            warn!(status = %response.status(), "Release list request rejected");
            Err(FETCH_ERROR.to_string())
        }
        Err(e) => {
            warn!(error = %e, "Release list request failed");
            Err(FETCH_ERROR.to_string())
        }
    }
}

/// One upstream release becomes one version record holding a single unlabeled
/// group; the release name is carried onto every file as its description.
pub fn releases_to_versions(releases: Vec<GithubRelease>) -> Vec<Version> {
    releases
        .into_iter()
        .map(|release| {
            let description = release.name.unwrap_or_default();
            let files = release
                .assets
                .into_iter()
                .map(|asset| DownloadFile {
                    name: asset.name,
                    description: description.clone(),
                    size: asset.size,
                    url: asset.browser_download_url,
                    additional: Additional {
                        icon: String::new(),
                        external_link: true,
                    },
                })
                .collect();
            Version {
                version: release
                    .tag_name
                    .strip_prefix(BUILD_TAG_PREFIX)
                    .unwrap_or(&release.tag_name)
                    .to_string(),
                groups: vec![Group {
                    group_type: None,
                    files,
                }],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str, name: Option<&str>, assets: Vec<GithubAsset>) -> GithubRelease {
        GithubRelease {
            tag_name: tag.to_string(),
            name: name.map(str::to_string),
            assets,
        }
    }

    fn asset(name: &str, size: u64, url: &str) -> GithubAsset {
        GithubAsset {
            name: name.to_string(),
            size,
            browser_download_url: url.to_string(),
        }
    }

    #[test]
    fn strips_leading_build_prefix_only() {
        let versions = releases_to_versions(vec![
            release("build-1.2.3", Some("a"), vec![]),
            release("1.2.3", Some("b"), vec![]),
            release("rc-build-2", Some("c"), vec![]),
        ]);
        assert_eq!(versions[0].version, "1.2.3");
        assert_eq!(versions[1].version, "1.2.3");
        assert_eq!(versions[2].version, "rc-build-2");
    }

    #[test]
    fn one_release_becomes_one_version_with_one_group() {
        let versions = releases_to_versions(vec![
            release(
                "build-0.14",
                Some("Build 0.14"),
                vec![
                    asset("editor-win64.zip", 1000, "https://x/editor-win64.zip"),
                    asset("symbols.7z", 2000, "https://x/symbols.7z"),
                ],
            ),
            release("build-0.13", Some("Build 0.13"), vec![]),
        ]);

        assert_eq!(versions.len(), 2);
        for version in &versions {
            assert_eq!(version.groups.len(), 1);
            assert_eq!(version.groups[0].group_type, None);
        }
        assert_eq!(versions[0].groups[0].files.len(), 2);
        assert_eq!(versions[1].groups[0].files.len(), 0);
    }

    #[test]
    fn every_file_is_an_external_link_with_no_icon() {
        let versions = releases_to_versions(vec![release(
            "build-0.14",
            Some("Build 0.14"),
            vec![
                asset("a.zip", 1, "https://x/a.zip"),
                asset("b.zip", 2, "https://x/b.zip"),
            ],
        )]);

        for file in &versions[0].groups[0].files {
            assert!(file.additional.external_link);
            assert_eq!(file.additional.icon, "");
        }
    }

    #[test]
    fn transforms_a_release_into_the_display_shape() {
        let versions = releases_to_versions(vec![release(
            "build-2.0",
            Some("Patch 2.0"),
            vec![asset("game.zip", 1024, "https://x/game.zip")],
        )]);

        assert_eq!(
            versions,
            vec![Version {
                version: "2.0".to_string(),
                groups: vec![Group {
                    group_type: None,
                    files: vec![DownloadFile {
                        name: "game.zip".to_string(),
                        description: "Patch 2.0".to_string(),
                        size: 1024,
                        url: "https://x/game.zip".to_string(),
                        additional: Additional {
                            icon: String::new(),
                            external_link: true,
                        },
                    }],
                }],
            }]
        );
    }

    #[test]
    fn null_release_name_becomes_empty_description() {
        let raw = r#"{"tag_name":"build-1.0","name":null,"assets":
            [{"name":"a.zip","size":7,"browser_download_url":"https://x/a.zip"}]}"#;
        let release: GithubRelease = serde_json::from_str(raw).unwrap();
        let versions = releases_to_versions(vec![release]);
        assert_eq!(versions[0].groups[0].files[0].description, "");
    }

    #[tokio::test]
    async fn fetches_and_normalizes_a_release_list() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{
            "id": 213984,
            "tag_name": "build-0.14",
            "name": "Build 0.14",
            "draft": false,
            "assets": [{
                "id": 99,
                "name": "STALKER-Editor-Win64.zip",
                "size": 734003200,
                "browser_download_url": "https://github.com/RedPandaProjects/STALKERonUE/releases/download/build-0.14/STALKER-Editor-Win64.zip"
            }]
        }]"#;
        let mock = server
            .mock("GET", "/repos/RedPandaProjects/STALKERonUE/releases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let url = format!("{}/repos/RedPandaProjects/STALKERonUE/releases", server.url());
        let versions = fetch_github_releases(&url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, "0.14");
        assert_eq!(versions[0].groups[0].files[0].name, "STALKER-Editor-Win64.zip");
        assert_eq!(versions[0].groups[0].files[0].description, "Build 0.14");
    }

    #[tokio::test]
    async fn non_success_status_yields_the_opaque_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/RedPandaProjects/STALKERonUE/releases")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/repos/RedPandaProjects/STALKERonUE/releases", server.url());
        let err = fetch_github_releases(&url).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err, FETCH_ERROR);
    }

    #[tokio::test]
    async fn malformed_body_yields_the_opaque_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/RedPandaProjects/STALKERonUE/releases")
            .with_status(200)
            .with_body("{\"not\":\"an array\"}")
            .create_async()
            .await;

        let url = format!("{}/repos/RedPandaProjects/STALKERonUE/releases", server.url());
        let err = fetch_github_releases(&url).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err, FETCH_ERROR);
    }

    #[tokio::test]
    async fn release_without_an_assets_array_yields_the_opaque_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/RedPandaProjects/STALKERonUE/releases")
            .with_status(200)
            .with_body(r#"[{"tag_name":"build-1","name":"x"}]"#)
            .create_async()
            .await;

        let url = format!("{}/repos/RedPandaProjects/STALKERonUE/releases", server.url());
        let err = fetch_github_releases(&url).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err, FETCH_ERROR);
    }

    #[tokio::test]
    async fn unreachable_host_yields_the_opaque_error() {
        let err = fetch_github_releases("http://127.0.0.1:1/releases")
            .await
            .unwrap_err();
        assert_eq!(err, FETCH_ERROR);
    }
}
