//! Application constants and configuration

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const REPO_OWNER: &str = "RedPandaProjects";
pub const REPO_NAME: &str = "STALKERonUE";

/// Release tags are published as `build-<version>`; the UI shows the bare version.
pub const BUILD_TAG_PREFIX: &str = "build-";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GitHub rejects requests without a User-Agent.
pub const HTTP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn releases_url() -> String {
    format!("{}/repos/{}/{}/releases", GITHUB_API_URL, REPO_OWNER, REPO_NAME)
}
