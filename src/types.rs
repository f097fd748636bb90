//! Common types and data structures

/// Display metadata attached to a downloadable file
#[derive(Debug, Clone, PartialEq)]
pub struct Additional {
    /// Glyph override for the action column; empty falls back on the link kind
    pub icon: String,
    pub external_link: bool,
}

/// A single downloadable artifact with display metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadFile {
    pub name: String,
    pub description: String,
    pub size: u64,
    pub url: String,
    pub additional: Additional,
}

/// Files bucketed under an optional category label; order is display order
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub group_type: Option<String>,
    pub files: Vec<DownloadFile>,
}

/// One upstream release, normalized for display
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub version: String,
    pub groups: Vec<Group>,
}

/// Release object from the GitHub releases API
#[derive(serde::Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub assets: Vec<GithubAsset>,
}

/// Asset entry within a GitHub release
#[derive(serde::Deserialize)]
pub struct GithubAsset {
    pub name: String,
    pub size: u64,
    pub browser_download_url: String,
}

/// Fetch progress and results shared with the release fetch task
#[derive(Default)]
pub struct ReleaseState {
    /// True while a fetch is outstanding and the modal wants a spinner
    pub loading: bool,
    /// True from spawn until the task commits or is discarded; survives
    /// close/reopen so one absent-data period never spawns twice
    pub in_flight: bool,
    pub error: Option<String>,
    pub versions: Option<Vec<Version>>,
}
