//! The release download modal: trigger button, overlay, fetch orchestration

use std::sync::{Arc, Mutex};

use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::releases::fetch_github_releases;
use crate::constants;
use crate::locales::{self, Language};
use crate::types::ReleaseState;
use crate::ui::{components, download_list};

const OVERLAY_FADE_SECS: f32 = 0.15;

/// Overlay bookkeeping, built once on first open and reused afterwards
struct Overlay {
    id: egui::Id,
}

impl Overlay {
    fn transition_id(&self) -> egui::Id {
        self.id.with("transition")
    }
}

/// Modal listing the published editor builds, fed lazily from the release API.
///
/// Release data is fetched once per widget instance; closing keeps it around
/// for the next open, while an error leaves the next open to try again.
pub struct DownloadModal {
    limit: bool,
    open: bool,
    overlay: Option<Overlay>,
    state: Arc<Mutex<ReleaseState>>,
    alive: CancellationToken,
    endpoint: String,
}

impl DownloadModal {
    pub fn new() -> Self {
        Self {
            limit: true,
            open: false,
            overlay: None,
            state: Arc::new(Mutex::new(ReleaseState::default())),
            alive: CancellationToken::new(),
            endpoint: constants::releases_url(),
        }
    }

    /// False lets the trigger stretch to the available width.
    pub fn with_limit(mut self, limit: bool) -> Self {
        self.limit = limit;
        self
    }

    /// Point the fetch somewhere else. Tests aim this at a local mock server.
    #[cfg(test)]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// The page-side button that opens the modal. A spinner takes the label's
    /// place while the fetch runs.
    pub fn trigger_ui(
        &mut self,
        ui: &mut egui::Ui,
        runtime: &tokio::runtime::Runtime,
        label: &str,
    ) {
        let loading = self.state.lock().unwrap().loading;
        let ctx = ui.ctx().clone();
        if components::cta_button(ui, label, loading, self.limit).clicked() {
            self.open_modal(runtime, &ctx);
        }
    }

    /// Open the overlay; schedule a fetch unless release data already arrived.
    pub fn open_modal(&mut self, runtime: &tokio::runtime::Runtime, ctx: &egui::Context) {
        self.open = true;

        if self.overlay.is_none() {
            debug!("Building download modal overlay");
            let overlay = Overlay {
                id: egui::Id::new("download_modal"),
            };
            // Seed the transition at zero so the first open fades in
            ctx.animate_bool_with_time(overlay.transition_id(), false, 0.0);
            self.overlay = Some(overlay);
        }

        let mut feed = self.state.lock().unwrap();
        if feed.versions.is_some() {
            return;
        }
        // Stale error from the previous attempt must not flash while loading
        feed.error = None;
        feed.loading = true;
        if feed.in_flight {
            return;
        }
        feed.in_flight = true;
        drop(feed);

        info!(endpoint = %self.endpoint, "Fetching release list");
        let state = Arc::clone(&self.state);
        let alive = self.alive.clone();
        let endpoint = self.endpoint.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let result = fetch_github_releases(&endpoint).await;
            if alive.is_cancelled() {
                debug!("Release fetch outlived the modal, dropping the result");
                return;
            }
            let mut feed = state.lock().unwrap();
            feed.in_flight = false;
            feed.loading = false;
            match result {
                Ok(versions) => feed.versions = Some(versions),
                Err(e) => feed.error = Some(e),
            }
            drop(feed);
            ctx.request_repaint();
        });
    }

    pub fn close_modal(&mut self) {
        self.open = false;
        self.state.lock().unwrap().loading = false;
    }

    /// Render the overlay while open or still fading out.
    pub fn show(&mut self, ctx: &egui::Context, language: Language) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        let opacity =
            ctx.animate_bool_with_time(overlay.transition_id(), self.open, OVERLAY_FADE_SECS);
        if !self.open && opacity <= 0.0 {
            return;
        }

        let id = overlay.id;
        let close_requested = components::modal_overlay(
            ctx,
            id,
            opacity,
            locales::MODAL_TITLE.get(language),
            locales::MODAL_SUBTITLE.get(language),
            locales::CLOSE.get(language),
            |ui| self.body_ui(ui, language),
        );

        if close_requested && self.open {
            self.close_modal();
        }
    }

    fn body_ui(&self, ui: &mut egui::Ui, language: Language) {
        let feed = self.state.lock().unwrap();
        if let Some(error) = &feed.error {
            components::error_frame(ui, locales::ERROR_PREFIX.get(language), error);
        } else if let Some(versions) = &feed.versions {
            download_list::ui(ui, versions, "editor", language);
        } else {
            components::loader(ui);
        }
    }
}

impl Drop for DownloadModal {
    fn drop(&mut self) {
        // Any in-flight fetch notices and throws its result away
        self.alive.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn test_modal(server: &mockito::Server) -> DownloadModal {
        DownloadModal::new().with_endpoint(format!("{}/releases", server.url()))
    }

    fn wait_for_commit(state: &Arc<Mutex<ReleaseState>>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.lock().unwrap().in_flight {
            assert!(Instant::now() < deadline, "fetch never settled");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    const RELEASE_BODY: &str = r#"[{
        "tag_name": "build-0.14",
        "name": "Build 0.14",
        "assets": [{
            "name": "editor.zip",
            "size": 4096,
            "browser_download_url": "https://x/editor.zip"
        }]
    }]"#;

    #[test]
    fn first_open_sets_loading_and_fetches_once() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/releases")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(200));
                w.write_all(b"[]")
            })
            .expect(1)
            .create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);

        assert!(modal.open);
        {
            let feed = modal.state.lock().unwrap();
            assert!(feed.loading);
            assert!(feed.error.is_none());
        }

        wait_for_commit(&modal.state);
        mock.assert();
        let feed = modal.state.lock().unwrap();
        assert!(!feed.loading);
        // An empty release list still counts as data
        assert_eq!(feed.versions.as_ref().map(Vec::len), Some(0));
        assert!(feed.error.is_none());
    }

    #[test]
    fn http_failure_surfaces_an_error_and_leaves_data_absent() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/releases").with_status(500).expect(1).create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);
        wait_for_commit(&modal.state);

        mock.assert();
        let feed = modal.state.lock().unwrap();
        assert!(feed.error.as_ref().is_some_and(|e| !e.is_empty()));
        assert!(feed.versions.is_none());
        assert!(!feed.loading);
    }

    #[test]
    fn reopening_with_data_does_not_refetch() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/releases")
            .with_status(200)
            .with_body(RELEASE_BODY)
            .expect(1)
            .create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);
        wait_for_commit(&modal.state);

        modal.close_modal();
        modal.open_modal(&runtime, &ctx);
        std::thread::sleep(Duration::from_millis(100));

        mock.assert();
        let feed = modal.state.lock().unwrap();
        assert!(!feed.loading);
        assert_eq!(feed.versions.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn reopening_after_an_error_refetches() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let failing = server.mock("GET", "/releases").with_status(500).expect(1).create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);
        wait_for_commit(&modal.state);
        failing.assert();
        assert!(modal.state.lock().unwrap().error.is_some());

        // Most recent mock wins, so the retry lands on the healthy one. Its
        // reply is delayed so the loading assertions below cannot race it.
        let healthy = server
            .mock("GET", "/releases")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(150));
                w.write_all(RELEASE_BODY.as_bytes())
            })
            .expect(1)
            .create();

        modal.close_modal();
        modal.open_modal(&runtime, &ctx);
        {
            let feed = modal.state.lock().unwrap();
            assert!(feed.error.is_none(), "stale error must clear on retry");
            assert!(feed.loading);
        }

        wait_for_commit(&modal.state);
        healthy.assert();
        let feed = modal.state.lock().unwrap();
        assert_eq!(feed.versions.as_ref().map(Vec::len), Some(1));
        assert!(feed.error.is_none());
    }

    #[test]
    fn close_and_reopen_during_a_fetch_does_not_spawn_a_second_one() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/releases")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(200));
                w.write_all(RELEASE_BODY.as_bytes())
            })
            .expect(1)
            .create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);
        modal.close_modal();
        modal.open_modal(&runtime, &ctx);

        wait_for_commit(&modal.state);
        mock.assert();
        let feed = modal.state.lock().unwrap();
        assert_eq!(feed.versions.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn teardown_during_fetch_discards_the_result() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = egui::Context::default();
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/releases")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(300));
                w.write_all(RELEASE_BODY.as_bytes())
            })
            .create();

        let mut modal = test_modal(&server);
        modal.open_modal(&runtime, &ctx);
        let state = Arc::clone(&modal.state);
        drop(modal);

        std::thread::sleep(Duration::from_millis(700));
        let feed = state.lock().unwrap();
        assert!(feed.versions.is_none());
        assert!(feed.error.is_none());
    }
}
