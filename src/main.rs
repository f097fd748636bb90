#![windows_subsystem = "windows"]
//! STALKER on UE editor downloader - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod locales;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::APP_VERSION;
use eframe::egui;
use locales::Language;
use std::path::PathBuf;
use tracing::info;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "stalker-ue-downloader.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stalker_ue_downloader=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("STALKER on UE Downloader");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "STALKER on UE downloader starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(560.0, 660.0)))
        .with_min_inner_size([480.0, 560.0])
        .with_title("STALKER on UE Downloader");

    // Set window/taskbar icon rasterized from the bundled SVG
    {
        let (pixels, w, h) = utils::rasterize_logo_square(64);
        let icon = egui::IconData { rgba: pixels, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "STALKER on UE Downloader",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Render download modal (overlay renders above the panel below)
        self.download_modal.show(ctx, self.language);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                // Language toggle in the top-right corner
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    let mut english = self.language == Language::English;
                    let left = Language::English.short_code();
                    let right = Language::Russian.short_code();
                    if theme::segmented_toggle(ui, left, right, &mut english) {
                        self.language = if english {
                            Language::English
                        } else {
                            Language::Russian
                        };
                        info!(language = self.language.short_code(), "Language switched");
                        self.save_settings();
                    }
                });

                // Landing column, centered and width-capped
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    ui.set_max_width(320.0);
                    ui.add_space(48.0);

                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let (pixels, w, h) = utils::rasterize_logo(theme::LOGO_SIZE as u32 * 2);
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied(
                                [w as usize, h as usize],
                                &pixels,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    let aspect = texture.size()[1] as f32 / texture.size()[0] as f32;
                    let logo_size = egui::vec2(theme::LOGO_SIZE, theme::LOGO_SIZE * aspect);
                    ui.image(egui::load::SizedTexture::new(texture.id(), logo_size));

                    ui.add_space(theme::SPACING_LG);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("STALKER on Unreal Engine")
                                .size(theme::FONT_TITLE)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );

                    ui.add_space(theme::SPACING_SM);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(locales::PAGE_BLURB.get(self.language))
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );

                    ui.add_space(theme::SPACING_XL * 2.0);
                    let label = locales::DOWNLOAD_EDITOR.get(self.language);
                    self.download_modal.trigger_ui(ui, &self.runtime, label);
                });

                // Version line pinned to the bottom
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
