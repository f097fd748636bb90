//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

const MODAL_WIDTH: f32 = 420.0;
const CTA_WIDTH: f32 = 220.0;

/// Centered loading indicator for modal bodies
pub fn loader(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme::SPACING_XL * 2.0);
        ui.add(egui::Spinner::new().size(28.0).color(theme::ACCENT));
        ui.add_space(theme::SPACING_XL * 2.0);
    });
}

/// Accent call-to-action button. Shows a spinner instead of the label while
/// `loading`; `limit` keeps it at a fixed width instead of stretching.
pub fn cta_button(ui: &mut egui::Ui, label: &str, loading: bool, limit: bool) -> egui::Response {
    let width = if limit { CTA_WIDTH } else { ui.available_width() };
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, theme::BUTTON_HEIGHT_LARGE),
        egui::Sense::click(),
    );

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, theme::BTN_ACCENT, rect);
        ui.painter()
            .rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
        if loading {
            let spinner_rect =
                egui::Rect::from_center_size(draw_rect.center(), egui::vec2(18.0, 18.0));
            egui::Spinner::new()
                .size(18.0)
                .color(theme::BTN_ACCENT_TEXT)
                .paint_at(ui, spinner_rect);
        } else {
            ui.painter().text(
                draw_rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{}  {}", egui_phosphor::regular::DOWNLOAD_SIMPLE, label),
                egui::FontId::proportional(theme::FONT_LABEL),
                theme::BTN_ACCENT_TEXT,
            );
        }
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Dismissible overlay surface with a title, subtitle and footer close button.
/// `opacity` drives the enter/exit fade. Returns true when the user asked to
/// close, via the button, the backdrop or Escape.
pub fn modal_overlay(
    ctx: &egui::Context,
    id: egui::Id,
    opacity: f32,
    title: &str,
    subtitle: &str,
    close_label: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    let backdrop = egui::Color32::from_black_alpha((180.0 * opacity) as u8);

    // Built-in Modal with backdrop, escape-to-close, click-outside handling
    let modal_area =
        egui::Modal::default_area(id).default_width(MODAL_WIDTH + theme::SPACING_XL * 2.0);
    let modal = egui::Modal::new(id)
        .area(modal_area)
        .backdrop_color(backdrop)
        .frame(theme::modal_frame());

    let mut close_clicked = false;
    let modal_response = modal.show(ctx, |ui| {
        ui.set_opacity(opacity);
        ui.set_min_width(MODAL_WIDTH);
        ui.set_max_width(MODAL_WIDTH);

        ui.label(egui::RichText::new(title).size(theme::FONT_TITLE).strong());
        ui.add_space(2.0);
        ui.label(
            egui::RichText::new(subtitle)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        );
        ui.add_space(theme::SPACING_MD);
        ui.separator();
        ui.add_space(theme::SPACING_MD);

        add_contents(ui);

        ui.add_space(theme::SPACING_XL);
        ui.horizontal(|ui| {
            ui.set_min_height(theme::BUTTON_HEIGHT);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let close_btn = ui.add(theme::button(format!(
                    "{}  {}",
                    egui_phosphor::regular::X,
                    close_label
                )));
                if close_btn.clicked() {
                    close_clicked = true;
                }
            });
        });
    });

    close_clicked || modal_response.should_close()
}

/// Inline error banner for modal bodies
pub fn error_frame(ui: &mut egui::Ui, prefix: &str, message: &str) {
    ui.scope(|ui| {
        ui.style_mut().spacing.item_spacing.x = 0.0;
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(0x2d, 0x0a, 0x0a))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::same(10))
            .stroke(egui::Stroke::new(
                1.0,
                egui::Color32::from_rgb(0x7f, 0x1d, 0x1d),
            ))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                let text = format!(
                    "{}  {}: {}",
                    egui_phosphor::regular::WARNING,
                    prefix,
                    message
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(text)
                            .size(theme::FONT_BODY)
                            .color(egui::Color32::from_rgb(0xfc, 0xa5, 0xa5)),
                    )
                    .wrap(),
                );
            });
    });
}
