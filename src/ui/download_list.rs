//! Release list rendering for the download modal

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use tracing::info;

use crate::locales::{self, Language};
use crate::theme;
use crate::types::{Group, Version};
use crate::utils::format_bytes;

const LIST_MAX_HEIGHT: f32 = 260.0;
const FILE_ROW_HEIGHT: f32 = 36.0;

/// Render the version list. `kind` salts egui ids so different callers keep
/// independent collapse and scroll state.
pub fn ui(ui: &mut egui::Ui, versions: &[Version], kind: &str, language: Language) {
    if versions.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_XL);
            ui.label(
                egui::RichText::new(locales::NO_BUILDS.get(language)).color(theme::TEXT_DIM),
            );
            ui.add_space(theme::SPACING_XL);
        });
        return;
    }

    theme::section_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        egui::ScrollArea::vertical()
            .id_salt(("download_list", kind))
            .max_height(LIST_MAX_HEIGHT)
            .show(ui, |ui| {
                for (idx, version) in versions.iter().enumerate() {
                    let title = format!(
                        "{}  v{}",
                        egui_phosphor::regular::PACKAGE,
                        version.version
                    );
                    egui::CollapsingHeader::new(
                        egui::RichText::new(title).size(theme::FONT_HEADING).strong(),
                    )
                    .id_salt((kind, idx))
                    .default_open(idx == 0)
                    .show(ui, |ui| {
                        for (group_idx, group) in version.groups.iter().enumerate() {
                            if let Some(label) = &group.group_type {
                                ui.label(
                                    egui::RichText::new(label)
                                        .size(theme::FONT_SECTION)
                                        .color(theme::TEXT_MUTED)
                                        .strong(),
                                );
                                ui.add_space(theme::SPACING_XS);
                            }
                            files_table(ui, group, (kind, idx, group_idx));
                        }
                    });
                }
            });
    });
}

fn files_table(ui: &mut egui::Ui, group: &Group, salt: (&str, usize, usize)) {
    ui.push_id(salt, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().clip(true))
            .column(Column::auto())
            .column(Column::exact(26.0))
            .body(|mut body| {
                for file in &group.files {
                    // Single-line rows shrink when there is no description
                    let height = if file.description.is_empty() {
                        theme::ROW_HEIGHT
                    } else {
                        FILE_ROW_HEIGHT
                    };
                    body.row(height, |mut row| {
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                ui.spacing_mut().item_spacing.y = theme::SPACING_XS;
                                ui.label(
                                    egui::RichText::new(&file.name)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                if !file.description.is_empty() {
                                    ui.label(
                                        egui::RichText::new(&file.description)
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_DIM),
                                    );
                                }
                            });
                        });
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(format_bytes(file.size))
                                    .size(theme::FONT_SECTION)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                        row.col(|ui| {
                            let glyph = if !file.additional.icon.is_empty() {
                                file.additional.icon.as_str()
                            } else if file.additional.external_link {
                                egui_phosphor::regular::ARROW_SQUARE_OUT
                            } else {
                                egui_phosphor::regular::DOWNLOAD_SIMPLE
                            };
                            let (rect, response) = ui.allocate_exact_size(
                                egui::vec2(22.0, 22.0),
                                egui::Sense::click(),
                            );
                            let color = if response.hovered() {
                                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                                theme::ACCENT
                            } else {
                                theme::TEXT_MUTED
                            };
                            ui.painter().text(
                                rect.center(),
                                egui::Align2::CENTER_CENTER,
                                glyph,
                                egui::FontId::proportional(16.0),
                                color,
                            );
                            let response = response.on_hover_text(&file.url);
                            if response.clicked() {
                                info!(file = %file.name, "Opening download in browser");
                                let _ = open::that(&file.url);
                            }
                        });
                    });
                }
            });
    });
}
