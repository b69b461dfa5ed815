//! View rendering (folder panel, item grid)

use super::App;
use crate::theme;
use crate::ui::components::{item_card, status_text};
use crate::ui::folder_tree;
use eframe::egui;

impl App {
    pub(crate) fn render_folder_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut clicked: Option<(String, String)> = None;

        ui.add(
            egui::Label::new(
                egui::RichText::new("FOLDERS")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_SM);

        theme::section_frame().show(ui, |ui| {
            egui::ScrollArea::both()
                .id_salt("folder_tree")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if self.state.is_loading_folders {
                        status_text(ui, "Loading folders...");
                    } else if self.state.folders.is_empty() {
                        status_text(ui, "No folders found.");
                    } else {
                        let selected = self
                            .state
                            .selection
                            .as_ref()
                            .map(|s| s.folder_id.as_str());
                        folder_tree::render_forest(
                            ui,
                            &self.state.folders,
                            selected,
                            &mut |id: &str, name: &str| clicked = Some((id.to_string(), name.to_string())),
                        );
                    }
                });
        });

        if let Some((id, name)) = clicked {
            self.select_folder(ctx, &id, &name);
        }
    }

    pub(crate) fn render_items(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Nothing to show until a folder is picked
        let Some(heading) = self.state.heading().map(str::to_owned) else {
            return;
        };

        theme::section_frame().show(ui, |ui| {
            ui.set_min_size(ui.available_size());

            ui.add(
                egui::Label::new(
                    egui::RichText::new(heading)
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_MD);

            if self.state.is_loading_items {
                status_text(ui, "Loading items...");
                return;
            }
            if self.state.items.is_empty() {
                status_text(ui, "No items found in this folder.");
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("item_grid")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing =
                            egui::vec2(theme::SPACING_MD, theme::SPACING_MD);

                        let mut wanted = Vec::new();
                        for item in &self.state.items {
                            let texture = self.cached_thumbnail(&item.id);
                            let response = item_card(ui, &item.name, texture.as_ref());
                            // Only fetch thumbnails for cards on screen
                            if ui.is_rect_visible(response.rect)
                                && !self.thumbnails.contains_key(&item.id)
                            {
                                wanted.push(item.id.clone());
                            }
                        }
                        for item_id in wanted {
                            self.ensure_thumbnail(ctx, &item_id);
                        }
                    });
                });
        });
    }
}
