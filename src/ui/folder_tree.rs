//! Folder tree panel
//!
//! Every level is always expanded. Each row is the connector prefix in
//! monospace followed by a clickable folder label; clicking any folder, leaf
//! or not, reports `(id, name)` once.

use crate::theme;
use crate::tree::{self, TreeRow};
use crate::types::Folder;
use eframe::egui;

/// Render `node` and its descendants starting at the given depth.
pub fn render(
    ui: &mut egui::Ui,
    node: &Folder,
    depth: usize,
    is_last: bool,
    ancestor_prefix: &str,
    selected: Option<&str>,
    on_select: &mut dyn FnMut(&str, &str),
) {
    for row in tree::rows(node, depth, is_last, ancestor_prefix) {
        folder_row(ui, &row, selected, on_select);
    }
}

/// Render all root folders.
pub fn render_forest(
    ui: &mut egui::Ui,
    roots: &[Folder],
    selected: Option<&str>,
    on_select: &mut dyn FnMut(&str, &str),
) {
    for (idx, root) in roots.iter().enumerate() {
        let is_last = tree::is_last_root(idx, roots.len());
        render(ui, root, 0, is_last, "", selected, on_select);
    }
}

fn folder_row(
    ui: &mut egui::Ui,
    row: &TreeRow<'_>,
    selected: Option<&str>,
    on_select: &mut dyn FnMut(&str, &str),
) {
    let folder = row.folder;
    let is_selected = selected == Some(folder.id.as_str());

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        let prefix = row.display_prefix();
        if !prefix.is_empty() {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(prefix)
                        .monospace()
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }

        let color = if is_selected {
            theme::ACCENT
        } else {
            theme::TEXT_SECONDARY
        };
        let label = egui::RichText::new(format!(
            "{}  {}",
            egui_phosphor::regular::FOLDER,
            folder.name
        ))
        .size(theme::FONT_LABEL)
        .color(color);

        let response = ui
            .selectable_label(is_selected, label)
            .on_hover_text(format!("Load items for {}", folder.name));

        if response.clicked() {
            on_select(&folder.id, &folder.name);
        }
    });
}
