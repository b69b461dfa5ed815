//! Folder and item fetches, and applying their results

use super::{App, Event, Thumbnail};
use eframe::egui;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

impl App {
    /// Fetch the folder forest. Runs once when the window opens.
    pub fn load_folders(&mut self, ctx: &egui::Context) {
        self.state.begin_folder_load();

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        debug!("Loading folders");
        self.runtime.spawn(async move {
            let folders = api.fetch_folders().await;
            let _ = tx.send(Event::FoldersLoaded(folders));
            ctx.request_repaint();
        });
    }

    /// Select a folder and fetch its items. Earlier in-flight fetches are
    /// left running; their results are dropped when they arrive.
    pub fn select_folder(&mut self, ctx: &egui::Context, folder_id: &str, folder_name: &str) {
        let request = self.state.select(folder_id, folder_name);
        self.thumbnails.clear();
        self.live_epoch.store(request.epoch, Ordering::Release);

        info!(folder_id = %folder_id, folder_name = %folder_name, epoch = request.epoch, "Folder selected");

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let items = api.fetch_items(&request.folder_id).await;
            let _ = tx.send(Event::ItemsLoaded {
                epoch: request.epoch,
                folder_id: request.folder_id,
                items,
            });
            ctx.request_repaint();
        });
    }

    /// Apply everything background tasks have reported since the last frame.
    pub fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                Event::FoldersLoaded(folders) => {
                    info!(roots = folders.len(), "Folder tree loaded");
                    self.state.finish_folder_load(folders);
                }
                Event::ItemsLoaded {
                    epoch,
                    folder_id,
                    items,
                } => {
                    let count = items.len();
                    if self.state.finish_item_load(epoch, items) {
                        info!(folder_id = %folder_id, count, "Items loaded");
                    }
                }
                Event::ThumbnailLoaded {
                    epoch,
                    item_id,
                    image,
                } => {
                    if !self.state.is_current(epoch) {
                        continue;
                    }
                    let thumbnail = match image {
                        Some(image) => Thumbnail::Ready(ctx.load_texture(
                            format!("thumb-{}", item_id),
                            image,
                            egui::TextureOptions::LINEAR,
                        )),
                        None => Thumbnail::Hidden,
                    };
                    self.thumbnails.insert(item_id, thumbnail);
                }
            }
        }
    }
}
