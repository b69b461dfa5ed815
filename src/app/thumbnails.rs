//! Thumbnail loading

use super::{App, Event};
use eframe::egui;
use std::sync::atomic::Ordering;
use tracing::debug;

pub(crate) enum Thumbnail {
    Loading,
    Ready(egui::TextureHandle),
    /// Fetch or decode failed; the card shows no image
    Hidden,
}

impl App {
    /// Texture for an item if it has finished loading.
    pub(crate) fn cached_thumbnail(&self, item_id: &str) -> Option<egui::TextureHandle> {
        match self.thumbnails.get(item_id) {
            Some(Thumbnail::Ready(texture)) => Some(texture.clone()),
            _ => None,
        }
    }

    /// Start fetching a thumbnail unless it was already requested for the
    /// current selection.
    pub(crate) fn ensure_thumbnail(&mut self, ctx: &egui::Context, item_id: &str) {
        if self.thumbnails.contains_key(item_id) {
            return;
        }
        self.thumbnails
            .insert(item_id.to_string(), Thumbnail::Loading);

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let permits = self.thumbnail_permits.clone();
        let live_epoch = self.live_epoch.clone();
        let ctx = ctx.clone();
        let epoch = self.state.epoch();
        let item_id = item_id.to_string();

        self.runtime.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();

            // Selection changed while queued; free the slot for the new folder
            if live_epoch.load(Ordering::Acquire) != epoch {
                debug!(item_id = %item_id, epoch, "Skipping thumbnail for replaced selection");
                return;
            }

            let image = match api.fetch_thumbnail(&item_id).await {
                Ok(bytes) => match tokio::task::spawn_blocking(move || decode_thumbnail(&bytes)).await {
                    Ok(Ok(image)) => Some(image),
                    Ok(Err(e)) => {
                        debug!(item_id = %item_id, error = %e, "Thumbnail decode failed");
                        None
                    }
                    Err(e) => {
                        debug!(item_id = %item_id, error = %e, "Thumbnail decode task failed");
                        None
                    }
                },
                Err(e) => {
                    debug!(item_id = %item_id, error = %e, "Thumbnail fetch failed");
                    None
                }
            };

            let _ = tx.send(Event::ThumbnailLoaded {
                epoch,
                item_id,
                image,
            });
            ctx.request_repaint();
        });
    }
}

pub(crate) fn decode_thumbnail(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
