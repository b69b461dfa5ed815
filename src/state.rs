//! Browser state: the single owner of everything the UI displays
//!
//! Only the UI thread mutates this. Background fetches report back with the
//! epoch they were started under; results from a superseded selection are
//! dropped.

use crate::types::{Folder, Item};
use tracing::debug;

/// The folder whose items are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub folder_id: String,
    pub folder_name: String,
}

/// Item fetch to start after a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub epoch: u64,
    pub folder_id: String,
}

#[derive(Debug)]
pub struct BrowserState {
    pub folders: Vec<Folder>,
    pub items: Vec<Item>,
    pub selection: Option<Selection>,
    pub is_loading_folders: bool,
    pub is_loading_items: bool,
    epoch: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            items: Vec::new(),
            selection: None,
            // The tree is fetched as soon as the window opens
            is_loading_folders: true,
            is_loading_items: false,
            epoch: 0,
        }
    }
}

impl BrowserState {
    pub fn begin_folder_load(&mut self) {
        self.is_loading_folders = true;
    }

    pub fn finish_folder_load(&mut self, folders: Vec<Folder>) {
        self.folders = folders;
        self.is_loading_folders = false;
    }

    /// Record a selection and discard the previous items. The returned
    /// request carries the new epoch.
    pub fn select(&mut self, folder_id: &str, folder_name: &str) -> ItemRequest {
        self.epoch += 1;
        self.selection = Some(Selection {
            folder_id: folder_id.to_string(),
            folder_name: folder_name.to_string(),
        });
        self.items.clear();
        self.is_loading_items = true;

        ItemRequest {
            epoch: self.epoch,
            folder_id: folder_id.to_string(),
        }
    }

    /// Store fetched items if they belong to the current selection.
    /// Returns false when the result was stale and dropped.
    pub fn finish_item_load(&mut self, epoch: u64, items: Vec<Item>) -> bool {
        if !self.is_current(epoch) {
            debug!(epoch, current = self.epoch, "Dropping stale item result");
            return false;
        }
        self.items = items;
        self.is_loading_items = false;
        true
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Title of the item section: stored name, or id if the name is empty
    pub fn heading(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| {
            if s.folder_name.is_empty() {
                s.folder_id.as_str()
            } else {
                s.folder_name.as_str()
            }
        })
    }
}
