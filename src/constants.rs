//! Application constants and configuration keys

pub const APP_NAME: &str = "Eagle Folder Browser";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variables read at startup
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_API_TOKEN: &str = "EAGLE_API_TOKEN";

/// Endpoint paths, relative to the API base URL
pub const FOLDER_LIST_PATH: &str = "folder/list";
pub const ITEM_LIST_PATH: &str = "item/list";
pub const THUMBNAIL_PATH: &str = "item/rawthumbnail";

/// Max concurrent thumbnail downloads
pub const THUMBNAIL_CONCURRENCY: usize = 8;
