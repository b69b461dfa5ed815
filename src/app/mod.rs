//! App module - contains the main application state and logic

mod loading;
mod thumbnails;
mod views;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::constants::THUMBNAIL_CONCURRENCY;
use crate::state::BrowserState;
use crate::theme;
use crate::types::{Folder, Item};
use eframe::egui;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;

pub(crate) use thumbnails::Thumbnail;

/// Results delivered from background tasks to the UI thread
pub(crate) enum Event {
    FoldersLoaded(Vec<Folder>),
    ItemsLoaded {
        epoch: u64,
        folder_id: String,
        items: Vec<Item>,
    },
    ThumbnailLoaded {
        epoch: u64,
        item_id: String,
        image: Option<egui::ColorImage>,
    },
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) state: BrowserState,
    pub(crate) api: Arc<ApiClient>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) events_tx: UnboundedSender<Event>,
    pub(crate) events_rx: UnboundedReceiver<Event>,
    // Thumbnails of the current item collection, keyed by item id
    pub(crate) thumbnails: HashMap<String, Thumbnail>,
    pub(crate) thumbnail_permits: Arc<Semaphore>,
    // Mirrors the selection epoch so queued thumbnail tasks can bail out
    pub(crate) live_epoch: Arc<AtomicU64>,
    pub(crate) initial_load_started: bool,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ApiConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for the folder glyphs
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_runtime(config, runtime)
    }

    /// Build the app without a window.
    pub fn with_runtime(config: ApiConfig, runtime: tokio::runtime::Runtime) -> Self {
        let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            state: BrowserState::default(),
            api: Arc::new(ApiClient::new(config)),
            runtime,
            events_tx,
            events_rx,
            thumbnails: HashMap::new(),
            thumbnail_permits: Arc::new(Semaphore::new(THUMBNAIL_CONCURRENCY)),
            live_epoch: Arc::new(AtomicU64::new(0)),
            initial_load_started: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    fn app_for(server: &MockServer, runtime: tokio::runtime::Runtime) -> App {
        App::with_runtime(
            ApiConfig {
                base_url: server.uri(),
                token: "test-token".to_string(),
            },
            runtime,
        )
    }

    fn items_body(ids: &[&str]) -> serde_json::Value {
        let data: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({"id": id, "name": format!("{id}.png")}))
            .collect();
        serde_json::json!({ "data": data })
    }

    /// Drain events until `done` holds or five seconds pass.
    fn pump_until(app: &mut App, ctx: &egui::Context, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.poll_events(ctx);
            if done(app) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for events");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Keep draining for a while so late responses get applied.
    fn pump_for(app: &mut App, ctx: &egui::Context, duration: Duration) {
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            app.poll_events(ctx);
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn item_ids(app: &App) -> Vec<&str> {
        app.state.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn initial_load_fills_folder_tree() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/folder/list"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "data": [{"id": "onmk", "name": "onmk", "children": [
                        {"id": "anime", "name": "anime"}
                    ]}]
                })))
                .expect(1)
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.load_folders(&ctx);
        assert!(app.state.is_loading_folders);

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_folders);

        assert_eq!(app.state.folders.len(), 1);
        assert_eq!(app.state.folders[0].children()[0].id, "anime");
        app.runtime.block_on(server.verify());
    }

    #[test]
    fn failed_folder_load_shows_empty_tree() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/folder/list"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.load_folders(&ctx);
        pump_until(&mut app, &ctx, |app| !app.state.is_loading_folders);

        assert!(app.state.folders.is_empty());
    }

    #[test]
    fn selecting_folder_fetches_its_items_once() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/list"))
                .and(query_param("token", "test-token"))
                .and(query_param("folders", "sc"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(items_body(&["i1", "i2"]))
                        .set_delay(Duration::from_millis(100)),
                )
                .expect(1)
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "sc", "SC");

        // Heading is the stored name while the request is in flight
        assert_eq!(app.state.heading(), Some("SC"));
        assert!(app.state.is_loading_items);
        assert!(app.state.items.is_empty());

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);

        assert_eq!(item_ids(&app), vec!["i1", "i2"]);
        assert_eq!(app.state.heading(), Some("SC"));
        app.runtime.block_on(server.verify());
    }

    fn folder_frame(app: &mut App, ctx: &egui::Context, events: Vec<egui::Event>) -> egui::FullOutput {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| app.render_folder_panel(ui, ctx));
        })
    }

    #[test]
    fn clicking_folder_row_loads_its_items_once() {
        use crate::ui::folder_tree::tests::{click_frames, folder_label_rect};

        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/list"))
                .and(query_param("token", "test-token"))
                .and(query_param("folders", "sc"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(items_body(&["i1"]))
                        .set_delay(Duration::from_millis(300)),
                )
                .expect(1)
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.state.finish_folder_load(vec![Folder {
            id: "onmk".into(),
            name: "onmk".into(),
            children: Some(vec![Folder {
                id: "sc".into(),
                name: "SC".into(),
                children: None,
            }]),
        }]);

        let output = folder_frame(&mut app, &ctx, Vec::new());
        let target = folder_label_rect(&output, "SC").expect("sc row is drawn");
        assert!(app.state.heading().is_none());

        for events in click_frames(target.center()) {
            folder_frame(&mut app, &ctx, events);
        }

        assert_eq!(app.state.heading(), Some("SC"));
        assert!(app.state.is_loading_items);

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);
        assert_eq!(item_ids(&app), vec!["i1"]);
        app.runtime.block_on(server.verify());
    }

    fn mount_items(
        rt: &tokio::runtime::Runtime,
        server: &MockServer,
        folder: &str,
        ids: &[&str],
        delay_ms: u64,
    ) {
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/list"))
                .and(query_param("folders", folder))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(items_body(ids))
                        .set_delay(Duration::from_millis(delay_ms)),
                )
                .expect(1)
                .mount(server),
        );
    }

    #[test]
    fn stale_items_arriving_late_are_dropped() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        mount_items(&rt, &server, "a", &["a1"], 400);
        mount_items(&rt, &server, "b", &["b1", "b2"], 0);

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "a", "A");
        app.select_folder(&ctx, "b", "B");

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);
        assert_eq!(item_ids(&app), vec!["b1", "b2"]);

        // A resolves after B and must not overwrite it
        pump_for(&mut app, &ctx, Duration::from_millis(700));
        assert_eq!(item_ids(&app), vec!["b1", "b2"]);
        assert_eq!(app.state.heading(), Some("B"));
        app.runtime.block_on(server.verify());
    }

    #[test]
    fn stale_items_arriving_early_are_dropped() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        mount_items(&rt, &server, "a", &["a1"], 0);
        mount_items(&rt, &server, "b", &["b1"], 400);

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "a", "A");
        app.select_folder(&ctx, "b", "B");

        // A's response lands first but B is still pending
        pump_for(&mut app, &ctx, Duration::from_millis(150));
        assert!(app.state.is_loading_items);
        assert!(app.state.items.is_empty());

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);
        assert_eq!(item_ids(&app), vec!["b1"]);
        app.runtime.block_on(server.verify());
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn thumbnails_load_once_and_failures_are_hidden() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        mount_items(&rt, &server, "sc", &["good", "broken"], 0);
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/rawthumbnail"))
                .and(query_param("id", "good"))
                .and(query_param("token", "test-token"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
                .expect(1)
                .mount(&server),
        );
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/rawthumbnail"))
                .and(query_param("id", "broken"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
                .expect(1)
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "sc", "SC");
        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);

        for _ in 0..3 {
            app.ensure_thumbnail(&ctx, "good");
            app.ensure_thumbnail(&ctx, "broken");
        }
        pump_until(&mut app, &ctx, |app| {
            ["good", "broken"]
                .iter()
                .all(|id| !matches!(app.thumbnails.get(*id), Some(Thumbnail::Loading)))
        });

        let good = app.cached_thumbnail("good").expect("decoded thumbnail");
        assert_eq!(good.size(), [4, 4]);
        assert!(matches!(app.thumbnails.get("broken"), Some(Thumbnail::Hidden)));
        assert!(app.cached_thumbnail("broken").is_none());
        app.runtime.block_on(server.verify());
    }

    #[test]
    fn thumbnails_from_previous_selection_are_discarded() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        mount_items(&rt, &server, "a", &["a1"], 0);
        mount_items(&rt, &server, "b", &["b1"], 0);
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/rawthumbnail"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_bytes(png_bytes())
                        .set_delay(Duration::from_millis(200)),
                )
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "a", "A");
        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);
        app.ensure_thumbnail(&ctx, "a1");

        app.select_folder(&ctx, "b", "B");
        assert!(app.thumbnails.is_empty());

        pump_for(&mut app, &ctx, Duration::from_millis(400));
        assert!(app.thumbnails.get("a1").is_none());
        assert_eq!(item_ids(&app), vec!["b1"]);
    }

    #[test]
    fn queued_thumbnails_for_replaced_selection_never_download() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        mount_items(&rt, &server, "a", &["a1"], 0);
        mount_items(&rt, &server, "b", &["b1"], 0);
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/item/rawthumbnail"))
                .and(query_param("id", "a1"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
                .expect(0)
                .mount(&server),
        );

        let ctx = egui::Context::default();
        let mut app = app_for(&server, rt);
        app.select_folder(&ctx, "a", "A");
        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);

        // Hold every download slot so a1 stays queued
        let slots = app
            .thumbnail_permits
            .clone()
            .try_acquire_many_owned(THUMBNAIL_CONCURRENCY as u32)
            .unwrap();
        app.ensure_thumbnail(&ctx, "a1");

        app.select_folder(&ctx, "b", "B");
        drop(slots);

        pump_until(&mut app, &ctx, |app| !app.state.is_loading_items);
        pump_for(&mut app, &ctx, Duration::from_millis(300));

        assert!(app.thumbnails.is_empty());
        assert_eq!(
            app.thumbnail_permits.available_permits(),
            THUMBNAIL_CONCURRENCY
        );
        app.runtime.block_on(server.verify());
    }
}
