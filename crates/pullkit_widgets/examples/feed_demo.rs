//! Feed Demo
//!
//! Simulates a paged feed: pull down to reload, scroll past the end to fetch
//! the next page until the server runs dry.
//!
//! Run with: RUST_LOG=debug cargo run -p pullkit_widgets --example feed_demo

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pullkit_core::Size;
use pullkit_widgets::prelude::*;
use tracing_subscriber::EnvFilter;

const ROW_HEIGHT: f32 = 80.0;
const PAGE_SIZE: usize = 10;
const LAST_PAGE: usize = 3;
const FRAME: Duration = Duration::from_millis(16);

/// Rows the pretend backend has handed out so far
struct Feed {
    rows: usize,
    pages: usize,
}

impl Feed {
    fn content_size(&self) -> Size {
        Size::new(375.0, self.rows as f32 * ROW_HEIGHT)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let view = Arc::new(Mutex::new(ScrollView::new(Size::new(375.0, 667.0))));
    let container: SharedContainer = view.clone();
    let mut registry = ControllerRegistry::new();
    let id = registry.register(&container);

    let refresh_requested = Arc::new(AtomicBool::new(false));
    let page_requested = Arc::new(AtomicBool::new(false));

    let flag = refresh_requested.clone();
    let mut refresh = PullToRefresh::new()
        .on_refresh(move || flag.store(true, Ordering::SeqCst));
    refresh.on_state_change(|state| tracing::info!("refresh indicator: {:?}", state));
    registry.install_pull_to_refresh(id, refresh)?;

    let flag = page_requested.clone();
    let infinite = InfiniteScroll::new().on_load_more(move || flag.store(true, Ordering::SeqCst));
    registry.install_infinite_scroll(id, infinite)?;

    let mut feed = Feed {
        rows: PAGE_SIZE,
        pages: 1,
    };
    let event = lock(&view).set_content_size(feed.content_size());
    registry.dispatch(id, event)?;

    // Pull to refresh
    drag(&mut registry, id, &view, &[-20.0, -50.0, -90.0])?;
    release(&mut registry, id, &view)?;
    animate(&view);

    if refresh_requested.swap(false, Ordering::SeqCst) {
        feed = Feed {
            rows: PAGE_SIZE,
            pages: 1,
        };
        tracing::info!("feed reloaded: {} rows", feed.rows);
        if let Some(refresh) = registry.pull_to_refresh_mut(id) {
            refresh.stop();
        }
        let event = lock(&view).set_content_offset(Default::default());
        registry.dispatch(id, event)?;
        animate(&view);
    }

    // Page through to the end
    loop {
        let end = feed.content_size().height - 667.0;
        drag(&mut registry, id, &view, &[end, end + 40.0, end + 90.0])?;
        release(&mut registry, id, &view)?;
        animate(&view);

        if !page_requested.swap(false, Ordering::SeqCst) {
            break;
        }

        if feed.pages == LAST_PAGE {
            tracing::info!("no more pages");
            if let Some(infinite) = registry.infinite_scroll_mut(id) {
                infinite.set_exhausted(true);
            }
        } else {
            feed.rows += PAGE_SIZE;
            feed.pages += 1;
            tracing::info!("page {} loaded: {} rows", feed.pages, feed.rows);

            let event = lock(&view).set_content_size(feed.content_size());
            registry.dispatch(id, event)?;
            if let Some(infinite) = registry.infinite_scroll_mut(id) {
                infinite.stop();
            }
        }
        animate(&view);
    }

    let state = registry.infinite_scroll(id).map(|infinite| infinite.state());
    tracing::info!("done after {} pages, infinite scroll {:?}", feed.pages, state);

    registry.detach(id)?;
    animate(&view);
    tracing::info!("final inset {:?}", lock(&view).content_inset());
    Ok(())
}

fn lock(view: &Arc<Mutex<ScrollView>>) -> std::sync::MutexGuard<'_, ScrollView> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn drag(
    registry: &mut ControllerRegistry,
    id: ContainerId,
    view: &Arc<Mutex<ScrollView>>,
    offsets: &[f32],
) -> Result<()> {
    for offset in offsets {
        let event = lock(view).drag_to(*offset);
        registry.dispatch(id, event)?;
    }
    Ok(())
}

fn release(
    registry: &mut ControllerRegistry,
    id: ContainerId,
    view: &Arc<Mutex<ScrollView>>,
) -> Result<()> {
    let event = lock(view).release();
    registry.dispatch(id, event)
}

fn animate(view: &Arc<Mutex<ScrollView>>) {
    let mut frames = 0;
    while lock(view).tick(FRAME) {
        frames += 1;
    }
    tracing::debug!("insets settled after {} frames", frames);
}
