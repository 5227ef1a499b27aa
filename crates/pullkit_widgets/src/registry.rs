//! Controller registry
//!
//! Owns the controllers attached to each registered scroll container and
//! routes that container's notifications to them. Containers are held weakly;
//! a container that goes away leaves a stale entry until [`ControllerRegistry::prune`]
//! or [`ControllerRegistry::detach`] removes it.

use std::sync::Arc;

use pullkit_core::{ScrollEvent, ScrollMetrics};
use slotmap::{new_key_type, SlotMap};

use crate::container::{SharedContainer, WeakContainer};
use crate::error::{PullkitError, Result};
use crate::infinite_scroll::InfiniteScroll;
use crate::inset::{InsetCoordinator, SharedInsetCoordinator};
use crate::pull_to_refresh::PullToRefresh;

new_key_type! {
    /// Handle for a registered scroll container
    pub struct ContainerId;
}

struct Entry {
    container: WeakContainer,
    coordinator: SharedInsetCoordinator,
    pull_to_refresh: Option<PullToRefresh>,
    infinite_scroll: Option<InfiniteScroll>,
    /// Last snapshot seen by `dispatch` or `poll`
    last_sample: Option<ScrollMetrics>,
}

impl Entry {
    fn container(&self) -> Result<SharedContainer> {
        self.container.upgrade().ok_or(PullkitError::ContainerDropped)
    }

    fn deliver(&mut self, event: &ScrollEvent) {
        if let Some(refresh) = self.pull_to_refresh.as_mut() {
            event.deliver(refresh);
        }
        if let Some(infinite) = self.infinite_scroll.as_mut() {
            event.deliver(infinite);
        }
        self.last_sample = Some(*event.metrics());
    }

    fn detach_all(&mut self) {
        if let Some(mut refresh) = self.pull_to_refresh.take() {
            refresh.detach();
        }
        if let Some(mut infinite) = self.infinite_scroll.take() {
            infinite.detach();
        }
    }
}

/// Scroll containers and the controllers attached to them
pub struct ControllerRegistry {
    entries: SlotMap<ContainerId, Entry>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Register a container. The registry keeps only a weak reference.
    pub fn register(&mut self, container: &SharedContainer) -> ContainerId {
        let id = self.entries.insert(Entry {
            container: Arc::downgrade(container),
            coordinator: InsetCoordinator::shared(container),
            pull_to_refresh: None,
            infinite_scroll: None,
            last_sample: None,
        });
        tracing::debug!("registered scroll container {:?}", id);
        id
    }

    pub fn contains(&self, id: ContainerId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strong handle to a registered container, if it is still alive
    pub fn container(&self, id: ContainerId) -> Option<SharedContainer> {
        self.entries.get(id).and_then(|entry| entry.container.upgrade())
    }

    /// Attach `controller` to the top edge of container `id`.
    ///
    /// The baseline is the container's top inset right now, or the previous
    /// controller's baseline when one is being replaced.
    pub fn install_pull_to_refresh(
        &mut self,
        id: ContainerId,
        mut controller: PullToRefresh,
    ) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(PullkitError::UnknownContainer)?;
        let container = entry.container()?;

        let baseline = match entry.pull_to_refresh.take() {
            Some(mut previous) => {
                previous.detach();
                previous.original_inset()
            }
            None => current_metrics(&container)?.content_inset.top,
        };

        controller.attach(&entry.coordinator, baseline)?;
        entry.pull_to_refresh = Some(controller);
        Ok(())
    }

    /// Attach `controller` to the bottom edge of container `id`.
    ///
    /// Baseline is chosen as for [`install_pull_to_refresh`](Self::install_pull_to_refresh).
    pub fn install_infinite_scroll(
        &mut self,
        id: ContainerId,
        mut controller: InfiniteScroll,
    ) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(PullkitError::UnknownContainer)?;
        let container = entry.container()?;

        let baseline = match entry.infinite_scroll.take() {
            Some(mut previous) => {
                previous.detach();
                previous.original_inset()
            }
            None => current_metrics(&container)?.content_inset.bottom,
        };

        controller.attach(&entry.coordinator, baseline)?;
        entry.infinite_scroll = Some(controller);
        Ok(())
    }

    pub fn pull_to_refresh(&self, id: ContainerId) -> Option<&PullToRefresh> {
        self.entries.get(id)?.pull_to_refresh.as_ref()
    }

    pub fn pull_to_refresh_mut(&mut self, id: ContainerId) -> Option<&mut PullToRefresh> {
        self.entries.get_mut(id)?.pull_to_refresh.as_mut()
    }

    pub fn infinite_scroll(&self, id: ContainerId) -> Option<&InfiniteScroll> {
        self.entries.get(id)?.infinite_scroll.as_ref()
    }

    pub fn infinite_scroll_mut(&mut self, id: ContainerId) -> Option<&mut InfiniteScroll> {
        self.entries.get_mut(id)?.infinite_scroll.as_mut()
    }

    /// Route one notification to the controllers of container `id`,
    /// pull-to-refresh first
    pub fn dispatch(&mut self, id: ContainerId, event: ScrollEvent) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(PullkitError::UnknownContainer)?;
        entry.deliver(&event);
        Ok(())
    }

    /// Sample container `id` and dispatch whatever changed since the last
    /// sample: a size event first, then an offset event.
    ///
    /// For hosts whose view cannot push notifications. Returns true if any
    /// event was dispatched.
    pub fn poll(&mut self, id: ContainerId) -> Result<bool> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(PullkitError::UnknownContainer)?;
        let metrics = current_metrics(&entry.container()?)?;

        let (size_changed, offset_changed) = match entry.last_sample {
            Some(last) => (
                last.content_size != metrics.content_size
                    || last.viewport_size != metrics.viewport_size,
                last.content_offset != metrics.content_offset
                    || last.is_dragging != metrics.is_dragging,
            ),
            None => (true, true),
        };

        if size_changed {
            entry.deliver(&ScrollEvent::ContentSizeChanged(metrics));
        }
        if offset_changed {
            entry.deliver(&ScrollEvent::ContentOffsetChanged(metrics));
        }
        Ok(size_changed || offset_changed)
    }

    /// Detach both controllers of container `id`, reverting their insets,
    /// and forget the container
    pub fn detach(&mut self, id: ContainerId) -> Result<()> {
        let mut entry = self
            .entries
            .remove(id)
            .ok_or(PullkitError::UnknownContainer)?;
        entry.detach_all();
        tracing::debug!("detached scroll container {:?}", id);
        Ok(())
    }

    /// Drop every entry whose container is gone. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let stale: Vec<ContainerId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.container.strong_count() == 0)
            .map(|(id, _)| id)
            .collect();

        for id in &stale {
            if let Some(mut entry) = self.entries.remove(*id) {
                entry.detach_all();
            }
        }
        if !stale.is_empty() {
            tracing::debug!("pruned {} dropped scroll containers", stale.len());
        }
        stale.len()
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn current_metrics(container: &SharedContainer) -> Result<ScrollMetrics> {
    container
        .lock()
        .map(|container| container.metrics())
        .map_err(|_| PullkitError::ContainerDropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InfiniteScrollConfig, PullToRefreshConfig};
    use crate::container::ScrollContainer;
    use crate::scroll_view::ScrollView;
    use crate::state::{InfiniteScrollState, RefreshState};
    use pullkit_core::{Edge, EdgeInsets, Size};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn feed_view(inset: EdgeInsets) -> (Arc<Mutex<ScrollView>>, SharedContainer) {
        let mut view = ScrollView::new(Size::new(320.0, 500.0));
        view.set_content_size(Size::new(320.0, 1000.0));
        view.set_content_inset(inset);
        let view = Arc::new(Mutex::new(view));
        let container: SharedContainer = view.clone();
        (view, container)
    }

    fn insets(view: &Arc<Mutex<ScrollView>>) -> EdgeInsets {
        view.lock().unwrap().content_inset()
    }

    #[test]
    fn test_install_uses_current_inset_as_baseline() {
        let (view, container) = feed_view(EdgeInsets::new(20.0, 10.0, 0.0, 0.0));
        let mut registry = ControllerRegistry::new();
        let id = registry.register(&container);

        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        registry
            .install_infinite_scroll(id, InfiniteScroll::with_config(InfiniteScrollConfig::immediate()))
            .unwrap();

        assert_eq!(registry.pull_to_refresh(id).unwrap().original_inset(), 20.0);
        assert_eq!(registry.infinite_scroll(id).unwrap().original_inset(), 10.0);
        assert_eq!(registry.infinite_scroll(id).unwrap().anchor_y(), 1000.0);

        registry.pull_to_refresh_mut(id).unwrap().start();
        registry.infinite_scroll_mut(id).unwrap().start();
        assert_eq!(insets(&view), EdgeInsets::new(80.0, 70.0, 0.0, 0.0));

        registry.detach(id).unwrap();
        assert_eq!(insets(&view), EdgeInsets::new(20.0, 10.0, 0.0, 0.0));
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_dispatch_drives_both_controllers() {
        let (view, container) = feed_view(EdgeInsets::ZERO);
        let mut registry = ControllerRegistry::new();
        let id = registry.register(&container);

        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        registry
            .install_infinite_scroll(
                id,
                InfiniteScroll::with_config(InfiniteScrollConfig::immediate()).on_load_more(
                    move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    },
                ),
            )
            .unwrap();

        let event = view.lock().unwrap().drag_to(-80.0);
        registry.dispatch(id, event).unwrap();
        assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Triggered);

        let event = view.lock().unwrap().drag_to(600.0);
        registry.dispatch(id, event).unwrap();
        let event = view.lock().unwrap().release();
        registry.dispatch(id, event).unwrap();

        assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Stopped);
        assert_eq!(
            registry.infinite_scroll(id).unwrap().state(),
            InfiniteScrollState::Loading
        );
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(insets(&view).bottom, 60.0);
    }

    #[test]
    fn test_poll_emits_only_changes() {
        let (view, container) = feed_view(EdgeInsets::ZERO);
        let mut registry = ControllerRegistry::new();
        let id = registry.register(&container);
        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();

        assert!(registry.poll(id).unwrap());
        assert!(!registry.poll(id).unwrap());

        view.lock().unwrap().drag_to(-80.0);
        assert!(registry.poll(id).unwrap());
        assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Triggered);

        view.lock().unwrap().release();
        assert!(registry.poll(id).unwrap());
        assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Loading);
    }

    #[test]
    fn test_reinstall_keeps_original_baseline() {
        let (view, container) = feed_view(EdgeInsets::new(15.0, 0.0, 0.0, 0.0));
        let mut registry = ControllerRegistry::new();
        let id = registry.register(&container);

        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        registry.pull_to_refresh_mut(id).unwrap().start();

        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        assert_eq!(insets(&view).top, 15.0);
        assert_eq!(registry.pull_to_refresh(id).unwrap().original_inset(), 15.0);
        assert_eq!(registry.pull_to_refresh(id).unwrap().state(), RefreshState::Stopped);
    }

    #[test]
    fn test_unknown_and_dropped_containers() {
        let (view, container) = feed_view(EdgeInsets::ZERO);
        let mut registry = ControllerRegistry::default();
        let id = registry.register(&container);
        registry.detach(id).unwrap();

        assert_eq!(registry.detach(id), Err(PullkitError::UnknownContainer));
        assert_eq!(registry.poll(id), Err(PullkitError::UnknownContainer));
        let event = ScrollEvent::ContentOffsetChanged(ScrollMetrics::default());
        assert_eq!(registry.dispatch(id, event), Err(PullkitError::UnknownContainer));

        let id = registry.register(&container);
        drop(container);
        drop(view);
        assert!(registry.container(id).is_none());
        assert_eq!(
            registry.install_pull_to_refresh(id, PullToRefresh::new()),
            Err(PullkitError::ContainerDropped)
        );
        assert_eq!(registry.poll(id), Err(PullkitError::ContainerDropped));
    }

    #[test]
    fn test_prune_removes_dropped_containers() {
        let (_view, kept) = feed_view(EdgeInsets::ZERO);
        let (dropped_view, dropped) = feed_view(EdgeInsets::ZERO);

        let mut registry = ControllerRegistry::new();
        let kept_id = registry.register(&kept);
        let dropped_id = registry.register(&dropped);
        registry
            .install_pull_to_refresh(dropped_id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        registry.pull_to_refresh_mut(dropped_id).unwrap().start();

        drop(dropped);
        drop(dropped_view);

        assert_eq!(registry.prune(), 1);
        assert!(registry.contains(kept_id));
        assert!(!registry.contains(dropped_id));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.prune(), 0);
    }

    #[test]
    fn test_edges_are_independent() {
        let (view, container) = feed_view(EdgeInsets::ZERO);
        let mut registry = ControllerRegistry::new();
        let id = registry.register(&container);
        registry
            .install_pull_to_refresh(id, PullToRefresh::with_config(PullToRefreshConfig::immediate()))
            .unwrap();
        registry
            .install_infinite_scroll(id, InfiniteScroll::with_config(InfiniteScrollConfig::immediate()))
            .unwrap();

        registry.pull_to_refresh_mut(id).unwrap().start();
        registry.infinite_scroll_mut(id).unwrap().start();
        registry.infinite_scroll_mut(id).unwrap().stop();

        let inset = insets(&view);
        assert_eq!(inset.get(Edge::Top), 60.0);
        assert_eq!(inset.get(Edge::Bottom), 0.0);
    }
}
