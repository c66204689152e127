//! The reorder protocol — composes debouncing, selection, window computation
//! and the drag state machine for an arbitrary collection of sortable items.
//!
//! The container holds a transient, debounced view of the caller's
//! collection. Rendering is pure given current state; the only side effect
//! of a drop is arming a debounced commit, which the event loop collects via
//! [`SortableState::poll_commit`] and forwards to the owning caller.

use std::collections::HashSet;
use std::time::Instant;

use crate::animation::AnimationPreset;
use crate::debounce::DebouncedOrder;
use crate::error::SortError;
use crate::item::{position_of, SortableItem};
use crate::persist::{reconcile, OrderEntry};
use crate::virtualize::VirtualWindow;

/// Container configuration.
#[derive(Debug, Clone)]
pub struct SortableOptions {
    /// Toggles the selection set. Selection is display-only and never
    /// affects ordering or persistence.
    pub multi_select: bool,
    /// Opt-in windowed rendering; only takes effect above the threshold.
    pub virtualization: bool,
    /// Display-only cap indicator. Does not truncate data.
    pub max_items: Option<usize>,
    /// Enables the persistence adapter for this container's commits.
    pub persist_order: bool,
    pub animation: AnimationPreset,
    /// Uniform row height in terminal rows.
    pub item_height: u16,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            multi_select: false,
            virtualization: false,
            max_items: None,
            persist_order: false,
            animation: AnimationPreset::default(),
            item_height: 1,
        }
    }
}

/// One in-flight drag. At most one exists system-wide per container tree;
/// `drag_start` refuses to start a second.
#[derive(Debug, Clone)]
struct Drag {
    active_id: String,
    over_id: Option<String>,
}

/// Generic container state: the debounced collection view plus drag and
/// selection state. The drag lifecycle per row is
/// idle → dragging → (dropped | cancelled) → idle.
pub struct SortableState<T> {
    order: DebouncedOrder<T>,
    options: SortableOptions,
    selection: HashSet<String>,
    drag: Option<Drag>,
    pre_drag: Option<Vec<T>>,
}

impl<T: SortableItem + Clone> SortableState<T> {
    pub fn new(items: Vec<T>, options: SortableOptions) -> Self {
        Self {
            order: DebouncedOrder::new(items),
            options,
            selection: HashSet::new(),
            drag: None,
            pre_drag: None,
        }
    }

    pub fn options(&self) -> &SortableOptions {
        &self.options
    }

    /// The current debounced view.
    pub fn visible(&self) -> &[T] {
        self.order.visible()
    }

    pub fn len(&self) -> usize {
        self.order.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.visible().is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Id of the row being dragged, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.active_id.as_str())
    }

    /// Id of the row currently under the drag, if any.
    pub fn drag_target(&self) -> Option<&str> {
        self.drag.as_ref().and_then(|d| d.over_id.as_deref())
    }

    /// Begin dragging `id`. Returns whether the drag actually started:
    /// refused while another drag is in progress, for unknown ids, and for
    /// disabled rows.
    pub fn drag_start(&mut self, id: &str) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let grabbable = self
            .order
            .visible()
            .iter()
            .any(|item| item.id() == id && !item.disabled());
        if !grabbable {
            return false;
        }
        self.pre_drag = Some(self.order.visible().to_vec());
        self.drag = Some(Drag {
            active_id: id.to_string(),
            over_id: None,
        });
        true
    }

    /// Record the row currently under the drag. Disabled rows can never be
    /// drop targets; hovering the active row itself clears the target.
    pub fn drag_over(&mut self, id: &str) {
        let valid = self
            .order
            .visible()
            .iter()
            .any(|item| item.id() == id && !item.disabled());
        if let Some(drag) = &mut self.drag {
            if drag.active_id == id {
                drag.over_id = None;
            } else if valid {
                drag.over_id = Some(id.to_string());
            }
        }
    }

    /// Resolve a drop of `active_id` onto `over_id`.
    ///
    /// No target, or a drop onto the row's own position, is a no-op: the
    /// sequence is unchanged and no commit is scheduled. Otherwise the
    /// active item moves to the target's index (remove then insert — the
    /// relative order of all other items is preserved), every item is
    /// re-stamped with its new zero-based index, and the result is pushed
    /// through the debounce adapter. On a resolution failure the view
    /// reverts to the pre-drag order and the error is returned for the
    /// caller's error channel — a failed drop is never silently applied.
    pub fn drag_end(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        now: Instant,
    ) -> Result<Option<Vec<T>>, SortError> {
        self.drag = None;
        let snapshot = self.pre_drag.take();

        let Some(over_id) = over_id else {
            return Ok(None);
        };
        if over_id == active_id {
            return Ok(None);
        }

        match self.apply_move(active_id, over_id, now) {
            Ok(seq) => Ok(Some(seq)),
            Err(e) => {
                if let Some(snapshot) = snapshot {
                    self.order.set_visible(snapshot);
                }
                Err(e)
            }
        }
    }

    /// Drop using the tracked drag state.
    pub fn drop_current(&mut self, now: Instant) -> Result<Option<Vec<T>>, SortError> {
        let Some(drag) = self.drag.clone() else {
            return Ok(None);
        };
        self.drag_end(&drag.active_id, drag.over_id.as_deref(), now)
    }

    /// Cancel the drag: pre-drag order restored, no commit scheduled.
    pub fn drag_cancel(&mut self) {
        if self.drag.take().is_some() {
            if let Some(snapshot) = self.pre_drag.take() {
                self.order.set_visible(snapshot);
            }
        }
        self.pre_drag = None;
    }

    fn apply_move(
        &mut self,
        active_id: &str,
        over_id: &str,
        now: Instant,
    ) -> Result<Vec<T>, SortError> {
        let view = self.order.visible();
        let from = position_of(view, active_id).ok_or_else(|| SortError::ItemNotFound {
            id: active_id.to_string(),
        })?;
        let to = position_of(view, over_id).ok_or_else(|| SortError::ItemNotFound {
            id: over_id.to_string(),
        })?;

        let mut seq = view.to_vec();
        let item = seq.remove(from);
        seq.insert(to, item);
        for (index, item) in seq.iter_mut().enumerate() {
            item.set_order(index);
        }
        self.order.update(seq.clone(), now);
        Ok(seq)
    }

    /// Apply a loaded ordering record through the same debounced commit path
    /// as a drop, so an order restore participates in the same contract as a
    /// user drag.
    pub fn apply_order(&mut self, entries: &[OrderEntry], now: Instant) {
        let items = self.order.visible().to_vec();
        let seq = reconcile(items, entries);
        self.order.update(seq, now);
    }

    /// Toggle selection of `id`. A no-op unless multi-select is enabled.
    pub fn toggle_select(&mut self, id: &str) {
        if !self.options.multi_select {
            return;
        }
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Resynchronize to new canonical caller data. External truth wins: any
    /// in-progress drag is cancelled and pending uncommitted local state is
    /// discarded. Selection entries for vanished ids are pruned.
    pub fn sync_external(&mut self, items: Vec<T>) {
        self.drag = None;
        self.pre_drag = None;
        self.selection
            .retain(|id| items.iter().any(|item| item.id() == id));
        self.order.sync_external(items);
    }

    /// Collect a due commit, if any. Called from the event loop tick; the
    /// caller forwards the sequence to its items-change path.
    pub fn poll_commit(&mut self, now: Instant) -> Option<Vec<T>> {
        self.order.poll(now)
    }

    pub fn has_pending_commit(&self) -> bool {
        self.order.has_pending()
    }

    /// Window into the current view for the given viewport.
    pub fn window(&self, viewport_height: u16, scroll_top: usize) -> VirtualWindow {
        VirtualWindow::compute(
            self.len(),
            self.options.item_height,
            viewport_height,
            scroll_top,
            self.options.virtualization,
        )
    }
}
