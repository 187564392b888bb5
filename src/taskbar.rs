//! Minimized-window taskbar: dirty-flagged slot packing and hit-testing.
//!
//! Buttons pack left-to-right in focus-stack order. The real layout and the
//! prediction used by the animation engine run the exact same packing
//! routine, so a slot predicted before a view is actually minimized is
//! bit-for-bit the slot the next real recompute assigns, given the same
//! minimized set and titles.

use std::collections::BTreeMap;

use crate::geometry::Rect;
use crate::view::{View, ViewId};

pub const TASKBAR_HEIGHT: i32 = 30;
pub const TASKBAR_MARGIN: i32 = 6;
pub const TASKBAR_BUTTON_H: i32 = 22;
pub const TASKBAR_BUTTON_MIN_W: i32 = 110;
pub const TASKBAR_BUTTON_MAX_W: i32 = 240;
pub const TASKBAR_TEXT_PAD_X: i32 = 8;

const TASKBAR_TEXT_SCALE: i32 = 1;
const TASKBAR_GLYPH_W: i32 = 5;
const TASKBAR_TEXT_ADV: i32 = (TASKBAR_GLYPH_W + 1) * TASKBAR_TEXT_SCALE;

/// Bar height, never smaller than a button plus breathing room.
pub fn bar_height() -> i32 {
    TASKBAR_HEIGHT.max(TASKBAR_BUTTON_H + 4)
}

fn text_pixel_width(nchars: usize) -> i32 {
    if nchars == 0 {
        return 0;
    }
    nchars as i32 * TASKBAR_TEXT_ADV - TASKBAR_TEXT_SCALE
}

/// Button width for a title: text plus padding, clamped to the configured
/// min/max button widths.
pub fn button_width_for_title(title: &str) -> i32 {
    let title_px = text_pixel_width(title.chars().count());
    (title_px + TASKBAR_TEXT_PAD_X * 2).clamp(TASKBAR_BUTTON_MIN_W, TASKBAR_BUTTON_MAX_W)
}

/// Pack button boxes for `entries` (id plus desired width, already in
/// traversal order) into `layout`. Packing stops once the remaining bar width
/// drops below the minimum button width; a button is never wider than the
/// space left for it.
fn place_buttons(layout: Rect, entries: &[(ViewId, i32)]) -> Vec<(ViewId, Rect)> {
    let bar_h = bar_height();
    let mut button_h = TASKBAR_BUTTON_H.min(bar_h - 4);
    if button_h < 10 {
        button_h = bar_h;
    }
    let button_y = (bar_h - button_h) / 2;
    let bar_y = layout.y + layout.height - bar_h;

    let mut placed = Vec::with_capacity(entries.len());
    let mut cursor_x = TASKBAR_MARGIN;
    for &(id, width) in entries {
        let remaining = layout.width - TASKBAR_MARGIN - cursor_x;
        if remaining < TASKBAR_BUTTON_MIN_W {
            break;
        }
        let button_w = width.min(remaining);
        placed.push((
            id,
            Rect::new(layout.x + cursor_x, bar_y + button_y, button_w, button_h),
        ));
        cursor_x += button_w + TASKBAR_MARGIN;
    }
    placed
}

#[derive(Debug)]
pub struct Taskbar {
    bar: Option<Rect>,
    dirty: bool,
    last_layout: Option<Rect>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self {
            bar: None,
            dirty: true,
            last_layout: None,
        }
    }

    /// Request a recompute on the next frame tick. Multiple marks between
    /// ticks coalesce into one recompute.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bar rectangle when the taskbar is shown (at least one button placed).
    pub fn bar_rect(&self) -> Option<Rect> {
        self.bar
    }

    pub fn enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Recompute slots if dirty. Discards every cached slot, walks the focus
    /// stack in order, and assigns fresh boxes to mapped minimized views.
    pub fn update(&mut self, layout: Rect, stack: &[ViewId], views: &mut BTreeMap<ViewId, View>) {
        if layout.is_empty() {
            // Transient while outputs reconfigure; keep a recompute pending
            // so the bar comes back as soon as the bounds do.
            for view in views.values_mut() {
                view.taskbar_slot = None;
            }
            self.bar = None;
            self.last_layout = None;
            self.dirty = true;
            return;
        }

        if self.last_layout != Some(layout) {
            self.last_layout = Some(layout);
            self.dirty = true;
        }
        if !self.dirty {
            return;
        }

        for view in views.values_mut() {
            view.taskbar_slot = None;
        }

        let entries: Vec<(ViewId, i32)> = stack
            .iter()
            .filter_map(|id| views.get(id))
            .filter(|view| view.mapped && view.minimized)
            .map(|view| (view.id(), button_width_for_title(view.display_title())))
            .collect();
        let placed = place_buttons(layout, &entries);

        for &(id, slot) in &placed {
            if let Some(view) = views.get_mut(&id) {
                view.taskbar_slot = Some(slot);
            }
        }

        self.bar = if placed.is_empty() {
            None
        } else {
            Some(Rect::new(
                layout.x,
                layout.y + layout.height - bar_height(),
                layout.width,
                bar_height(),
            ))
        };
        tracing::debug!(buttons = placed.len(), "taskbar recomputed");
        self.dirty = false;
    }

    /// Box the taskbar would give `target`, without mutating any real slot.
    ///
    /// With `include_target_if_not_minimized`, the target is packed as if it
    /// were already minimized; this is what the minimize animation uses
    /// before the view's state actually changes. Returns `None` when the
    /// target would not fit.
    pub fn predict_slot(
        &self,
        layout: Rect,
        stack: &[ViewId],
        views: &BTreeMap<ViewId, View>,
        target: ViewId,
        include_target_if_not_minimized: bool,
    ) -> Option<Rect> {
        if layout.is_empty() {
            return None;
        }

        let entries: Vec<(ViewId, i32)> = stack
            .iter()
            .filter_map(|id| views.get(id))
            .filter(|view| {
                view.mapped
                    && (view.minimized
                        || (include_target_if_not_minimized
                            && view.id() == target
                            && !view.minimized))
            })
            .map(|view| (view.id(), button_width_for_title(view.display_title())))
            .collect();

        place_buttons(layout, &entries)
            .into_iter()
            .find(|(id, _)| *id == target)
            .map(|(_, slot)| slot)
    }

    /// Which minimized view's button, if any, sits under the point.
    pub fn view_at(
        &self,
        stack: &[ViewId],
        views: &BTreeMap<ViewId, View>,
        lx: f64,
        ly: f64,
    ) -> Option<ViewId> {
        stack
            .iter()
            .filter_map(|id| views.get(id))
            .find(|view| {
                view.mapped
                    && view.minimized
                    && view
                        .taskbar_slot
                        .is_some_and(|slot| slot.contains(lx, ly))
            })
            .map(|view| view.id())
    }
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}
