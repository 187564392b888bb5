//! Pure pointer classification over view geometry.
//!
//! Every function here is a predicate or classifier over `(view, point)`;
//! nothing mutates. The margins are layered so the regions nest without
//! overlapping: the resize ring wins at the outer edge, the move ring sits
//! just inside it, and the interior belongs to the client.

use bitflags::bitflags;

use crate::config::{BTN_H, BTN_PAD, BTN_W};
use crate::view::{DecorationMode, View};

/// Height of the synthetic drag strip offered to `foot` terminals, which have
/// no usable titlebar of their own.
pub const FOOT_DRAG_HEIGHT: i32 = 32;
pub const FOOT_DRAG_SIDE_PAD: i32 = 6;

bitflags! {
    /// Edges involved in a resize. A set with two adjacent edges is a corner
    /// drag; the empty set means "no resize here" and is a normal outcome.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResizeEdges: u32 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// Keep a hit margin usable on small windows: never wider than half the
/// frame on either axis, never less than one pixel.
fn clamp_hit_margin(view: &View, margin: i32) -> i32 {
    margin
        .min(view.width / 2)
        .min(view.height / 2)
        .max(1)
}

/// Distance from each frame edge within which a press counts as a resize.
///
/// Client-decorated windows hide the compositor border, so they get a wider
/// practical zone; `foot` gets a bit more still because of its dense top
/// chrome. This is a compatibility heuristic, not a general rule.
pub fn resize_hit_margin(view: &View) -> i32 {
    let margin = if view.decoration == DecorationMode::ClientSide {
        if view.app_id_contains("foot") { 16 } else { 14 }
    } else {
        view.border_px().max(6)
    };
    clamp_hit_margin(view, margin)
}

/// Distance from each frame edge within which a press counts as a move.
///
/// Always strictly wider than the resize margin so the two rings nest
/// instead of competing.
pub fn move_border_margin(view: &View) -> i32 {
    let margin = if view.decoration == DecorationMode::ClientSide {
        40
    } else {
        view.border_px().max(12)
    };
    let mut margin = clamp_hit_margin(view, margin);
    let resize_margin = resize_hit_margin(view);
    if margin <= resize_margin {
        margin = resize_margin + 1;
    }
    clamp_hit_margin(view, margin)
}

/// How far outside the decorated frame a grab is still recognized, so the
/// corners of borderless client-decorated windows remain reachable.
pub fn outer_grab_pad(view: &View) -> i32 {
    let pad = if view.decoration == DecorationMode::ClientSide {
        if view.app_id_contains("foot") { 16 } else { 14 }
    } else {
        4
    };
    clamp_hit_margin(view, pad)
}

/// True if the point falls inside the frame inflated by the outer grab pad.
pub fn point_in_grab_extent(view: &View, lx: f64, ly: f64) -> bool {
    let pad = outer_grab_pad(view) as f64;
    lx >= view.x as f64 - pad
        && ly >= view.y as f64 - pad
        && lx < (view.x + view.width) as f64 + pad
        && ly < (view.y + view.height) as f64 + pad
}

/// Classify a point against the view's resize ring, returning the edges a
/// drag from it would adjust.
pub fn resize_edges_at(view: &View, lx: f64, ly: f64) -> ResizeEdges {
    let margin = resize_hit_margin(view);
    let m = margin as f64;
    if lx < view.x as f64 - m
        || ly < view.y as f64 - m
        || lx >= (view.x + view.width) as f64 + m
        || ly >= (view.y + view.height) as f64 + m
    {
        return ResizeEdges::empty();
    }

    let local_x = lx - view.x as f64;
    let local_y = ly - view.y as f64;
    let mut edges = ResizeEdges::empty();
    if local_x < m {
        edges |= ResizeEdges::LEFT;
    }
    if local_x >= (view.width - margin) as f64 {
        edges |= ResizeEdges::RIGHT;
    }
    if local_y < m {
        edges |= ResizeEdges::TOP;
    }
    if local_y >= (view.height - margin) as f64 {
        edges |= ResizeEdges::BOTTOM;
    }
    edges
}

/// True inside the move ring: within the move margin of an edge but outside
/// the resize ring. Shrinks to nothing on windows too small to hold both
/// rings, which simply leaves no move affordance there.
pub fn point_in_frame_border(view: &View, lx: f64, ly: f64) -> bool {
    if !point_in_grab_extent(view, lx, ly) {
        return false;
    }

    let move_margin = move_border_margin(view) as f64;
    let resize_margin = resize_hit_margin(view) as f64;
    let local_x = lx - view.x as f64;
    let local_y = ly - view.y as f64;

    let in_move_ring = local_x < move_margin
        || local_x >= view.width as f64 - move_margin
        || local_y < move_margin
        || local_y >= view.height as f64 - move_margin;
    if !in_move_ring {
        return false;
    }

    let in_resize_ring = local_x < resize_margin
        || local_x >= view.width as f64 - resize_margin
        || local_y < resize_margin
        || local_y >= view.height as f64 - resize_margin;
    !in_resize_ring
}

/// True over the titlebar minimize button of a server-decorated view.
pub fn point_in_minimize_button(view: &View, lx: f64, ly: f64) -> bool {
    if view.decoration != DecorationMode::ServerSide {
        return false;
    }
    let border = view.border_px();
    let title_h = view.titlebar_px();
    let btn_x = view.x + view.width - border - BTN_W - BTN_PAD;
    let btn_y = view.y + (title_h - BTN_H) / 2;
    lx >= btn_x as f64
        && ly >= btn_y as f64
        && lx < (btn_x + BTN_W) as f64
        && ly < (btn_y + BTN_H) as f64
}

/// True over the titlebar drag area, which excludes the minimize button.
pub fn point_in_titlebar_drag_region(view: &View, lx: f64, ly: f64) -> bool {
    if view.decoration != DecorationMode::ServerSide {
        return false;
    }
    let title_h = view.titlebar_px();
    if ly < view.y as f64
        || ly >= (view.y + title_h) as f64
        || lx < view.x as f64
        || lx >= (view.x + view.width) as f64
    {
        return false;
    }
    !point_in_minimize_button(view, lx, ly)
}

/// Narrow top drag strip recognized for client-decorated `foot` windows only.
pub fn point_in_foot_drag_region(view: &View, lx: f64, ly: f64) -> bool {
    if view.decoration == DecorationMode::ServerSide || !view.app_id_contains("foot") {
        return false;
    }
    let local_x = lx - view.x as f64;
    let local_y = ly - view.y as f64;
    if local_x < FOOT_DRAG_SIDE_PAD as f64
        || local_x >= (view.width - FOOT_DRAG_SIDE_PAD) as f64
    {
        return false;
    }
    local_y >= 0.0 && local_y < FOOT_DRAG_HEIGHT as f64
}
