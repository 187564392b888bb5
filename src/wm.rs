//! The window manager context: view ownership, the focus stack, the
//! move/resize grab state machine, animation orchestration, and the per-frame
//! tick.
//!
//! One `WindowManager` value is constructed at startup and threaded through
//! every input, shell, and output callback. Everything here runs
//! synchronously inside those callbacks; there is no parallelism and no
//! blocking.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::animate::{self, MINIMIZED_ALPHA};
use crate::config::{Config, MIN_CLIENT_HEIGHT, MIN_CLIENT_WIDTH};
use crate::geometry::Rect;
use crate::hit::{self, ResizeEdges};
use crate::input::{BTN_LEFT, ButtonEvent, ButtonState, Modifiers};
use crate::taskbar::Taskbar;
use crate::view::{DecorationMode, Transition, TweenPoint, View, ViewId};

/// Active grab mode. `Passthrough` is the idle state between grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Passthrough,
    Move,
    Resize,
}

/// Why a client-initiated move/resize request was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrabRejected {
    #[error("no such view")]
    UnknownView,
    #[error("view is not mapped")]
    NotMapped,
    #[error("view is minimized")]
    Minimized,
    #[error("view has an animation in flight")]
    Animating,
    #[error("stale input serial")]
    StaleSerial,
}

/// What the seat collaborator should do with a button event after the window
/// manager has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonDisposition {
    /// Deliver the event to the focused client as an ordinary button event.
    Forward,
    /// The window manager consumed the event (grab started or ended,
    /// taskbar interaction, decoration click).
    Consumed,
}

/// What the seat collaborator should do after pointer motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionOutcome {
    /// Motion drove an active move/resize grab; nothing reaches clients.
    Grab,
    /// The pointer is over a client surface; enter/motion goes there with
    /// surface-local coordinates.
    Focus { view: ViewId, sx: f64, sy: f64 },
    /// No surface under the pointer; clear pointer focus.
    Clear,
}

/// Content size the shell collaborator should configure a client to, after a
/// compositor-driven resize changed the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub view: ViewId,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug)]
pub struct WindowManager {
    config: Config,
    views: BTreeMap<ViewId, View>,
    /// Focus stack, topmost first. Position is z-order; the head is both the
    /// top of the render stack and the first hit-test candidate.
    stack: Vec<ViewId>,
    next_view_id: u64,
    next_view_pos: Option<(i32, i32)>,

    layout_bounds: Rect,
    taskbar: Taskbar,

    cursor_x: f64,
    cursor_y: f64,
    modifiers: Modifiers,
    /// Serial of the currently held pointer press, for validating
    /// client-initiated grab requests.
    pressed_serial: Option<u32>,

    mode: CursorMode,
    grabbed: Option<ViewId>,
    grab_from_client: bool,
    resize_edges: ResizeEdges,
    resize_init: Rect,
    resize_cursor_start: (f64, f64),
    grab_x: f64,
    grab_y: f64,
    /// A press that started a grab (or hit compositor chrome) must not
    /// double-deliver its release as a normal click.
    suppress_until_release: bool,
    pressed_taskbar_view: Option<ViewId>,

    focused: Option<ViewId>,
    configures: Vec<ConfigureRequest>,
}

impl WindowManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            views: BTreeMap::new(),
            stack: Vec::new(),
            next_view_id: 1,
            next_view_pos: None,
            layout_bounds: Rect::default(),
            taskbar: Taskbar::new(),
            cursor_x: 0.0,
            cursor_y: 0.0,
            modifiers: Modifiers::empty(),
            pressed_serial: None,
            mode: CursorMode::Passthrough,
            grabbed: None,
            grab_from_client: false,
            resize_edges: ResizeEdges::empty(),
            resize_init: Rect::default(),
            resize_cursor_start: (0.0, 0.0),
            grab_x: 0.0,
            grab_y: 0.0,
            suppress_until_release: false,
            pressed_taskbar_view: None,
            focused: None,
            configures: Vec::new(),
        }
    }

    // ---- accessors for the rendering and shell collaborators ----

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    /// Focus stack, topmost first.
    pub fn stack(&self) -> &[ViewId] {
        &self.stack
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.mode
    }

    pub fn grabbed_view(&self) -> Option<ViewId> {
        self.grabbed
    }

    pub fn pressed_taskbar_view(&self) -> Option<ViewId> {
        self.pressed_taskbar_view
    }

    pub fn layout_bounds(&self) -> Rect {
        self.layout_bounds
    }

    /// Drain the configure requests produced since the last call.
    pub fn take_configures(&mut self) -> Vec<ConfigureRequest> {
        std::mem::take(&mut self.configures)
    }

    // ---- output collaborator ----

    /// Update the visible desktop bounding box. The taskbar notices the
    /// change on its next recompute.
    pub fn set_layout_bounds(&mut self, bounds: Rect) {
        self.layout_bounds = bounds;
    }

    fn layout_box_or_default(&self) -> Rect {
        if self.layout_bounds.is_empty() {
            Rect::new(0, 0, 1280, 720)
        } else {
            self.layout_bounds
        }
    }

    /// Per-frame tick: advance animations, then run at most one coalesced
    /// taskbar recompute. Returns true while any animation is still running
    /// so the output keeps scheduling frames.
    pub fn frame(&mut self, now_msec: u32) -> bool {
        let animating = self.tick_animations(now_msec);
        self.taskbar
            .update(self.layout_bounds, &self.stack, &mut self.views);
        animating
    }

    // ---- view lifecycle (shell collaborator) ----

    /// Register a new toplevel. It starts unmapped, client-decorated, and
    /// cascade-placed within the layout.
    pub fn create_view(&mut self, app_id: Option<String>) -> ViewId {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;
        let mut view = View::new(id);
        view.app_id = app_id;
        tracing::info!(view = id.0, app_id = ?view.app_id, "new toplevel");
        let (x, y) = self.place_new_view();
        view.set_position(x, y);
        self.views.insert(id, view);
        self.stack.insert(0, id);
        self.taskbar.mark_dirty();
        id
    }

    /// Cascade placement: march down-right from the layout origin, wrapping
    /// when too little room remains for a useful window.
    fn place_new_view(&mut self) -> (i32, i32) {
        let bounds = self.layout_box_or_default();
        let base_x = bounds.x + 48;
        let base_y = bounds.y + 40;
        const STEP_X: i32 = 34;
        const STEP_Y: i32 = 26;
        const MIN_TAIL_W: i32 = 520;
        const MIN_TAIL_H: i32 = 380;

        let (mut next_x, mut next_y) = self.next_view_pos.unwrap_or((base_x, base_y));
        let max_x = (bounds.x + bounds.width - MIN_TAIL_W).max(base_x);
        let max_y = (bounds.y + bounds.height - MIN_TAIL_H).max(base_y);

        let x = next_x.clamp(bounds.x, max_x);
        let y = next_y.clamp(bounds.y, max_y);

        next_x += STEP_X;
        next_y += STEP_Y;
        if next_x > max_x || next_y > max_y {
            next_x = base_x;
            next_y = base_y;
        }
        self.next_view_pos = Some((next_x, next_y));
        (x, y)
    }

    pub fn map_view(&mut self, id: ViewId) {
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.mapped = true;
        view.minimized = false;
        view.transition = Transition::None;
        view.update_geometry();
        view.set_visible(true);
        tracing::info!(
            view = id.0,
            app_id = ?view.app_id,
            frame = ?view.frame_rect(),
            geo = ?view.geo,
            ssd = view.decoration == DecorationMode::ServerSide,
            "view map"
        );
        self.focus_view(id);
        self.taskbar.mark_dirty();
    }

    pub fn unmap_view(&mut self, id: ViewId) {
        if self.pressed_taskbar_view == Some(id) {
            self.pressed_taskbar_view = None;
        }
        if self.grabbed == Some(id) {
            self.cancel_grab();
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.mapped = false;
        view.transition = Transition::None;
        view.visual.activated = false;
        view.set_visible(false);
        tracing::info!(view = id.0, "view unmap");
        self.taskbar.mark_dirty();
    }

    /// Remove a destroyed view and null every back-reference to it in the
    /// same callback. A view destroyed mid-animation simply disappears; the
    /// tween is not unwound.
    pub fn destroy_view(&mut self, id: ViewId) {
        if self.pressed_taskbar_view == Some(id) {
            self.pressed_taskbar_view = None;
        }
        if self.grabbed == Some(id) {
            self.cancel_grab();
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.stack.retain(|other| *other != id);
        if self.views.remove(&id).is_some() {
            tracing::info!(view = id.0, "view destroy");
        }
        self.taskbar.mark_dirty();
    }

    /// Apply a committed surface state. Geometry is left untouched while the
    /// view is minimized or animating; the next commit after the transition
    /// picks it up.
    pub fn commit_view(
        &mut self,
        id: ViewId,
        surface_width: i32,
        surface_height: i32,
        reported_geo: Option<Rect>,
    ) {
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.surface_width = surface_width;
        view.surface_height = surface_height;
        view.reported_geo = reported_geo;
        if !view.mapped || view.minimized || view.transition.is_active() {
            return;
        }
        view.update_geometry();
    }

    pub fn set_title(&mut self, id: ViewId, title: Option<String>) {
        if let Some(view) = self.views.get_mut(&id) {
            view.title = title;
            self.taskbar.mark_dirty();
        }
    }

    pub fn set_app_id(&mut self, id: ViewId, app_id: Option<String>) {
        if let Some(view) = self.views.get_mut(&id) {
            view.app_id = app_id;
            self.taskbar.mark_dirty();
        }
    }

    pub fn set_decoration_mode(&mut self, id: ViewId, mode: DecorationMode) {
        if let Some(view) = self.views.get_mut(&id) {
            view.set_decoration_mode(mode);
        }
    }

    // ---- focus ----

    /// Raise and activate a view: move it to the head of the stack, flip the
    /// activated flags, and record keyboard focus. Minimized or animating
    /// views cannot take focus.
    pub fn focus_view(&mut self, id: ViewId) {
        let Some(view) = self.views.get(&id) else {
            return;
        };
        if !view.mapped || view.minimized || view.transition.is_active() {
            return;
        }

        for (other_id, other) in self.views.iter_mut() {
            other.visual.activated = *other_id == id;
        }
        self.stack.retain(|other| *other != id);
        self.stack.insert(0, id);
        self.focused = Some(id);
    }

    // ---- hit-testing over the stack ----

    /// Topmost interactable view under the point, with surface-local
    /// coordinates when the point is over client content.
    ///
    /// Views that are unmapped, minimized, or mid-animation are not
    /// click/focus targets. For a client-decorated view a frame point
    /// outside the surface belongs to nobody; the search does not continue
    /// to windows beneath it.
    pub fn view_at(&self, lx: f64, ly: f64) -> Option<(ViewId, Option<(f64, f64)>)> {
        for id in &self.stack {
            let Some(view) = self.views.get(id) else {
                continue;
            };
            if !view.mapped || view.minimized || view.transition.is_active() {
                continue;
            }
            if !view.frame_rect().contains(lx, ly) {
                continue;
            }
            if let Some((sx, sy)) = view.surface_at(lx, ly) {
                return Some((*id, Some((sx, sy))));
            }
            if view.decoration == DecorationMode::ClientSide {
                return None;
            }
            return Some((*id, None));
        }
        None
    }

    /// Topmost view whose outer grab extent (frame plus pad) covers the
    /// point; used so borderless windows stay grabbable at their edges.
    pub fn frame_view_at(&self, lx: f64, ly: f64) -> Option<ViewId> {
        self.stack
            .iter()
            .filter_map(|id| self.views.get(id))
            .find(|view| {
                view.mapped
                    && !view.minimized
                    && !view.transition.is_active()
                    && hit::point_in_grab_extent(view, lx, ly)
            })
            .map(|view| view.id())
    }

    /// Taskbar button under the point, if any.
    pub fn taskbar_view_at(&self, lx: f64, ly: f64) -> Option<ViewId> {
        self.taskbar.view_at(&self.stack, &self.views, lx, ly)
    }

    /// Box the taskbar would assign `id`, optionally packing it as if it were
    /// already minimized. Does not disturb the real layout.
    pub fn predict_taskbar_slot(
        &self,
        id: ViewId,
        include_target_if_not_minimized: bool,
    ) -> Option<Rect> {
        self.taskbar.predict_slot(
            self.layout_bounds,
            &self.stack,
            &self.views,
            id,
            include_target_if_not_minimized,
        )
    }

    // ---- grabs ----

    fn begin_move(&mut self, id: ViewId, from_client: bool) {
        let Some(view) = self.views.get(&id) else {
            return;
        };
        let (vx, vy) = (view.x as f64, view.y as f64);
        self.focus_view(id);
        self.mode = CursorMode::Move;
        self.grabbed = Some(id);
        self.grab_from_client = from_client;
        self.grab_x = self.cursor_x - vx;
        self.grab_y = self.cursor_y - vy;
        self.suppress_until_release = true;
    }

    fn begin_resize(&mut self, id: ViewId, edges: ResizeEdges, from_client: bool) {
        if edges.is_empty() {
            return;
        }
        let Some(view) = self.views.get(&id) else {
            return;
        };
        let init = view.frame_rect();
        self.focus_view(id);
        self.mode = CursorMode::Resize;
        self.grabbed = Some(id);
        self.grab_from_client = from_client;
        self.resize_edges = edges;
        self.resize_init = init;
        self.resize_cursor_start = (self.cursor_x, self.cursor_y);
        self.suppress_until_release = true;
    }

    fn cancel_grab(&mut self) {
        self.mode = CursorMode::Passthrough;
        self.grabbed = None;
        self.resize_edges = ResizeEdges::empty();
        self.suppress_until_release = false;
        self.grab_from_client = false;
    }

    fn validate_interactive_request(
        &self,
        id: ViewId,
        serial: u32,
    ) -> Result<(), GrabRejected> {
        let view = self.views.get(&id).ok_or(GrabRejected::UnknownView)?;
        if !view.mapped {
            return Err(GrabRejected::NotMapped);
        }
        if view.minimized {
            return Err(GrabRejected::Minimized);
        }
        if view.transition.is_active() {
            return Err(GrabRejected::Animating);
        }
        if self.pressed_serial != Some(serial) {
            return Err(GrabRejected::StaleSerial);
        }
        Ok(())
    }

    /// Client-requested interactive move. Accepted only against the serial of
    /// the currently held pointer press; the grab is flagged client-initiated
    /// so the eventual release is still forwarded to the client.
    pub fn request_move(&mut self, id: ViewId, serial: u32) -> Result<(), GrabRejected> {
        match self.validate_interactive_request(id, serial) {
            Ok(()) => {
                tracing::info!(view = id.0, "client move request accepted");
                self.begin_move(id, true);
                Ok(())
            }
            Err(reason) => {
                tracing::info!(view = id.0, %reason, "client move request rejected");
                Err(reason)
            }
        }
    }

    /// Client-requested interactive resize. An empty edge mask is a no-op.
    pub fn request_resize(
        &mut self,
        id: ViewId,
        serial: u32,
        edges: ResizeEdges,
    ) -> Result<(), GrabRejected> {
        match self.validate_interactive_request(id, serial) {
            Ok(()) => {
                if edges.is_empty() {
                    return Ok(());
                }
                tracing::info!(view = id.0, ?edges, "client resize request accepted");
                self.begin_resize(id, edges, true);
                Ok(())
            }
            Err(reason) => {
                tracing::info!(view = id.0, %reason, "client resize request rejected");
                Err(reason)
            }
        }
    }

    // ---- pointer input ----

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    fn move_mod_down(&self) -> bool {
        self.modifiers.intersects(self.config.move_mod_mask)
    }

    /// Absolute pointer motion. The cursor is clamped into the layout bounds
    /// first, then either drives the active grab or re-derives pointer focus.
    pub fn pointer_motion(&mut self, x: f64, y: f64, _time_msec: u32) -> MotionOutcome {
        self.cursor_x = x;
        self.cursor_y = y;
        self.clamp_cursor_to_layout();
        self.process_motion()
    }

    fn clamp_cursor_to_layout(&mut self) {
        let bounds = self.layout_bounds;
        if bounds.is_empty() {
            return;
        }
        let max_x = bounds.x as f64 + bounds.width as f64 - 1.0;
        let max_y = bounds.y as f64 + bounds.height as f64 - 1.0;
        self.cursor_x = self.cursor_x.clamp(bounds.x as f64, max_x);
        self.cursor_y = self.cursor_y.clamp(bounds.y as f64, max_y);
    }

    fn process_motion(&mut self) -> MotionOutcome {
        if self.mode == CursorMode::Move
            && let Some(id) = self.grabbed
            && let Some(view) = self.views.get_mut(&id)
        {
            let nx = (self.cursor_x - self.grab_x) as i32;
            let ny = (self.cursor_y - self.grab_y) as i32;
            view.set_position(nx, ny);
            return MotionOutcome::Grab;
        }

        if self.mode == CursorMode::Resize
            && let Some(id) = self.grabbed
            && self.views.contains_key(&id)
        {
            self.apply_resize_motion(id);
            return MotionOutcome::Grab;
        }

        match self.view_at(self.cursor_x, self.cursor_y) {
            Some((id, Some((sx, sy)))) => {
                // Focus follows the pointer onto client content.
                self.focus_view(id);
                MotionOutcome::Focus { view: id, sx, sy }
            }
            _ => MotionOutcome::Clear,
        }
    }

    /// Grow a frame box from the grab snapshot, one edge bit at a time, then
    /// clamp to the minimum frame size anchoring whichever edge is being
    /// dragged.
    fn apply_resize_motion(&mut self, id: ViewId) {
        let dx = (self.cursor_x - self.resize_cursor_start.0).round() as i32;
        let dy = (self.cursor_y - self.resize_cursor_start.1).round() as i32;
        let edges = self.resize_edges;
        let init = self.resize_init;

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        let border = view.border_px();
        let title_h = view.titlebar_px();

        let mut nx = init.x;
        let mut ny = init.y;
        let mut nw = init.width;
        let mut nh = init.height;

        if edges.contains(ResizeEdges::LEFT) {
            nx = init.x + dx;
            nw = init.width - dx;
        }
        if edges.contains(ResizeEdges::RIGHT) {
            nw = init.width + dx;
        }
        if edges.contains(ResizeEdges::TOP) {
            ny = init.y + dy;
            nh = init.height - dy;
        }
        if edges.contains(ResizeEdges::BOTTOM) {
            nh = init.height + dy;
        }

        let min_w = border * 2 + MIN_CLIENT_WIDTH;
        let min_h = title_h + border + MIN_CLIENT_HEIGHT;
        if nw < min_w {
            if edges.contains(ResizeEdges::LEFT) {
                nx += nw - min_w;
            }
            nw = min_w;
        }
        if nh < min_h {
            if edges.contains(ResizeEdges::TOP) {
                ny += nh - min_h;
            }
            nh = min_h;
        }

        view.set_position(nx, ny);
        view.set_frame_size(nw, nh);
        let (content_w, content_h) = view.content_size_for_frame(nw, nh);
        self.configures.push(ConfigureRequest {
            view: id,
            width: content_w,
            height: content_h,
        });
    }

    /// Route a pointer button event. The returned disposition tells the seat
    /// collaborator whether the event still belongs to the client.
    pub fn pointer_button(&mut self, event: ButtonEvent) -> ButtonDisposition {
        // Keep pointer focus current even when the user clicks without
        // moving.
        let _ = self.process_motion();

        match event.state {
            ButtonState::Pressed => self.pressed_serial = Some(event.serial),
            ButtonState::Released => self.pressed_serial = None,
        }

        if event.state == ButtonState::Pressed
            && let Some(taskbar_view) = self.taskbar_view_at(self.cursor_x, self.cursor_y)
        {
            self.pressed_taskbar_view = Some(taskbar_view);
            self.suppress_until_release = true;
            self.taskbar.mark_dirty();
            return ButtonDisposition::Consumed;
        }

        let content_hit = self.view_at(self.cursor_x, self.cursor_y);
        let view_id = content_hit.map(|(id, _)| id);
        let over_surface = matches!(content_hit, Some((_, Some(_))));
        let frame_view = view_id.or_else(|| self.frame_view_at(self.cursor_x, self.cursor_y));

        if event.state == ButtonState::Pressed
            && event.button == BTN_LEFT
            && let Some(frame_id) = frame_view
        {
            let edges = {
                let view = &self.views[&frame_id];
                hit::resize_edges_at(view, self.cursor_x, self.cursor_y)
            };
            if !edges.is_empty() {
                self.begin_resize(frame_id, edges, false);
                return ButtonDisposition::Consumed;
            }

            // Move only from the explicit outer border ring, not from
            // interior holes in the client surface.
            if !over_surface {
                let in_border = {
                    let view = &self.views[&frame_id];
                    hit::point_in_frame_border(view, self.cursor_x, self.cursor_y)
                };
                if in_border {
                    self.begin_move(frame_id, false);
                    return ButtonDisposition::Consumed;
                }
            }
        }

        if view_id.is_none() && !self.suppress_until_release {
            return ButtonDisposition::Forward;
        }

        if event.state == ButtonState::Released {
            if let Some(pressed) = self.pressed_taskbar_view.take() {
                let released_over = self.taskbar_view_at(self.cursor_x, self.cursor_y);
                if released_over == Some(pressed)
                    && let Some(view) = self.views.get(&pressed)
                    && view.mapped
                    && view.minimized
                {
                    self.begin_restore_animation(pressed, event.time_msec);
                }
                self.taskbar.mark_dirty();
                self.suppress_until_release = false;
                return ButtonDisposition::Consumed;
            }

            if self.mode != CursorMode::Passthrough || self.suppress_until_release {
                let disposition = if self.grab_from_client && self.grabbed.is_some() {
                    // The client owns the semantics of a grab it started.
                    ButtonDisposition::Forward
                } else {
                    ButtonDisposition::Consumed
                };
                self.cancel_grab();
                return disposition;
            }

            return ButtonDisposition::Forward;
        }

        let Some(id) = view_id else {
            return ButtonDisposition::Consumed;
        };

        if event.button == BTN_LEFT && self.move_mod_down() {
            self.begin_move(id, false);
            return ButtonDisposition::Consumed;
        }

        let view = &self.views[&id];
        if event.button == BTN_LEFT
            && hit::point_in_foot_drag_region(view, self.cursor_x, self.cursor_y)
        {
            self.begin_move(id, false);
            return ButtonDisposition::Consumed;
        }

        if hit::point_in_minimize_button(view, self.cursor_x, self.cursor_y) {
            self.suppress_until_release = true;
            self.begin_minimize_animation(id, event.time_msec);
            return ButtonDisposition::Consumed;
        }

        let edges = hit::resize_edges_at(view, self.cursor_x, self.cursor_y);
        if !edges.is_empty() {
            self.begin_resize(id, edges, false);
            return ButtonDisposition::Consumed;
        }

        if hit::point_in_titlebar_drag_region(view, self.cursor_x, self.cursor_y) {
            self.begin_move(id, false);
            return ButtonDisposition::Consumed;
        }

        self.focus_view(id);
        ButtonDisposition::Forward
    }

    // ---- minimize/restore animations ----

    /// Tween endpoint for a view headed to (or coming from) the taskbar.
    fn taskbar_tween_target(
        &self,
        view: &View,
        include_target_if_not_minimized: bool,
    ) -> TweenPoint {
        if let Some(slot) = self.taskbar.predict_slot(
            self.layout_bounds,
            &self.stack,
            &self.views,
            view.id(),
            include_target_if_not_minimized,
        ) {
            return animate::slot_tween_point(slot, view.width, view.height, MINIMIZED_ALPHA);
        }
        animate::fallback_tween_point(self.layout_box_or_default(), MINIMIZED_ALPHA)
    }

    /// Start the minimize tween. A no-op unless the view is mapped, not
    /// minimized, and has no transition already running.
    pub fn begin_minimize_animation(&mut self, id: ViewId, time_msec: u32) {
        let target = {
            let Some(view) = self.views.get(&id) else {
                return;
            };
            if !view.mapped || view.minimized || view.transition.is_active() {
                return;
            }
            self.taskbar_tween_target(view, true)
        };

        if self.focused == Some(id) {
            self.focused = None;
        }

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.visual.activated = false;
        view.transition = Transition::Minimizing {
            start_msec: time_msec,
        };
        let (cx, cy) = view.frame_rect().center();
        view.tween_from = TweenPoint::resting(cx, cy);
        view.tween_to = target;
        animate::apply_progress(view, 0.0);
        tracing::debug!(view = id.0, "minimize animation started");
    }

    /// Start the restore tween. The view leaves the minimized set
    /// immediately, but its running transition keeps it out of hit-testing
    /// until the animation lands.
    pub fn begin_restore_animation(&mut self, id: ViewId, time_msec: u32) {
        // Prefer the slot the button actually occupies; a stale cache falls
        // back to a fresh prediction over the current minimized set.
        let from = {
            let Some(view) = self.views.get(&id) else {
                return;
            };
            if !view.mapped || !view.minimized || view.transition.is_active() {
                return;
            }
            match view.taskbar_slot {
                Some(slot) => {
                    animate::slot_tween_point(slot, view.width, view.height, MINIMIZED_ALPHA)
                }
                None => self.taskbar_tween_target(view, false),
            }
        };

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.minimized = false;
        view.transition = Transition::Restoring {
            start_msec: time_msec,
        };
        view.tween_from = from;
        let (cx, cy) = view.frame_rect().center();
        view.tween_to = TweenPoint::resting(cx, cy);
        view.set_visible(true);
        animate::apply_progress(view, 0.0);
        self.taskbar.mark_dirty();
        tracing::debug!(view = id.0, "restore animation started");
    }

    /// Restore the most recently stacked minimized view, if any.
    pub fn restore_last_minimized(&mut self, time_msec: u32) {
        let target = self
            .stack
            .iter()
            .copied()
            .find(|id| {
                self.views
                    .get(id)
                    .is_some_and(|view| view.mapped && view.minimized)
            });
        if let Some(id) = target {
            self.begin_restore_animation(id, time_msec);
        }
    }

    /// Advance every active tween. Returns true while any is still running.
    fn tick_animations(&mut self, now_msec: u32) -> bool {
        let mut any_running = false;
        let mut finished_restores: Vec<ViewId> = Vec::new();

        let ids: Vec<ViewId> = self.stack.clone();
        for id in ids {
            let Some(view) = self.views.get_mut(&id) else {
                continue;
            };
            if !view.mapped {
                continue;
            }

            match view.transition {
                Transition::Minimizing { start_msec } => {
                    let progress =
                        animate::progress(now_msec, start_msec, self.config.minimize_duration_ms);
                    if progress >= 1.0 {
                        view.transition = Transition::None;
                        view.reset_transform();
                        view.minimized = true;
                        view.set_visible(false);
                        self.taskbar.mark_dirty();
                    } else {
                        any_running = true;
                        animate::apply_progress(view, progress);
                    }
                }
                Transition::Restoring { start_msec } => {
                    let progress =
                        animate::progress(now_msec, start_msec, self.config.restore_duration_ms);
                    if progress >= 1.0 {
                        view.transition = Transition::None;
                        view.reset_transform();
                        finished_restores.push(id);
                    } else {
                        any_running = true;
                        animate::apply_progress(view, progress);
                    }
                }
                Transition::None => {}
            }
        }

        for id in finished_restores {
            self.focus_view(id);
        }
        any_running
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
