//! The view entity: one toplevel window and everything derived from it.
//!
//! A view's frame geometry (outer rectangle including decorations) is always
//! re-derived from the client's committed surface state plus the decoration
//! mode. The decoration chrome rectangles have no independent existence; they
//! are recomputed from the frame size every time it changes.

use crate::config::{
    BORDER_PX, BTN_H, BTN_PAD, BTN_W, FALLBACK_CONTENT_HEIGHT, FALLBACK_CONTENT_WIDTH, TITLEBAR_PX,
};
use crate::geometry::Rect;

/// Stable identity for a view. Back-references across the crate hold ids and
/// look the view up again rather than aliasing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationMode {
    /// The client draws its own decorations; the frame adds no border or
    /// titlebar space.
    ClientSide,
    /// The compositor draws border, titlebar, and minimize button.
    ServerSide,
}

/// Endpoint of a minimize/restore tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenPoint {
    pub cx: f64,
    pub cy: f64,
    pub scale: f32,
    pub alpha: f32,
}

impl TweenPoint {
    pub fn resting(cx: f64, cy: f64) -> Self {
        Self {
            cx,
            cy,
            scale: 1.0,
            alpha: 1.0,
        }
    }
}

/// Active transition state. A view is never minimizing and restoring at the
/// same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    None,
    Minimizing {
        start_msec: u32,
    },
    Restoring {
        start_msec: u32,
    },
}

impl Transition {
    pub fn is_active(&self) -> bool {
        !matches!(self, Transition::None)
    }
}

/// Decoration rectangles in frame-local coordinates, recomputed from the
/// frame size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chrome {
    pub title: Rect,
    pub left: Rect,
    pub right: Rect,
    pub bottom: Rect,
    pub minimize: Rect,
}

/// Renderer-facing state: where the frame currently draws and how its content
/// is transformed. During an animation this diverges from the view's logical
/// geometry; `reset_transform` snaps it back.
#[derive(Debug, Clone, Copy)]
pub struct Visual {
    pub frame_x: i32,
    pub frame_y: i32,
    pub content_x: i32,
    pub content_y: i32,
    pub content_scale: f32,
    pub alpha: f32,
    pub visible: bool,
    pub activated: bool,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            frame_x: 0,
            frame_y: 0,
            content_x: 0,
            content_y: 0,
            content_scale: 1.0,
            alpha: 1.0,
            visible: false,
            activated: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct View {
    id: ViewId,
    pub app_id: Option<String>,
    pub title: Option<String>,

    pub mapped: bool,
    pub minimized: bool,
    pub transition: Transition,
    pub tween_from: TweenPoint,
    pub tween_to: TweenPoint,

    /// Logical frame origin in layout coordinates.
    pub x: i32,
    pub y: i32,
    /// Frame size including decorations.
    pub width: i32,
    pub height: i32,

    /// Effective client geometry (offset within the surface plus size),
    /// derived on every commit.
    pub geo: Rect,
    /// Client-reported geometry hint, trusted only when plausible.
    pub reported_geo: Option<Rect>,
    /// Committed surface size.
    pub surface_width: i32,
    pub surface_height: i32,
    /// Content offset from the frame origin to the surface origin.
    pub content_x: i32,
    pub content_y: i32,

    pub decoration: DecorationMode,
    /// Box occupied by this view's taskbar button, valid until the next
    /// taskbar recompute discards it.
    pub taskbar_slot: Option<Rect>,
    pub chrome: Chrome,
    pub visual: Visual,
}

impl View {
    pub fn new(id: ViewId) -> Self {
        let resting = TweenPoint::resting(0.0, 0.0);
        Self {
            id,
            app_id: None,
            title: None,
            mapped: false,
            minimized: false,
            transition: Transition::None,
            tween_from: resting,
            tween_to: resting,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            geo: Rect::default(),
            reported_geo: None,
            surface_width: 0,
            surface_height: 0,
            content_x: 0,
            content_y: 0,
            decoration: DecorationMode::ClientSide,
            taskbar_slot: None,
            chrome: Chrome::default(),
            visual: Visual::default(),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn border_px(&self) -> i32 {
        match self.decoration {
            DecorationMode::ServerSide => BORDER_PX,
            DecorationMode::ClientSide => 0,
        }
    }

    pub fn titlebar_px(&self) -> i32 {
        match self.decoration {
            DecorationMode::ServerSide => TITLEBAR_PX,
            DecorationMode::ClientSide => 0,
        }
    }

    pub fn app_id_contains(&self, needle: &str) -> bool {
        self.app_id
            .as_deref()
            .is_some_and(|app_id| app_id.contains(needle))
    }

    /// Label shown on the view's taskbar button.
    pub fn display_title(&self) -> &str {
        if let Some(title) = self.title.as_deref()
            && !title.is_empty()
        {
            return title;
        }
        if let Some(app_id) = self.app_id.as_deref()
            && !app_id.is_empty()
        {
            return app_id;
        }
        "APP"
    }

    pub fn frame_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move the logical frame origin and keep the rendered position in sync.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.visual.frame_x = x;
        self.visual.frame_y = y;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visual.visible = visible;
    }

    /// Effective client geometry for the current committed state.
    ///
    /// Sizes of one pixel or less mean the client has not produced anything
    /// usable yet; fall back to a fixed default so hit-testing and frame
    /// sizing stay well defined.
    fn geometry_box(&self) -> Rect {
        let mut surface_w = self.surface_width;
        let mut surface_h = self.surface_height;
        if surface_w <= 1 {
            surface_w = FALLBACK_CONTENT_WIDTH;
        }
        if surface_h <= 1 {
            surface_h = FALLBACK_CONTENT_HEIGHT;
        }

        if self.decoration == DecorationMode::ClientSide {
            // Keep client-decorated windows in root-surface space so pointer
            // hit-testing aligns exactly with rendered pixels.
            return Rect::new(0, 0, surface_w, surface_h);
        }

        if let Some(reported) = self.reported_geo
            && reported.width > 1
            && reported.height > 1
            && reported.x >= 0
            && reported.y >= 0
        {
            // Trust explicit non-negative geometry when available; it keeps
            // the frame aligned to the visible window rather than to
            // oversized shadow bounds.
            return reported;
        }

        Rect::new(0, 0, surface_w, surface_h)
    }

    /// Re-derive frame size, content offset, and decoration chrome from the
    /// committed client state.
    pub fn update_geometry(&mut self) {
        self.geo = self.geometry_box();
        let border = self.border_px();
        let title_h = self.titlebar_px();
        self.set_frame_size(
            self.geo.width + border * 2,
            self.geo.height + title_h + border,
        );
    }

    /// Apply a frame size, clamping to the smallest frame the decorations
    /// permit, and reposition every decoration rectangle from it.
    pub fn set_frame_size(&mut self, frame_width: i32, frame_height: i32) {
        let border = self.border_px();
        let title_h = self.titlebar_px();

        self.width = frame_width.max(border * 2 + 1);
        self.height = frame_height.max(title_h + border + 1);

        let body_h = (self.height - title_h).max(1);
        let border_w = border.max(1);
        self.chrome.title = Rect::new(0, 0, self.width, title_h.max(1));
        self.chrome.left = Rect::new(0, title_h, border_w, body_h);
        self.chrome.right = Rect::new(self.width - border_w, title_h, border_w, body_h);
        self.chrome.bottom = Rect::new(0, self.height - border_w, self.width, border_w);

        self.content_x = border - self.geo.x;
        self.content_y = title_h - self.geo.y;
        self.visual.content_x = self.content_x;
        self.visual.content_y = self.content_y;

        let btn_x = (self.width - border - BTN_W - BTN_PAD).max(0);
        let btn_y = ((title_h - BTN_H) / 2).max(0);
        let (btn_w, btn_h) = match self.decoration {
            DecorationMode::ServerSide => (BTN_W, BTN_H),
            DecorationMode::ClientSide => (1, 1),
        };
        self.chrome.minimize = Rect::new(btn_x, btn_y, btn_w, btn_h);
    }

    /// Switch decoration modes and re-derive everything that depends on them.
    pub fn set_decoration_mode(&mut self, mode: DecorationMode) {
        self.decoration = mode;
        self.update_geometry();
    }

    /// Content size a given frame size leaves for the client.
    pub fn content_size_for_frame(&self, frame_width: i32, frame_height: i32) -> (i32, i32) {
        let border = self.border_px();
        let title_h = self.titlebar_px();
        (
            (frame_width - border * 2).max(1),
            (frame_height - title_h - border).max(1),
        )
    }

    /// Surface-local coordinates for a layout-space point, if the point lands
    /// on the client's visible geometry.
    pub fn surface_at(&self, lx: f64, ly: f64) -> Option<(f64, f64)> {
        let surface_x = (self.x + self.content_x) as f64;
        let surface_y = (self.y + self.content_y) as f64;
        let content = Rect::new(
            self.x + self.content_x + self.geo.x,
            self.y + self.content_y + self.geo.y,
            self.geo.width,
            self.geo.height,
        );
        if content.contains(lx, ly) {
            Some((lx - surface_x, ly - surface_y))
        } else {
            None
        }
    }

    /// Snap the rendered state back to the view's logical geometry after an
    /// animation finishes or is discarded.
    pub fn reset_transform(&mut self) {
        self.visual.frame_x = self.x;
        self.visual.frame_y = self.y;
        self.visual.content_scale = 1.0;
        self.visual.alpha = 1.0;
        self.update_geometry();
    }
}
