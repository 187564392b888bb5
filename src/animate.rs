//! Minimize/restore tween math and per-view transform application.
//!
//! The window manager decides when a transition starts and ends; this module
//! owns the interpolation itself: easing, endpoint construction, and pushing
//! an interpolated state onto a view's rendered geometry.

use crate::config::{BORDER_PX, BTN_H, BTN_PAD, BTN_W, TITLEBAR_PX};
use crate::geometry::Rect;
use crate::view::{TweenPoint, View};

/// Smallest scale a minimize tween may reach.
pub const MIN_SCALE: f32 = 0.12;
/// Largest scale a taskbar slot endpoint may request.
pub const MAX_SLOT_SCALE: f32 = 0.35;
/// Opacity of a fully minimized window (the tween's far endpoint).
pub const MINIMIZED_ALPHA: f32 = 0.35;
/// Opacity floor applied while any transform is active.
pub const MIN_ALPHA: f32 = 0.15;

/// Tween progress for a frame timestamp, clamped to `[0, 1]`. Timestamps
/// that repeat or regress saturate to zero elapsed time instead of wrapping.
pub fn progress(now_msec: u32, start_msec: u32, duration_ms: u32) -> f32 {
    let elapsed = now_msec.saturating_sub(start_msec);
    (elapsed as f32 / duration_ms.max(1) as f32).clamp(0.0, 1.0)
}

/// Smoothstep easing: `p²(3 − 2p)`.
pub fn smoothstep(p: f32) -> f32 {
    p * p * (3.0 - 2.0 * p)
}

/// Linear interpolation between tween endpoints in eased-progress space.
pub fn interpolate(from: TweenPoint, to: TweenPoint, eased: f32) -> TweenPoint {
    let t = eased as f64;
    TweenPoint {
        cx: from.cx + (to.cx - from.cx) * t,
        cy: from.cy + (to.cy - from.cy) * t,
        scale: from.scale + (to.scale - from.scale) * eased,
        alpha: from.alpha + (to.alpha - from.alpha) * eased,
    }
}

/// Tween endpoint centered on a taskbar slot, scaled so the window fits the
/// button without dropping below the minimum animation scale.
pub fn slot_tween_point(slot: Rect, view_width: i32, view_height: i32, alpha: f32) -> TweenPoint {
    let (cx, cy) = slot.center();
    let sx = slot.width as f32 / view_width.max(1) as f32;
    let sy = slot.height as f32 / view_height.max(1) as f32;
    TweenPoint {
        cx,
        cy,
        scale: sx.min(sy).clamp(MIN_SCALE, MAX_SLOT_SCALE),
        alpha,
    }
}

/// Endpoint used when no taskbar slot is available: just above the bottom
/// center of the layout.
pub fn fallback_tween_point(layout: Rect, alpha: f32) -> TweenPoint {
    TweenPoint {
        cx: layout.x as f64 + layout.width as f64 / 2.0,
        cy: layout.y as f64 + layout.height as f64 - 12.0,
        scale: MIN_SCALE,
        alpha,
    }
}

fn scaled(value: i32, scale: f32) -> i32 {
    (value as f32 * scale).round() as i32
}

/// Push an interpolated transform onto the view's rendered state: frame
/// position from the tween center, decoration chrome scaled proportionally
/// with a one-pixel floor, and content scale/opacity for the buffer nodes.
///
/// The view's logical geometry is untouched; `View::reset_transform` restores
/// it when the transition ends.
pub fn apply_window_transform(view: &mut View, point: TweenPoint) {
    let scale = point.scale.clamp(MIN_SCALE, 1.0);
    let alpha = point.alpha.clamp(MIN_ALPHA, 1.0);

    let scaled_w = scaled(view.width, scale).max(1);
    let scaled_h = scaled(view.height, scale).max(1);

    view.visual.frame_x = (point.cx - scaled_w as f64 / 2.0).round() as i32;
    view.visual.frame_y = (point.cy - scaled_h as f64 / 2.0).round() as i32;

    let border = scaled(BORDER_PX, scale).max(1);
    let title_h = scaled(TITLEBAR_PX, scale).max(1);
    let body_h = (scaled_h - title_h).max(1);

    view.chrome.title = Rect::new(0, 0, scaled_w, title_h);
    view.chrome.left = Rect::new(0, title_h, border, body_h);
    view.chrome.right = Rect::new((scaled_w - border).max(0), title_h, border, body_h);
    view.chrome.bottom = Rect::new(0, (scaled_h - border).max(0), scaled_w, border);

    view.visual.content_x = scaled(view.content_x, scale);
    view.visual.content_y = scaled(view.content_y, scale);

    let btn_w = scaled(BTN_W, scale).max(1);
    let btn_h = scaled(BTN_H, scale).max(1);
    let btn_pad = scaled(BTN_PAD, scale).max(1);
    let btn_x = (scaled_w - border - btn_w - btn_pad).max(border);
    let btn_y = ((title_h - btn_h) / 2).max(0);
    view.chrome.minimize = Rect::new(btn_x, btn_y, btn_w, btn_h);

    view.visual.content_scale = scale;
    view.visual.alpha = alpha;
}

/// Apply the view's own tween at the given raw progress.
pub fn apply_progress(view: &mut View, raw_progress: f32) {
    let eased = smoothstep(raw_progress.clamp(0.0, 1.0));
    let point = interpolate(view.tween_from, view.tween_to, eased);
    apply_window_transform(view, point);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{DecorationMode, ViewId};

    fn animating_view() -> View {
        let mut view = View::new(ViewId(1));
        view.decoration = DecorationMode::ServerSide;
        view.surface_width = 640;
        view.surface_height = 480;
        view.update_geometry();
        view.set_position(100, 80);
        view.tween_from = TweenPoint::resting(
            view.x as f64 + view.width as f64 / 2.0,
            view.y as f64 + view.height as f64 / 2.0,
        );
        view.tween_to = TweenPoint {
            cx: 60.0,
            cy: 700.0,
            scale: 0.2,
            alpha: MINIMIZED_ALPHA,
        };
        view
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn progress_saturates_on_non_monotonic_timestamps() {
        assert_eq!(progress(100, 200, 180), 0.0);
        assert_eq!(progress(200, 200, 180), 0.0);
        assert!(progress(290, 200, 180) < 1.0);
        assert_eq!(progress(380, 200, 180), 1.0);
        assert_eq!(progress(5000, 200, 180), 1.0);
    }

    fn close(a: TweenPoint, b: TweenPoint) -> bool {
        (a.cx - b.cx).abs() < 1e-6
            && (a.cy - b.cy).abs() < 1e-6
            && (a.scale - b.scale).abs() < 1e-6
            && (a.alpha - b.alpha).abs() < 1e-6
    }

    #[test]
    fn interpolate_hits_exact_endpoints() {
        let view = animating_view();
        assert!(close(
            interpolate(view.tween_from, view.tween_to, 0.0),
            view.tween_from
        ));
        assert!(close(
            interpolate(view.tween_from, view.tween_to, 1.0),
            view.tween_to
        ));
    }

    #[test]
    fn interpolated_scale_and_alpha_stay_in_range() {
        let view = animating_view();
        let mut p = 0.0f32;
        while p <= 1.0 {
            let point = interpolate(view.tween_from, view.tween_to, smoothstep(p));
            assert!(point.scale >= view.tween_to.scale - 1e-6 && point.scale <= 1.0 + 1e-6);
            assert!(point.alpha >= MINIMIZED_ALPHA - 1e-6 && point.alpha <= 1.0 + 1e-6);
            p += 0.05;
        }
    }

    #[test]
    fn slot_endpoint_clamps_scale() {
        let slot = Rect::new(6, 770, 110, 22);
        let tiny = slot_tween_point(slot, 4000, 4000, MINIMIZED_ALPHA);
        assert_eq!(tiny.scale, MIN_SCALE);
        let large = slot_tween_point(slot, 120, 24, MINIMIZED_ALPHA);
        assert_eq!(large.scale, MAX_SLOT_SCALE);
        assert_eq!(tiny.cx, 61.0);
        assert_eq!(tiny.cy, 781.0);
    }

    #[test]
    fn fallback_endpoint_sits_above_bottom_center() {
        let point = fallback_tween_point(Rect::new(0, 0, 1280, 720), MINIMIZED_ALPHA);
        assert_eq!(point.cx, 640.0);
        assert_eq!(point.cy, 708.0);
        assert_eq!(point.scale, MIN_SCALE);
    }

    #[test]
    fn transform_keeps_chrome_at_least_one_pixel() {
        let mut view = animating_view();
        apply_window_transform(
            &mut view,
            TweenPoint {
                cx: 10.0,
                cy: 10.0,
                scale: 0.0,
                alpha: 0.0,
            },
        );
        assert!(view.chrome.left.width >= 1);
        assert!(view.chrome.title.height >= 1);
        assert!(view.chrome.minimize.width >= 1);
        assert_eq!(view.visual.content_scale, MIN_SCALE);
        assert_eq!(view.visual.alpha, MIN_ALPHA);
    }

    #[test]
    fn zero_progress_matches_resting_geometry() {
        let mut view = animating_view();
        apply_progress(&mut view, 0.0);
        // Scale 1 keeps the frame centered where it already was.
        assert_eq!(view.visual.frame_x, view.x);
        assert_eq!(view.visual.frame_y, view.y);
        assert_eq!(view.visual.alpha, 1.0);
        assert_eq!(view.visual.content_scale, 1.0);
    }

    #[test]
    fn full_progress_matches_tween_target() {
        let mut view = animating_view();
        apply_progress(&mut view, 1.0);
        let scaled_w = (view.width as f32 * 0.2).round() as i32;
        assert_eq!(
            view.visual.frame_x,
            (60.0 - scaled_w as f64 / 2.0).round() as i32
        );
        assert!((view.visual.content_scale - 0.2).abs() < 1e-6);
        assert!((view.visual.alpha - MINIMIZED_ALPHA).abs() < 1e-6);
    }
}
