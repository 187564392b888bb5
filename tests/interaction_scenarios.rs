use scene_wm::input::BTN_LEFT;
use scene_wm::{
    ButtonDisposition, ButtonEvent, Config, CursorMode, DecorationMode, MotionOutcome, Rect,
    ResizeEdges, ViewId, WindowManager,
};

fn wm() -> WindowManager {
    let mut wm = WindowManager::new(Config::default());
    wm.set_layout_bounds(Rect::new(0, 0, 1280, 720));
    wm
}

fn mapped_view(wm: &mut WindowManager, title: &str) -> ViewId {
    let id = wm.create_view(None);
    wm.set_title(id, Some(title.to_string()));
    wm.commit_view(id, 640, 480, None);
    wm.set_decoration_mode(id, DecorationMode::ServerSide);
    wm.map_view(id);
    id
}

#[test]
fn corner_resize_drag_grows_the_frame_by_the_motion_delta() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    let (start_w, start_h) = {
        let view = wm.view(a).unwrap();
        (view.width, view.height)
    };
    assert_eq!((start_w, start_h), (644, 510));

    // Press inside the resize margin at the bottom-right corner.
    let view = wm.view(a).unwrap();
    let press = (
        (view.x + view.width) as f64 - 2.0,
        (view.y + view.height) as f64 - 2.0,
    );
    wm.pointer_motion(press.0, press.1, 1);
    assert_eq!(
        wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 2, 7)),
        ButtonDisposition::Consumed
    );
    assert_eq!(wm.cursor_mode(), CursorMode::Resize);
    assert_eq!(wm.grabbed_view(), Some(a));

    assert_eq!(
        wm.pointer_motion(press.0 + 50.0, press.1 + 30.0, 3),
        MotionOutcome::Grab
    );
    {
        let view = wm.view(a).unwrap();
        assert_eq!(view.width, start_w + 50);
        assert_eq!(view.height, start_h + 30);
        // The dragged edges moved; the opposite corner stayed put.
        assert_eq!((view.x, view.y), (48, 40));
    }

    // Release returns to idle and swallows the event.
    assert_eq!(
        wm.pointer_button(ButtonEvent::released(BTN_LEFT, 4, 8)),
        ButtonDisposition::Consumed
    );
    assert_eq!(wm.cursor_mode(), CursorMode::Passthrough);
    assert_eq!(wm.grabbed_view(), None);
}

#[test]
fn shrinking_past_the_minimum_anchors_the_far_edge() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    let view = wm.view(a).unwrap();
    // Grab the left edge and drag far to the right.
    let left = (view.x as f64 + 1.0, view.frame_rect().center().1);
    let right_edge = view.x + view.width;
    wm.pointer_motion(left.0, left.1, 1);
    wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 2, 7));
    assert_eq!(wm.cursor_mode(), CursorMode::Resize);

    wm.pointer_motion(left.0 + 2000.0, left.1, 3);
    let view = wm.view(a).unwrap();
    // Frame floor: two borders plus the minimum content width.
    assert_eq!(view.width, 2 * 2 + 120);
    // The right edge's absolute position did not move.
    assert_eq!(view.x + view.width, right_edge);
}

#[test]
fn taskbar_repacks_after_destroying_a_minimized_view() {
    let mut wm = wm();
    let b = mapped_view(&mut wm, "B");
    let c = mapped_view(&mut wm, "C");
    // Focus order [B, C], topmost first.
    wm.focus_view(b);
    assert_eq!(wm.stack(), &[b, c]);

    wm.begin_minimize_animation(b, 0);
    wm.begin_minimize_animation(c, 0);
    wm.frame(500);

    let slot_b = wm.view(b).unwrap().taskbar_slot.unwrap();
    let slot_c = wm.view(c).unwrap().taskbar_slot.unwrap();
    assert_eq!(slot_b.x, 6);
    assert_eq!(slot_c.x, 6 + slot_b.width + 6);

    wm.destroy_view(b);
    wm.frame(600);
    let slot_c = wm.view(c).unwrap().taskbar_slot.unwrap();
    assert_eq!(slot_c.x, 6);
}

#[test]
fn prediction_before_minimize_matches_the_real_slot_after() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "editor");
    let b = mapped_view(&mut wm, "terminal");
    wm.begin_minimize_animation(a, 0);
    wm.frame(500);

    // Predict b's slot while it is still mapped and visible.
    let predicted = wm.predict_taskbar_slot(b, true).unwrap();

    wm.begin_minimize_animation(b, 1000);
    wm.frame(1500);
    assert_eq!(wm.view(b).unwrap().taskbar_slot, Some(predicted));
}

#[test]
fn taskbar_click_restores_the_minimized_view() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    wm.begin_minimize_animation(a, 0);
    wm.frame(500);
    let slot = wm.view(a).unwrap().taskbar_slot.unwrap();
    let (cx, cy) = slot.center();

    wm.pointer_motion(cx, cy, 600);
    assert_eq!(
        wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 601, 9)),
        ButtonDisposition::Consumed
    );
    assert_eq!(wm.pressed_taskbar_view(), Some(a));

    assert_eq!(
        wm.pointer_button(ButtonEvent::released(BTN_LEFT, 650, 10)),
        ButtonDisposition::Consumed
    );
    let view = wm.view(a).unwrap();
    assert!(!view.minimized);
    assert!(view.transition.is_active());
    assert!(view.visual.visible);

    wm.frame(900);
    assert_eq!(wm.focused(), Some(a));
}

#[test]
fn releasing_off_the_pressed_button_cancels_the_restore() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    wm.begin_minimize_animation(a, 0);
    wm.frame(500);
    let slot = wm.view(a).unwrap().taskbar_slot.unwrap();
    let (cx, cy) = slot.center();

    wm.pointer_motion(cx, cy, 600);
    wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 601, 9));
    // Drag off the button before releasing.
    wm.pointer_motion(cx, cy - 200.0, 610);
    assert_eq!(
        wm.pointer_button(ButtonEvent::released(BTN_LEFT, 650, 10)),
        ButtonDisposition::Consumed
    );
    let view = wm.view(a).unwrap();
    assert!(view.minimized);
    assert!(!view.transition.is_active());
}

#[test]
fn restore_with_invalidated_slot_falls_back_to_prediction() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    wm.begin_minimize_animation(a, 0);
    wm.frame(500);
    let stale = wm.view(a).unwrap().taskbar_slot.unwrap();

    // Outputs go away: the recompute clears every cached slot.
    wm.set_layout_bounds(Rect::new(0, 0, 0, 0));
    wm.frame(600);
    assert_eq!(wm.view(a).unwrap().taskbar_slot, None);
    assert!(!wm.taskbar().enabled());

    wm.begin_restore_animation(a, 700);
    let view = wm.view(a).unwrap();
    assert!(view.transition.is_active());
    // The tween starts from the generic bottom-edge fallback, not from the
    // stale slot coordinates.
    let (stale_cx, stale_cy) = stale.center();
    assert_ne!((view.tween_from.cx, view.tween_from.cy), (stale_cx, stale_cy));
    assert_eq!(view.tween_from.cx, 640.0);
    assert_eq!(view.tween_from.cy, 708.0);
}

#[test]
fn minimize_button_press_starts_the_tween_and_swallows_the_click() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    let view = wm.view(a).unwrap();
    let btn = view.chrome.minimize;
    let press = (
        (view.x + btn.x) as f64 + btn.width as f64 / 2.0,
        (view.y + btn.y) as f64 + btn.height as f64 / 2.0,
    );

    wm.pointer_motion(press.0, press.1, 1);
    assert_eq!(
        wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 2, 7)),
        ButtonDisposition::Consumed
    );
    assert!(wm.view(a).unwrap().transition.is_active());
    // The release that follows is swallowed too, not forwarded as a click.
    assert_eq!(
        wm.pointer_button(ButtonEvent::released(BTN_LEFT, 3, 8)),
        ButtonDisposition::Consumed
    );
}

#[test]
fn client_resize_request_with_live_serial_starts_a_grab() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    wm.pointer_motion(300.0, 300.0, 1);
    assert_eq!(
        wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 2, 21)),
        ButtonDisposition::Forward
    );
    wm.request_resize(a, 21, ResizeEdges::RIGHT | ResizeEdges::BOTTOM)
        .unwrap();
    assert_eq!(wm.cursor_mode(), CursorMode::Resize);
    // Client-initiated: the release is forwarded so the client can finish
    // its own grab bookkeeping.
    assert_eq!(
        wm.pointer_button(ButtonEvent::released(BTN_LEFT, 3, 22)),
        ButtonDisposition::Forward
    );
}

#[test]
fn client_requests_are_rejected_mid_animation() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    wm.pointer_motion(300.0, 300.0, 1);
    wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 2, 21));
    wm.begin_minimize_animation(a, 2);
    assert!(wm.request_move(a, 21).is_err());
    assert_eq!(wm.cursor_mode(), CursorMode::Passthrough);
}

#[test]
fn csd_frame_points_outside_the_surface_hit_nothing() {
    let mut wm = wm();
    let a = wm.create_view(Some("footclient".to_string()));
    wm.commit_view(a, 400, 300, None);
    wm.map_view(a);
    // Client-decorated: the whole frame is surface space.
    let view = wm.view(a).unwrap();
    assert_eq!(view.width, 400);
    let (vx, vy) = (view.x, view.y);
    let inside = (vx as f64 + 10.0, vy as f64 + 10.0);
    assert!(matches!(
        wm.pointer_motion(inside.0, inside.1, 1),
        MotionOutcome::Focus { .. }
    ));
    // Just outside the frame but inside the outer grab pad: no focus target,
    // yet a left press there still grabs a resize edge.
    let fringe = (vx as f64 - 4.0, vy as f64 + 50.0);
    assert_eq!(wm.pointer_motion(fringe.0, fringe.1, 2), MotionOutcome::Clear);
    assert_eq!(
        wm.pointer_button(ButtonEvent::pressed(BTN_LEFT, 3, 31)),
        ButtonDisposition::Consumed
    );
    assert_eq!(wm.cursor_mode(), CursorMode::Resize);
}

#[test]
fn frame_keeps_animating_until_every_tween_lands() {
    let mut wm = wm();
    let a = mapped_view(&mut wm, "A");
    let b = mapped_view(&mut wm, "B");
    wm.begin_minimize_animation(a, 0);
    wm.begin_minimize_animation(b, 100);
    assert!(wm.frame(150));
    assert!(wm.frame(250));
    assert!(!wm.frame(400));
    assert!(wm.view(a).unwrap().minimized);
    assert!(wm.view(b).unwrap().minimized);
}
