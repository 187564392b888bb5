//! Crate-wide tunables and their environment overrides.
//!
//! Decoration and sizing values are fixed constants; the handful of knobs a
//! user may reasonably want to adjust (move-modifier mask, animation timing)
//! live on [`Config`] and can be overridden through `SCENE_WM_*` environment
//! variables. Malformed values fall back silently to the defaults.

use crate::input::Modifiers;

/// Border thickness drawn around server-decorated frames, in pixels.
pub const BORDER_PX: i32 = 2;
/// Titlebar height for server-decorated frames, in pixels.
pub const TITLEBAR_PX: i32 = 28;
/// Minimize button width inside the titlebar.
pub const BTN_W: i32 = 18;
/// Minimize button height inside the titlebar.
pub const BTN_H: i32 = 14;
/// Gap between the minimize button and the frame's right border.
pub const BTN_PAD: i32 = 6;

/// Smallest content size a compositor-driven resize may produce.
pub const MIN_CLIENT_WIDTH: i32 = 120;
pub const MIN_CLIENT_HEIGHT: i32 = 80;

/// Content size assumed for clients that have not committed a usable size.
pub const FALLBACK_CONTENT_WIDTH: i32 = 640;
pub const FALLBACK_CONTENT_HEIGHT: i32 = 480;

const DEFAULT_ANIMATION_MS: u32 = 180;

#[derive(Debug, Clone)]
pub struct Config {
    /// Modifier mask that turns a primary-button press anywhere on a window
    /// into an interactive move.
    pub move_mod_mask: Modifiers,
    /// Minimize tween duration in milliseconds.
    pub minimize_duration_ms: u32,
    /// Restore tween duration in milliseconds.
    pub restore_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            move_mod_mask: Modifiers::ALT | Modifiers::LOGO,
            minimize_duration_ms: DEFAULT_ANIMATION_MS,
            restore_duration_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl Config {
    /// Build a config from `SCENE_WM_BIND_MOD` and `SCENE_WM_ANIM_MS`,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let anim_ms = env_int("SCENE_WM_ANIM_MS", DEFAULT_ANIMATION_MS as i32).max(1) as u32;
        Self {
            move_mod_mask: parse_mod_mask(std::env::var("SCENE_WM_BIND_MOD").ok().as_deref()),
            minimize_duration_ms: anim_ms,
            restore_duration_ms: anim_ms,
        }
    }
}

/// Read an integer environment variable, returning `fallback` when the
/// variable is unset, empty, or not a whole base-10 number.
pub fn env_int(name: &str, fallback: i32) -> i32 {
    parse_int(std::env::var(name).ok().as_deref(), fallback)
}

fn parse_int(value: Option<&str>, fallback: i32) -> i32 {
    match value {
        Some(raw) if !raw.is_empty() => raw.trim().parse().unwrap_or(fallback),
        _ => fallback,
    }
}

fn parse_mod_mask(value: Option<&str>) -> Modifiers {
    let default = Modifiers::ALT | Modifiers::LOGO;
    let Some(raw) = value else {
        return default;
    };
    match raw {
        "alt" | "option" => Modifiers::ALT,
        "super" | "logo" | "cmd" | "command" => Modifiers::LOGO,
        "ctrl" | "control" => Modifiers::CTRL,
        "alt+super" | "super+alt" | "alt_or_super" => Modifiers::ALT | Modifiers::LOGO,
        // Safe default for mixed desktop/VM setups.
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_accepts_plain_numbers() {
        assert_eq!(parse_int(Some("240"), 7), 240);
        assert_eq!(parse_int(Some("-3"), 7), -3);
    }

    #[test]
    fn parse_int_falls_back_on_garbage() {
        assert_eq!(parse_int(Some(""), 7), 7);
        assert_eq!(parse_int(Some("12px"), 7), 7);
        assert_eq!(parse_int(None, 7), 7);
    }

    #[test]
    fn mod_mask_aliases() {
        assert_eq!(parse_mod_mask(Some("alt")), Modifiers::ALT);
        assert_eq!(parse_mod_mask(Some("cmd")), Modifiers::LOGO);
        assert_eq!(parse_mod_mask(Some("control")), Modifiers::CTRL);
        assert_eq!(
            parse_mod_mask(Some("super+alt")),
            Modifiers::ALT | Modifiers::LOGO
        );
    }

    #[test]
    fn mod_mask_defaults_for_unknown_names() {
        let default = Modifiers::ALT | Modifiers::LOGO;
        assert_eq!(parse_mod_mask(None), default);
        assert_eq!(parse_mod_mask(Some("hyper")), default);
    }
}
