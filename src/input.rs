//! Pointer and keyboard event types consumed by the window manager.
//!
//! The input collaborator translates raw device events into these values and
//! keeps [`Modifiers`] up to date; the core never polls hardware itself.

use bitflags::bitflags;

/// Linux evdev code for the primary (left) pointer button.
pub const BTN_LEFT: u32 = 0x110;

bitflags! {
    /// Currently held keyboard modifiers, using the seat's modifier bit
    /// layout so masks from the shell collaborator pass through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A pointer button event as delivered by the seat, including the protocol
/// serial used to validate client-initiated grab requests.
#[derive(Debug, Clone, Copy)]
pub struct ButtonEvent {
    pub button: u32,
    pub state: ButtonState,
    pub time_msec: u32,
    pub serial: u32,
}

impl ButtonEvent {
    pub fn pressed(button: u32, time_msec: u32, serial: u32) -> Self {
        Self {
            button,
            state: ButtonState::Pressed,
            time_msec,
            serial,
        }
    }

    pub fn released(button: u32, time_msec: u32, serial: u32) -> Self {
        Self {
            button,
            state: ButtonState::Released,
            time_msec,
            serial,
        }
    }
}
