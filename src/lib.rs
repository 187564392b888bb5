//! Interaction and layout core for a scene-graph desktop window manager.
//!
//! This crate owns the window manager's decision making: where every window
//! frame sits on screen, which region of a frame a pointer coordinate belongs
//! to, how windows move through the normal/minimized/restoring lifecycle, and
//! how the row of minimized-window buttons is packed and hit-tested.
//!
//! It deliberately does not render anything and does not talk to a display
//! backend. The rendering, shell-protocol, input, and output collaborators
//! feed events in through [`wm::WindowManager`] and read the resulting
//! geometry, visibility, and opacity state back out each frame.

pub mod animate;
pub mod config;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod taskbar;
pub mod tracing_sub;
pub mod view;
pub mod wm;

pub use config::Config;
pub use geometry::Rect;
pub use hit::ResizeEdges;
pub use input::{ButtonEvent, ButtonState, Modifiers};
pub use view::{DecorationMode, View, ViewId};
pub use wm::{
    ButtonDisposition, ConfigureRequest, CursorMode, GrabRejected, MotionOutcome, WindowManager,
};
