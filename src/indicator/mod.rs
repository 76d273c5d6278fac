//! On-screen pointer indicators
//!
//! An indicator is the display-side object that draws a cursor, touch spots,
//! or a stylus hover icon on one logical display. Rendering lives outside
//! this crate; the choreographer drives indicators purely through the
//! [`Indicator`] contract and owns their lifetimes through the
//! [`IndicatorRegistry`](registry::IndicatorRegistry).

pub mod registry;

pub use registry::{IndicatorEntry, IndicatorKey, IndicatorRegistry};

use crate::topology::{DisplayId, Viewport};

/// The product kinds an indicator factory can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    /// A mouse cursor for one display.
    Mouse,
    /// Touch spot marks for one device.
    Touch,
    /// A stylus hover icon for one device.
    Stylus,
}

/// Visual mark for one active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    /// Pointer id of the contact.
    pub pointer_id: i32,

    /// Contact x in display coordinates.
    pub x: f32,

    /// Contact y in display coordinates.
    pub y: f32,
}

/// Contract of the external indicator object.
///
/// One capability surface covers all three kinds; methods that do not apply
/// to a kind default to no-ops. Implementations hand out shared handles, so
/// every method takes `&self`; all state lives behind the implementor's own
/// interior mutability.
pub trait Indicator {
    /// Bind the indicator to a display viewport, or unbind it with `None`.
    fn set_viewport(&self, viewport: Option<Viewport>);

    /// The display the indicator is currently bound to, or
    /// [`DISPLAY_NONE`](crate::topology::DISPLAY_NONE).
    fn display_id(&self) -> DisplayId;

    /// Current pointer position in display coordinates.
    fn position(&self) -> (f32, f32);

    /// Move the pointer to a position in display coordinates.
    fn set_position(&self, x: f32, y: f32);

    /// Make the pointer visible.
    fn show(&self);

    /// Hide the pointer.
    fn hide(&self);

    /// Fade the pointer out. Equivalent to [`hide`](Indicator::hide).
    fn fade(&self) {
        self.hide();
    }

    /// Whether the pointer is currently visible.
    fn is_shown(&self) -> bool;

    /// Replace the active touch spots for one display.
    fn set_spots(&self, _display_id: DisplayId, _spots: &[Spot]) {}

    /// Remove all spot state for one display.
    fn clear_spots(&self, _display_id: DisplayId) {}
}
