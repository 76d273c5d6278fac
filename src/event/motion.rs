//! Motion event data model
//!
//! A motion event carries one sample per active pointer plus the routing
//! fields the choreographer rewrites: the target display and the on-screen
//! cursor position.

use crate::device::DeviceId;
use crate::event::source::Source;
use crate::topology::{DisplayId, DISPLAY_NONE};

/// Cursor position value meaning "no cursor position applies".
pub const INVALID_CURSOR_POSITION: f32 = f32::MIN;

/// Tool that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolType {
    /// A finger contact.
    #[default]
    Finger,
    /// A mouse cursor.
    Mouse,
    /// A stylus tip.
    Stylus,
}

/// Motion action, with the acting pointer index where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionAction {
    /// First pointer went down.
    Down,
    /// Last pointer went up.
    Up,
    /// Pointer positions changed.
    #[default]
    Move,
    /// Gesture aborted; all pointers lifted.
    Cancel,
    /// An additional pointer went down.
    PointerDown {
        /// Index of the pointer that went down.
        index: usize,
    },
    /// A non-last pointer went up.
    PointerUp {
        /// Index of the pointer that went up.
        index: usize,
    },
    /// Non-contact hover began.
    HoverEnter,
    /// Non-contact hover moved.
    HoverMove,
    /// Non-contact hover ended.
    HoverExit,
    /// Scroll wheel turned.
    Scroll,
}

impl MotionAction {
    /// Whether this is a non-contact hover action.
    pub fn is_hover(&self) -> bool {
        matches!(
            self,
            MotionAction::HoverEnter | MotionAction::HoverMove | MotionAction::HoverExit
        )
    }
}

/// One pointer's state within a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Stable pointer id within the gesture.
    pub pointer_id: i32,

    /// Tool that produced this sample.
    pub tool: ToolType,

    /// Absolute x in display coordinates.
    pub x: f32,

    /// Absolute y in display coordinates.
    pub y: f32,

    /// Relative x axis value (mouse delta).
    pub relative_x: f32,

    /// Relative y axis value (mouse delta).
    pub relative_y: f32,
}

/// A device-agnostic motion event.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// Originating device.
    pub device_id: DeviceId,

    /// Source classes the event was produced from.
    pub source: Source,

    /// Target display, or [`DISPLAY_NONE`] when unrouted.
    pub display_id: DisplayId,

    /// What happened.
    pub action: MotionAction,

    /// One sample per active pointer.
    pub pointers: Vec<PointerSample>,

    /// On-screen cursor position, or the invalid sentinel.
    pub cursor_position: (f32, f32),
}

impl Default for MotionEvent {
    fn default() -> Self {
        Self {
            seq: 0,
            event_time_ns: 0,
            device_id: 0,
            source: Source::default(),
            display_id: DISPLAY_NONE,
            action: MotionAction::default(),
            pointers: Vec::new(),
            cursor_position: (INVALID_CURSOR_POSITION, INVALID_CURSOR_POSITION),
        }
    }
}
