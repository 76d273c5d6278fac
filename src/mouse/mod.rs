//! Mouse motion handling
//!
//! Classifies mouse-family motion, resolves the display a cursor should live
//! on, advances the cursor from the event's relative axes, and rewrites the
//! event so its coordinates, display target, and cursor position agree with
//! the on-screen state.

use tracing::trace;

use crate::device::DeviceInfo;
use crate::event::motion::{MotionEvent, INVALID_CURSOR_POSITION};
use crate::event::source::{self, Source};
use crate::indicator::Indicator;
use crate::topology::{DisplayId, Viewport, DISPLAY_NONE};

/// How a motion event's source relates to cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseClass {
    /// Absolute-capable mouse; relative axes drive the cursor.
    Absolute,
    /// Captured mouse delivering raw deltas; never drives a cursor.
    RelativeOnly,
    /// Not a mouse-family source.
    NotMouse,
}

/// Classify a motion source for the rewrite pipeline.
pub fn classify(source: Source) -> MouseClass {
    if source::is_absolute_mouse(source) {
        MouseClass::Absolute
    } else if source::is_relative_only_mouse(source) {
        MouseClass::RelativeOnly
    } else {
        MouseClass::NotMouse
    }
}

/// Resolve the display a device's cursor lives on.
///
/// An explicit association wins; otherwise the policy's default mouse
/// display applies. May be [`DISPLAY_NONE`] when neither is set.
pub fn target_display(device: Option<&DeviceInfo>, default_display: DisplayId) -> DisplayId {
    match device {
        Some(info) if info.associated_display != DISPLAY_NONE => info.associated_display,
        _ => default_display,
    }
}

/// Advance the cursor by the event's relative axes.
///
/// The current position is read back from the indicator so positions
/// adjusted out-of-band are respected. The result is clamped into the
/// viewport when one is bound.
pub fn advance_cursor(
    indicator: &dyn Indicator,
    viewport: Option<&Viewport>,
    event: &MotionEvent,
) -> (f32, f32) {
    let (delta_x, delta_y) = relative_delta(event);
    let (x, y) = indicator.position();
    let moved = (x + delta_x, y + delta_y);
    let (new_x, new_y) = match viewport {
        Some(viewport) => viewport.clamp(moved.0, moved.1),
        None => moved,
    };

    trace!(
        "Cursor advance: ({:.2}, {:.2}) + ({:.2}, {:.2}) -> ({:.2}, {:.2})",
        x,
        y,
        delta_x,
        delta_y,
        new_x,
        new_y
    );
    indicator.set_position(new_x, new_y);
    (new_x, new_y)
}

/// The relative axes of the event's single pointer sample.
fn relative_delta(event: &MotionEvent) -> (f32, f32) {
    event
        .pointers
        .first()
        .map(|pointer| (pointer.relative_x, pointer.relative_y))
        .unwrap_or((0.0, 0.0))
}

/// Rewrite a mouse motion so it lands on the cursor's display.
///
/// The single pointer sample and the cursor position field both take the new
/// cursor position; relative axes are preserved.
pub fn rewrite(event: &MotionEvent, display_id: DisplayId, x: f32, y: f32) -> MotionEvent {
    let mut rewritten = event.clone();
    if let Some(pointer) = rewritten.pointers.first_mut() {
        pointer.x = x;
        pointer.y = y;
    }
    rewritten.display_id = display_id;
    rewritten.cursor_position = (x, y);
    rewritten
}

/// Rewrite a captured relative motion: unrouted, no cursor position.
///
/// Coordinates and relative axes pass through untouched.
pub fn rewrite_captured(event: &MotionEvent) -> MotionEvent {
    let mut rewritten = event.clone();
    rewritten.display_id = DISPLAY_NONE;
    rewritten.cursor_position = (INVALID_CURSOR_POSITION, INVALID_CURSOR_POSITION);
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::motion::{MotionAction, PointerSample, ToolType};
    use crate::event::source::SourceClass;
    use std::cell::Cell;

    struct TestCursor {
        position: Cell<(f32, f32)>,
    }

    impl TestCursor {
        fn at(x: f32, y: f32) -> Self {
            Self {
                position: Cell::new((x, y)),
            }
        }
    }

    impl Indicator for TestCursor {
        fn set_viewport(&self, _viewport: Option<Viewport>) {}

        fn display_id(&self) -> DisplayId {
            DISPLAY_NONE
        }

        fn position(&self) -> (f32, f32) {
            self.position.get()
        }

        fn set_position(&self, x: f32, y: f32) {
            self.position.set((x, y));
        }

        fn show(&self) {}

        fn hide(&self) {}

        fn is_shown(&self) -> bool {
            false
        }
    }

    fn mouse_move(relative_x: f32, relative_y: f32) -> MotionEvent {
        MotionEvent {
            source: SourceClass::Mouse.into(),
            action: MotionAction::HoverMove,
            pointers: vec![PointerSample {
                pointer_id: 0,
                tool: ToolType::Mouse,
                relative_x,
                relative_y,
                ..PointerSample::default()
            }],
            ..MotionEvent::default()
        }
    }

    fn viewport() -> Viewport {
        Viewport {
            display_id: 5,
            logical_width: 480,
            logical_height: 800,
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(SourceClass::Mouse.into()), MouseClass::Absolute);
        assert_eq!(
            classify(SourceClass::MouseRelative.into()),
            MouseClass::RelativeOnly
        );
        assert_eq!(
            classify(SourceClass::Touchscreen | SourceClass::Stylus),
            MouseClass::NotMouse
        );
    }

    #[test]
    fn test_target_display_prefers_association() {
        let associated = DeviceInfo::new(3, SourceClass::Mouse.into(), 10);
        let unassociated = DeviceInfo::new(4, SourceClass::Mouse.into(), DISPLAY_NONE);

        assert_eq!(target_display(Some(&associated), 5), 10);
        assert_eq!(target_display(Some(&unassociated), 5), 5);
        assert_eq!(target_display(None, 5), 5);
        assert_eq!(target_display(None, DISPLAY_NONE), DISPLAY_NONE);
    }

    #[test]
    fn test_advance_accumulates_deltas() {
        let cursor = TestCursor::at(100.0, 200.0);
        let event = mouse_move(10.0, 20.0);

        let (x, y) = advance_cursor(&cursor, Some(&viewport()), &event);
        assert_eq!((x, y), (110.0, 220.0));
        assert_eq!(cursor.position(), (110.0, 220.0));
    }

    #[test]
    fn test_advance_clamps_to_viewport() {
        let cursor = TestCursor::at(475.0, 795.0);
        let event = mouse_move(100.0, 100.0);

        let (x, y) = advance_cursor(&cursor, Some(&viewport()), &event);
        assert_eq!((x, y), (479.0, 799.0));
    }

    #[test]
    fn test_advance_without_viewport_is_unclamped() {
        let cursor = TestCursor::at(475.0, 795.0);
        let event = mouse_move(100.0, 100.0);

        let (x, y) = advance_cursor(&cursor, None, &event);
        assert_eq!((x, y), (575.0, 895.0));
    }

    #[test]
    fn test_rewrite_updates_coords_display_and_cursor() {
        let event = mouse_move(10.0, 20.0);
        let rewritten = rewrite(&event, 5, 110.0, 220.0);

        assert_eq!(rewritten.display_id, 5);
        assert_eq!(rewritten.cursor_position, (110.0, 220.0));
        assert_eq!(rewritten.pointers[0].x, 110.0);
        assert_eq!(rewritten.pointers[0].y, 220.0);
        assert_eq!(rewritten.pointers[0].relative_x, 10.0);
        assert_eq!(rewritten.pointers[0].relative_y, 20.0);
        assert_eq!(rewritten.action, event.action);
    }

    #[test]
    fn test_captured_rewrite_unroutes_the_event() {
        let mut event = mouse_move(10.0, 20.0);
        event.source = SourceClass::MouseRelative.into();
        event.pointers[0].x = 10.0;
        event.pointers[0].y = 20.0;

        let rewritten = rewrite_captured(&event);
        assert_eq!(rewritten.display_id, DISPLAY_NONE);
        assert_eq!(
            rewritten.cursor_position,
            (INVALID_CURSOR_POSITION, INVALID_CURSOR_POSITION)
        );
        assert_eq!(rewritten.pointers[0].x, 10.0);
        assert_eq!(rewritten.pointers[0].y, 20.0);
    }
}
