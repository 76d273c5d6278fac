//! Input source classification
//!
//! Devices and events carry a bitset describing which input classes they
//! speak. A combined device (e.g. a touchscreen with stylus support) sets
//! several bits at once.

use enumflags2::{bitflags, BitFlags};

/// One input capability class.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceClass {
    /// Absolute-capable mouse; moves a cursor with relative axes.
    Mouse = 1,
    /// Pointer-captured mouse delivering raw deltas only.
    MouseRelative = 2,
    /// Direct touch contacts on a screen.
    Touchscreen = 4,
    /// Stylus, including non-contact hover.
    Stylus = 8,
    /// Keyboard keys.
    Keyboard = 16,
    /// On-device sensor stream.
    Sensor = 32,
}

/// Source bitset carried by devices and motion events.
pub type Source = BitFlags<SourceClass>;

/// Whether the source can drive an on-screen cursor with relative axes.
pub fn is_absolute_mouse(source: Source) -> bool {
    source.contains(SourceClass::Mouse)
}

/// Whether the source delivers raw deltas only (pointer-captured mouse).
///
/// A device exposing both classes is treated as absolute-capable.
pub fn is_relative_only_mouse(source: Source) -> bool {
    source.contains(SourceClass::MouseRelative) && !source.contains(SourceClass::Mouse)
}

/// Whether the source belongs to the mouse family at all.
pub fn is_mouse_family(source: Source) -> bool {
    source.intersects(SourceClass::Mouse | SourceClass::MouseRelative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_mouse_classification() {
        assert!(is_absolute_mouse(SourceClass::Mouse.into()));
        assert!(!is_absolute_mouse(SourceClass::MouseRelative.into()));
        assert!(!is_absolute_mouse(SourceClass::Touchscreen.into()));
    }

    #[test]
    fn test_relative_only_classification() {
        assert!(is_relative_only_mouse(SourceClass::MouseRelative.into()));
        assert!(!is_relative_only_mouse(
            SourceClass::Mouse | SourceClass::MouseRelative
        ));
        assert!(!is_relative_only_mouse(SourceClass::Keyboard.into()));
    }

    #[test]
    fn test_combined_source_keeps_both_classes() {
        let source = SourceClass::Touchscreen | SourceClass::Stylus;
        assert!(source.contains(SourceClass::Touchscreen));
        assert!(source.contains(SourceClass::Stylus));
        assert!(!is_mouse_family(source));
    }
}
