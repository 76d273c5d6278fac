//! Input device registry
//!
//! Tracks the live device list as published by the reader stage: each
//! device's source classes and its associated display, if enumeration bound
//! it to one. The list is replaced atomically on every device-list-changed
//! event; devices absent from the new list are gone.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::event::source::{self, Source};
use crate::topology::{DisplayId, DISPLAY_NONE};

/// Input device identifier.
pub type DeviceId = i32;

/// One live input device.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceInfo {
    /// Device identifier.
    pub device_id: DeviceId,

    /// Source classes the device speaks.
    pub source: Source,

    /// Display bound at enumeration time, or [`DISPLAY_NONE`].
    pub associated_display: DisplayId,
}

impl DeviceInfo {
    /// Create a device description.
    pub fn new(device_id: DeviceId, source: Source, associated_display: DisplayId) -> Self {
        Self {
            device_id,
            source,
            associated_display,
        }
    }
}

/// Live device list with capability and association lookups.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceId, DeviceInfo>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the device list, returning the ids that disappeared.
    pub fn replace(&mut self, devices: Vec<DeviceInfo>) -> Vec<DeviceId> {
        let mut next = HashMap::with_capacity(devices.len());
        for device in devices {
            next.insert(device.device_id, device);
        }

        let mut removed: Vec<DeviceId> = self
            .devices
            .keys()
            .filter(|id| !next.contains_key(id))
            .copied()
            .collect();
        removed.sort_unstable();

        debug!(
            "Device list replaced: {} device(s), {} removed",
            next.len(),
            removed.len()
        );
        self.devices = next;
        removed
    }

    /// Look up a device.
    pub fn get(&self, device_id: DeviceId) -> Option<&DeviceInfo> {
        self.devices.get(&device_id)
    }

    /// Whether a device is currently live.
    pub fn contains(&self, device_id: DeviceId) -> bool {
        self.devices.contains_key(&device_id)
    }

    /// A device's associated display, or [`DISPLAY_NONE`] for unknown devices.
    pub fn associated_display(&self, device_id: DeviceId) -> DisplayId {
        self.devices
            .get(&device_id)
            .map(|info| info.associated_display)
            .unwrap_or(DISPLAY_NONE)
    }

    /// Displays that should currently host a mouse cursor.
    ///
    /// Each mouse-family device resolves to its associated display, or to the
    /// default mouse display when unassociated. An unresolvable device
    /// (no association, no default) contributes nothing.
    pub fn resolved_mouse_displays(&self, default_display: DisplayId) -> HashSet<DisplayId> {
        self.devices
            .values()
            .filter(|info| source::is_mouse_family(info.source))
            .map(|info| {
                if info.associated_display != DISPLAY_NONE {
                    info.associated_display
                } else {
                    default_display
                }
            })
            .filter(|display| *display != DISPLAY_NONE)
            .collect()
    }

    /// Number of live devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no devices are live.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::source::SourceClass;

    fn mouse(device_id: DeviceId, associated_display: DisplayId) -> DeviceInfo {
        DeviceInfo::new(device_id, SourceClass::Mouse.into(), associated_display)
    }

    #[test]
    fn test_replace_reports_removed_devices() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![mouse(3, DISPLAY_NONE), mouse(4, 10)]);
        assert_eq!(registry.len(), 2);

        let removed = registry.replace(vec![mouse(4, 10)]);
        assert_eq!(removed, vec![3]);
        assert!(!registry.contains(3));
        assert!(registry.contains(4));
    }

    #[test]
    fn test_replace_with_empty_list_removes_everything() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![mouse(3, DISPLAY_NONE)]);

        let removed = registry.replace(vec![]);
        assert_eq!(removed, vec![3]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_association_lookup() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![mouse(3, 5)]);

        assert_eq!(registry.associated_display(3), 5);
        assert_eq!(registry.associated_display(99), DISPLAY_NONE);
    }

    #[test]
    fn test_resolved_mouse_displays_prefers_association() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![mouse(3, DISPLAY_NONE), mouse(4, 10)]);

        let displays = registry.resolved_mouse_displays(5);
        assert!(displays.contains(&5));
        assert!(displays.contains(&10));
        assert_eq!(displays.len(), 2);
    }

    #[test]
    fn test_unresolvable_mouse_contributes_no_display() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![mouse(3, DISPLAY_NONE)]);

        assert!(registry.resolved_mouse_displays(DISPLAY_NONE).is_empty());
    }

    #[test]
    fn test_relative_only_mouse_keeps_display_resolved() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![DeviceInfo::new(
            3,
            SourceClass::MouseRelative.into(),
            DISPLAY_NONE,
        )]);

        let displays = registry.resolved_mouse_displays(5);
        assert!(displays.contains(&5));
    }

    #[test]
    fn test_non_mouse_devices_resolve_nothing() {
        let mut registry = DeviceRegistry::new();
        registry.replace(vec![DeviceInfo::new(
            3,
            SourceClass::Keyboard.into(),
            DISPLAY_NONE,
        )]);

        assert!(registry.resolved_mouse_displays(5).is_empty());
    }
}
