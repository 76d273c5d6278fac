//! Indicator registry
//!
//! One entry per active pointer instance, keyed by kind and discriminator.
//! The registry is the sole owner of indicator handles: removing an entry
//! drops the last reference this crate holds, which releases the indicator's
//! graphical resources before the call returns.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::device::DeviceId;
use crate::indicator::{Indicator, IndicatorKind};
use crate::topology::{DisplayId, Viewport};

/// Identity of one active pointer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKey {
    /// The mouse cursor hosted on one display.
    Mouse(DisplayId),
    /// Touch spots for one device.
    Touch(DeviceId),
    /// The stylus hover icon for one device.
    Stylus(DeviceId),
}

impl IndicatorKey {
    /// The product kind this key identifies.
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorKey::Mouse(_) => IndicatorKind::Mouse,
            IndicatorKey::Touch(_) => IndicatorKind::Touch,
            IndicatorKey::Stylus(_) => IndicatorKind::Stylus,
        }
    }

    /// The device this key references, for device-discriminated kinds.
    pub fn device_id(&self) -> Option<DeviceId> {
        match self {
            IndicatorKey::Mouse(_) => None,
            IndicatorKey::Touch(device_id) | IndicatorKey::Stylus(device_id) => Some(*device_id),
        }
    }
}

/// Registry entry owning one indicator.
pub struct IndicatorEntry {
    /// The owned indicator handle.
    pub indicator: Arc<dyn Indicator>,

    /// Viewport currently bound, if the display is known to the topology.
    pub viewport: Option<Viewport>,

    /// Displays currently holding touch spots. Touch entries only.
    pub spot_displays: HashSet<DisplayId>,
}

impl IndicatorEntry {
    fn new(indicator: Arc<dyn Indicator>) -> Self {
        Self {
            indicator,
            viewport: None,
            spot_displays: HashSet::new(),
        }
    }

    /// Bind or unbind the viewport, pushing the change to the indicator.
    pub fn bind_viewport(&mut self, viewport: Option<Viewport>) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.indicator.set_viewport(viewport);
        }
    }

    /// The display this entry's viewport is bound to, or
    /// [`DISPLAY_NONE`](crate::topology::DISPLAY_NONE).
    pub fn bound_display(&self) -> DisplayId {
        self.viewport
            .map(|viewport| viewport.display_id)
            .unwrap_or(crate::topology::DISPLAY_NONE)
    }
}

/// Mapping from [`IndicatorKey`] to the entry owning its indicator.
#[derive(Default)]
pub struct IndicatorRegistry {
    entries: HashMap<IndicatorKey, IndicatorEntry>,
}

impl IndicatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the entry for a key, creating its indicator on first call.
    ///
    /// Idempotent: an existing entry is returned untouched and `create` is
    /// not invoked.
    pub fn ensure(
        &mut self,
        key: IndicatorKey,
        create: impl FnOnce() -> Arc<dyn Indicator>,
    ) -> &mut IndicatorEntry {
        self.entries.entry(key).or_insert_with(|| {
            debug!("Creating {:?} indicator for {:?}", key.kind(), key);
            IndicatorEntry::new(create())
        })
    }

    /// Look up an entry.
    pub fn get(&self, key: &IndicatorKey) -> Option<&IndicatorEntry> {
        self.entries.get(key)
    }

    /// Look up an entry mutably.
    pub fn get_mut(&mut self, key: &IndicatorKey) -> Option<&mut IndicatorEntry> {
        self.entries.get_mut(key)
    }

    /// Destroy an entry, releasing the indicator before returning.
    ///
    /// Returns whether an entry existed.
    pub fn remove(&mut self, key: &IndicatorKey) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            debug!("Removed {:?} indicator for {:?}", key.kind(), key);
        }
        existed
    }

    /// Bind or unbind the viewport of an entry, if it exists.
    pub fn bind_viewport(&mut self, key: &IndicatorKey, viewport: Option<Viewport>) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.bind_viewport(viewport);
        }
    }

    /// All keys currently present, optionally restricted to one kind.
    pub fn keys(&self, kind: Option<IndicatorKind>) -> Vec<IndicatorKey> {
        self.entries
            .keys()
            .filter(|key| matches_kind(key, kind))
            .copied()
            .collect()
    }

    /// Visit every entry, optionally restricted to one kind.
    pub fn for_each(
        &self,
        kind: Option<IndicatorKind>,
        mut visit: impl FnMut(&IndicatorKey, &IndicatorEntry),
    ) {
        for (key, entry) in &self.entries {
            if matches_kind(key, kind) {
                visit(key, entry);
            }
        }
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn matches_kind(key: &IndicatorKey, kind: Option<IndicatorKind>) -> bool {
    match kind {
        Some(kind) => key.kind() == kind,
        None => true,
    }
}
