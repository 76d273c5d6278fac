//! Display topology tracking
//!
//! Holds the current set of display viewports and answers viewport lookups
//! for the rest of the pipeline. The set is replaced atomically whenever the
//! window manager pushes a new configuration.

use std::collections::HashMap;

use tracing::{debug, warn};

/// Logical display identifier.
pub type DisplayId = i32;

/// Reserved display id meaning "no display assigned".
///
/// Never a valid key in the topology; round-trips through the event pipeline
/// unchanged.
pub const DISPLAY_NONE: DisplayId = -1;

/// A display's logical coordinate rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Display this viewport belongs to.
    pub display_id: DisplayId,

    /// Logical width in display coordinates.
    pub logical_width: u32,

    /// Logical height in display coordinates.
    pub logical_height: u32,
}

impl Viewport {
    /// Clamp a point into this viewport's logical bounds.
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        let clamped_x = x.clamp(0.0, self.logical_width as f32 - 1.0);
        let clamped_y = y.clamp(0.0, self.logical_height as f32 - 1.0);
        (clamped_x, clamped_y)
    }
}

/// Current set of display viewports, keyed by display id.
#[derive(Debug, Default)]
pub struct DisplayTopology {
    viewports: HashMap<DisplayId, Viewport>,
}

impl DisplayTopology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole viewport set.
    ///
    /// The previous set is discarded. A duplicate display id in the input is
    /// resolved last-wins; `DISPLAY_NONE` entries are ignored.
    pub fn set_viewports(&mut self, viewports: Vec<Viewport>) {
        let mut next = HashMap::with_capacity(viewports.len());
        for viewport in viewports {
            if viewport.display_id == DISPLAY_NONE {
                warn!("Ignoring viewport with unassigned display id");
                continue;
            }
            if next.insert(viewport.display_id, viewport).is_some() {
                warn!(
                    "Duplicate viewport for display {}, keeping the later one",
                    viewport.display_id
                );
            }
        }
        debug!("Topology replaced: {} viewport(s)", next.len());
        self.viewports = next;
    }

    /// Look up the viewport for a display, if one is configured.
    ///
    /// `DISPLAY_NONE` never matches.
    pub fn viewport(&self, display_id: DisplayId) -> Option<Viewport> {
        self.viewports.get(&display_id).copied()
    }

    /// Whether a display is present in the topology.
    pub fn contains(&self, display_id: DisplayId) -> bool {
        self.viewports.contains_key(&display_id)
    }

    /// Number of configured viewports.
    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    /// Whether the topology is empty.
    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }
}
