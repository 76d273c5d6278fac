//! Pointer choreography
//!
//! The choreographer owns the visual state of every on-screen pointer
//! indicator and rewrites in-flight mouse motion so coordinates, display
//! target, and cursor position agree with that state. It implements the same
//! listener contract as its inner target and forwards every event kind;
//! kinds it does not act on pass through unchanged.
//!
//! All operations run synchronously on the caller's thread. The inner
//! listener and the policy callbacks must not reenter the choreographer.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ChoreographerConfig;
use crate::device::DeviceRegistry;
use crate::event::motion::{MotionAction, MotionEvent};
use crate::event::source::SourceClass;
use crate::event::{
    CaptureChangedEvent, DeviceResetEvent, DevicesChangedEvent, InputEvent, InputListener,
};
use crate::indicator::{Indicator, IndicatorKey, IndicatorKind, IndicatorRegistry, Spot};
use crate::mouse::{self, MouseClass};
use crate::topology::{DisplayId, DisplayTopology, Viewport, DISPLAY_NONE};

/// Downward callbacks into the system policy.
///
/// Both callbacks run synchronously inside the choreographer call that
/// triggered them and must not call back into the choreographer.
pub trait ChoreographerPolicy {
    /// Create an indicator of the requested kind. The caller becomes the
    /// sole owner of the returned handle.
    fn create_indicator(&mut self, kind: IndicatorKind) -> Arc<dyn Indicator>;

    /// The display hosting the default mouse pointer changed, including
    /// transitions to [`DISPLAY_NONE`].
    fn pointer_display_changed(&mut self, display_id: DisplayId, position: (f32, f32));
}

/// The pointer choreography stage of the input pipeline.
pub struct PointerChoreographer<L, P> {
    listener: L,
    policy: P,
    topology: DisplayTopology,
    devices: DeviceRegistry,
    indicators: IndicatorRegistry,
    default_mouse_display: DisplayId,
    show_touches: bool,
    stylus_icon: bool,
    pointer_capture: bool,
    notified_pointer_display: DisplayId,
}

impl<L: InputListener, P: ChoreographerPolicy> PointerChoreographer<L, P> {
    /// Create a choreographer forwarding to `listener` and calling back into
    /// `policy`.
    pub fn new(listener: L, policy: P) -> Self {
        Self {
            listener,
            policy,
            topology: DisplayTopology::new(),
            devices: DeviceRegistry::new(),
            indicators: IndicatorRegistry::new(),
            default_mouse_display: DISPLAY_NONE,
            show_touches: false,
            stylus_icon: false,
            pointer_capture: false,
            notified_pointer_display: DISPLAY_NONE,
        }
    }

    /// Create a choreographer with initial policy settings applied.
    pub fn with_config(listener: L, policy: P, config: &ChoreographerConfig) -> Self {
        let mut choreographer = Self::new(listener, policy);
        choreographer.set_default_mouse_display(config.default_mouse_display);
        choreographer.set_show_touches_enabled(config.show_touches);
        choreographer.set_stylus_pointer_icon_enabled(config.stylus_pointer_icon);
        choreographer
    }

    /// Receive one upstream event, update indicator state, and forward the
    /// (possibly rewritten) event to the inner listener.
    pub fn notify(&mut self, event: InputEvent) {
        let forwarded = match event {
            InputEvent::DevicesChanged(args) => {
                self.on_devices_changed(&args);
                InputEvent::DevicesChanged(args)
            }
            InputEvent::Motion(args) => InputEvent::Motion(self.on_motion(args)),
            InputEvent::DeviceReset(args) => {
                self.on_device_reset(&args);
                InputEvent::DeviceReset(args)
            }
            InputEvent::CaptureChanged(args) => {
                self.on_capture_changed(&args);
                InputEvent::CaptureChanged(args)
            }
            other => other,
        };
        self.check_invariants();
        self.listener.notify(forwarded);
    }

    /// Replace the display topology.
    pub fn set_display_viewports(&mut self, viewports: Vec<Viewport>) {
        self.topology.set_viewports(viewports);
        self.refresh_viewport_bindings();
        self.update_pointer_display_notification();
        self.check_invariants();
    }

    /// Choose the display that hosts cursors for unassociated mice.
    ///
    /// A mouse entry on the previous default that no device still targets is
    /// destroyed before this call returns.
    pub fn set_default_mouse_display(&mut self, display_id: DisplayId) {
        if display_id == self.default_mouse_display {
            return;
        }
        debug!(
            "Default mouse display: {} -> {}",
            self.default_mouse_display, display_id
        );
        self.default_mouse_display = display_id;
        self.reconcile_mouse_entries();
        self.update_pointer_display_notification();
        self.check_invariants();
    }

    /// Enable or disable touch spot indicators.
    ///
    /// Disabling destroys every touch entry before this call returns.
    pub fn set_show_touches_enabled(&mut self, enabled: bool) {
        self.show_touches = enabled;
        if !enabled {
            for key in self.indicators.keys(Some(IndicatorKind::Touch)) {
                self.indicators.remove(&key);
            }
        }
        self.check_invariants();
    }

    /// Enable or disable the stylus hover icon.
    ///
    /// Disabling destroys every stylus entry before this call returns.
    pub fn set_stylus_pointer_icon_enabled(&mut self, enabled: bool) {
        self.stylus_icon = enabled;
        if !enabled {
            for key in self.indicators.keys(Some(IndicatorKind::Stylus)) {
                self.indicators.remove(&key);
            }
        }
        self.check_invariants();
    }

    /// The current default mouse display.
    pub fn default_mouse_display(&self) -> DisplayId {
        self.default_mouse_display
    }

    /// Whether touch spots are enabled.
    pub fn show_touches_enabled(&self) -> bool {
        self.show_touches
    }

    /// Whether the stylus hover icon is enabled.
    pub fn stylus_pointer_icon_enabled(&self) -> bool {
        self.stylus_icon
    }

    /// Whether pointer capture is active.
    pub fn pointer_capture_enabled(&self) -> bool {
        self.pointer_capture
    }

    /// Human-readable summary of the current pointer fleet.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PointerChoreographer:");
        let _ = writeln!(out, "  default mouse display: {}", self.default_mouse_display);
        let _ = writeln!(out, "  show touches: {}", self.show_touches);
        let _ = writeln!(out, "  stylus icon: {}", self.stylus_icon);
        let _ = writeln!(out, "  pointer capture: {}", self.pointer_capture);
        let _ = writeln!(out, "  viewports: {}", self.topology.len());
        let _ = writeln!(out, "  devices: {}", self.devices.len());
        let _ = writeln!(out, "  indicators: {}", self.indicators.len());
        self.indicators.for_each(None, |key, entry| {
            let _ = writeln!(
                out,
                "    {:?} bound to display {}, shown: {}",
                key,
                entry.bound_display(),
                entry.indicator.is_shown()
            );
        });
        out
    }

    fn on_devices_changed(&mut self, event: &DevicesChangedEvent) {
        let removed = self.devices.replace(event.devices.clone());
        for device_id in removed {
            self.indicators.remove(&IndicatorKey::Touch(device_id));
            self.indicators.remove(&IndicatorKey::Stylus(device_id));
        }
        self.reconcile_mouse_entries();
        self.refresh_viewport_bindings();
        self.update_pointer_display_notification();
    }

    fn on_motion(&mut self, event: MotionEvent) -> MotionEvent {
        match mouse::classify(event.source) {
            MouseClass::Absolute => self.process_mouse(event),
            MouseClass::RelativeOnly => {
                if self.pointer_capture {
                    mouse::rewrite_captured(&event)
                } else {
                    event
                }
            }
            MouseClass::NotMouse => {
                if self.stylus_icon
                    && event.source.contains(SourceClass::Stylus)
                    && event.action.is_hover()
                {
                    self.process_stylus_hover(&event);
                } else if self.show_touches
                    && event.source.contains(SourceClass::Touchscreen)
                    && !event.action.is_hover()
                {
                    self.process_touch(&event);
                }
                event
            }
        }
    }

    /// Rewrite pipeline for absolute mouse motion.
    fn process_mouse(&mut self, event: MotionEvent) -> MotionEvent {
        if self.pointer_capture {
            // Cursors stay hidden and frozen while capture is active.
            return event;
        }
        if event.pointers.len() != 1 {
            warn!(
                "Mouse motion with {} pointer samples, forwarding unchanged",
                event.pointers.len()
            );
            return event;
        }
        let Some(device) = self.devices.get(event.device_id) else {
            warn!(
                "Mouse motion from unknown device {}, forwarding unchanged",
                event.device_id
            );
            return event;
        };

        let target = mouse::target_display(Some(device), self.default_mouse_display);
        if target == DISPLAY_NONE {
            return event;
        }

        let viewport = self.topology.viewport(target);
        let policy = &mut self.policy;
        let entry = self.indicators.ensure(IndicatorKey::Mouse(target), || {
            policy.create_indicator(IndicatorKind::Mouse)
        });
        entry.bind_viewport(viewport);

        let (x, y) =
            mouse::advance_cursor(entry.indicator.as_ref(), entry.viewport.as_ref(), &event);
        entry.indicator.show();

        let rewritten = mouse::rewrite(&event, target, x, y);
        self.update_pointer_display_notification();
        rewritten
    }

    /// Visual-only path for stylus hover events.
    fn process_stylus_hover(&mut self, event: &MotionEvent) {
        if event.pointers.len() != 1 {
            warn!(
                "Stylus hover with {} pointer samples, ignoring",
                event.pointers.len()
            );
            return;
        }
        if !self.devices.contains(event.device_id) {
            return;
        }

        let associated = self.devices.associated_display(event.device_id);
        let viewport = self.topology.viewport(associated);
        let policy = &mut self.policy;
        let entry = self
            .indicators
            .ensure(IndicatorKey::Stylus(event.device_id), || {
                policy.create_indicator(IndicatorKind::Stylus)
            });
        entry.bind_viewport(viewport);

        match event.action {
            MotionAction::HoverEnter | MotionAction::HoverMove => {
                let pointer = &event.pointers[0];
                entry.indicator.set_position(pointer.x, pointer.y);
                entry.indicator.show();
            }
            MotionAction::HoverExit => entry.indicator.fade(),
            _ => {}
        }
    }

    /// Visual-only path for touch contacts.
    fn process_touch(&mut self, event: &MotionEvent) {
        if !self.devices.contains(event.device_id) {
            return;
        }

        let associated = self.devices.associated_display(event.device_id);
        let viewport = self.topology.viewport(associated);
        let policy = &mut self.policy;
        let entry = self
            .indicators
            .ensure(IndicatorKey::Touch(event.device_id), || {
                policy.create_indicator(IndicatorKind::Touch)
            });
        entry.bind_viewport(viewport);

        let spots = active_spots(event);
        entry.indicator.set_spots(event.display_id, &spots);
        entry.spot_displays.insert(event.display_id);
    }

    fn on_device_reset(&mut self, event: &DeviceResetEvent) {
        if let Some(entry) = self
            .indicators
            .get_mut(&IndicatorKey::Touch(event.device_id))
        {
            for display in entry.spot_displays.drain() {
                entry.indicator.clear_spots(display);
            }
        }
        if let Some(entry) = self.indicators.get(&IndicatorKey::Stylus(event.device_id)) {
            entry.indicator.fade();
        }
    }

    fn on_capture_changed(&mut self, event: &CaptureChangedEvent) {
        self.pointer_capture = event.request.enable;
        if self.pointer_capture {
            debug!("Pointer capture enabled, hiding mouse indicators");
            self.indicators
                .for_each(Some(IndicatorKind::Mouse), |_, entry| {
                    entry.indicator.hide()
                });
        }
    }

    /// Destroy mouse entries on displays no live mouse device still targets.
    ///
    /// Mouse entries are only ever created lazily by motion, never here.
    fn reconcile_mouse_entries(&mut self) {
        let keep: HashSet<DisplayId> = self
            .devices
            .resolved_mouse_displays(self.default_mouse_display);
        for key in self.indicators.keys(Some(IndicatorKind::Mouse)) {
            if let IndicatorKey::Mouse(display) = key {
                if !keep.contains(&display) {
                    self.indicators.remove(&key);
                }
            }
        }
    }

    /// Rebind every entry's viewport to the current topology.
    ///
    /// Device-keyed entries bind through the device's associated display;
    /// mouse entries bind through the display they are keyed on.
    fn refresh_viewport_bindings(&mut self) {
        for key in self.indicators.keys(None) {
            let desired = match key {
                IndicatorKey::Mouse(display) => self.topology.viewport(display),
                IndicatorKey::Touch(device_id) | IndicatorKey::Stylus(device_id) => self
                    .topology
                    .viewport(self.devices.associated_display(device_id)),
            };
            self.indicators.bind_viewport(&key, desired);
        }
    }

    /// Notify the policy when the display hosting the default mouse pointer
    /// changes. Repeats are suppressed.
    fn update_pointer_display_notification(&mut self) {
        let (active, position) = match self
            .indicators
            .get(&IndicatorKey::Mouse(self.default_mouse_display))
        {
            Some(entry) => (entry.bound_display(), entry.indicator.position()),
            None => (DISPLAY_NONE, (0.0, 0.0)),
        };
        if active != self.notified_pointer_display {
            self.notified_pointer_display = active;
            debug!("Pointer display changed to {}", active);
            self.policy.pointer_display_changed(active, position);
        }
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        let resolved = self
            .devices
            .resolved_mouse_displays(self.default_mouse_display);
        self.indicators.for_each(None, |key, entry| {
            if let Some(device_id) = key.device_id() {
                debug_assert!(
                    self.devices.contains(device_id),
                    "indicator {key:?} outlives its device"
                );
            }
            match key {
                IndicatorKey::Mouse(display) => {
                    debug_assert!(
                        resolved.contains(display),
                        "mouse indicator on display {display} that no device targets"
                    );
                    debug_assert_eq!(
                        entry.viewport.is_some(),
                        self.topology.contains(*display),
                        "mouse indicator viewport binding out of sync on display {display}"
                    );
                    if self.pointer_capture {
                        debug_assert!(
                            !entry.indicator.is_shown(),
                            "mouse indicator visible while capture is active"
                        );
                    }
                }
                IndicatorKey::Touch(device_id) => {
                    debug_assert!(self.show_touches, "touch indicator while spots disabled");
                    let associated = self.devices.associated_display(*device_id);
                    debug_assert_eq!(
                        entry.viewport.is_some(),
                        self.topology.contains(associated),
                        "touch indicator viewport binding out of sync"
                    );
                }
                IndicatorKey::Stylus(device_id) => {
                    debug_assert!(self.stylus_icon, "stylus indicator while icon disabled");
                    let associated = self.devices.associated_display(*device_id);
                    debug_assert_eq!(
                        entry.viewport.is_some(),
                        self.topology.contains(associated),
                        "stylus indicator viewport binding out of sync"
                    );
                }
            }
        });

        let active = self
            .indicators
            .get(&IndicatorKey::Mouse(self.default_mouse_display))
            .map(|entry| entry.bound_display())
            .unwrap_or(DISPLAY_NONE);
        debug_assert_eq!(
            active, self.notified_pointer_display,
            "stale pointer display notification"
        );
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}

/// Spots visible after a touch motion: every pointer sample, minus the one
/// acting in a pointer-up, and none at all once the gesture ends.
fn active_spots(event: &MotionEvent) -> Vec<Spot> {
    match event.action {
        MotionAction::Up | MotionAction::Cancel => Vec::new(),
        MotionAction::PointerUp { index } => event
            .pointers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, pointer)| Spot {
                pointer_id: pointer.pointer_id,
                x: pointer.x,
                y: pointer.y,
            })
            .collect(),
        _ => event
            .pointers
            .iter()
            .map(|pointer| Spot {
                pointer_id: pointer.pointer_id,
                x: pointer.x,
                y: pointer.y,
            })
            .collect(),
    }
}
