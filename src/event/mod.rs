//! Input event surface
//!
//! The choreographer sits in a listener chain: it receives every event kind
//! the reader stage produces and forwards each of them — possibly rewritten,
//! in the motion case — to the inner listener. Kinds the choreographer does
//! not act on pass through unchanged.

pub mod motion;
pub mod source;

pub use motion::{MotionAction, MotionEvent, PointerSample, ToolType, INVALID_CURSOR_POSITION};
pub use source::{Source, SourceClass};

use crate::device::{DeviceId, DeviceInfo};

/// Receiver side of the listener chain.
pub trait InputListener {
    /// Deliver one event. Must not reenter the sender.
    fn notify(&mut self, event: InputEvent);
}

/// Key press state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyAction {
    /// Key pressed.
    #[default]
    Down,
    /// Key released.
    Up,
}

/// The input device list changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DevicesChangedEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// The complete new device list; anything absent is gone.
    pub devices: Vec<DeviceInfo>,
}

/// The input configuration changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigurationChangedEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,
}

/// A key went down or up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// Originating device.
    pub device_id: DeviceId,

    /// Source classes the event was produced from.
    pub source: Source,

    /// Press state.
    pub action: KeyAction,

    /// Platform key code.
    pub key_code: i32,
}

/// A sensor sample arrived.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// Originating device.
    pub device_id: DeviceId,
}

/// A hardware switch toggled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwitchEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// Bit per switch that changed.
    pub switch_mask: u32,

    /// New switch values for the changed bits.
    pub switch_values: u32,
}

/// A device's state was reset upstream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceResetEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// Device that was reset.
    pub device_id: DeviceId,
}

/// A pointer capture request, as decided elsewhere and signalled here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaptureRequest {
    /// Whether capture is being enabled.
    pub enable: bool,

    /// Sequence number of the request.
    pub seq: u32,
}

/// Pointer capture was enabled or disabled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureChangedEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Event timestamp in nanoseconds.
    pub event_time_ns: u64,

    /// The capture request being applied.
    pub request: CaptureRequest,
}

/// A vibrator started or stopped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VibratorStateEvent {
    /// Sequence id assigned upstream.
    pub seq: u32,

    /// Originating device.
    pub device_id: DeviceId,

    /// Whether the vibrator is running.
    pub is_on: bool,
}

/// Every event kind flowing through the listener chain.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Device list replaced.
    DevicesChanged(DevicesChangedEvent),
    /// Input configuration changed.
    ConfigurationChanged(ConfigurationChangedEvent),
    /// Key press or release.
    Key(KeyEvent),
    /// Pointer motion.
    Motion(MotionEvent),
    /// Sensor sample.
    Sensor(SensorEvent),
    /// Switch toggle.
    Switch(SwitchEvent),
    /// Device reset.
    DeviceReset(DeviceResetEvent),
    /// Pointer capture change.
    CaptureChanged(CaptureChangedEvent),
    /// Vibrator state change.
    VibratorState(VibratorStateEvent),
}
