//! Pointer Choreographer
//!
//! An in-process stage of an input pipeline that owns the visual state of
//! on-screen pointer indicators — mouse cursors, touch spots, stylus hover
//! icons — across a multi-display system, and rewrites in-flight mouse
//! motion so coordinates, display target, and cursor position agree with
//! that state.
//!
//! The stage sits between the input reader (which produces device-agnostic
//! events) and the dispatcher (which routes events to windows). It
//! implements the same listener contract as its inner target, forwards every
//! event kind, and calls back into the system policy to create indicators
//! and to announce which display currently hosts the default mouse pointer.
//!
//! Rendering is external: indicators are driven purely through the
//! [`Indicator`] contract, and their lifetimes are owned by the
//! choreographer. Indicators are created lazily on the first qualifying
//! event, never eagerly on device add.
//!
//! All operations are synchronous and single-threaded; there are no internal
//! tasks or timers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod choreographer;
pub mod config;
pub mod device;
pub mod event;
pub mod indicator;
pub mod mouse;
pub mod topology;

pub use choreographer::{ChoreographerPolicy, PointerChoreographer};
pub use config::{ChoreographerConfig, ConfigError};
pub use device::{DeviceId, DeviceInfo, DeviceRegistry};
pub use event::{InputEvent, InputListener, MotionEvent, Source, SourceClass};
pub use indicator::{Indicator, IndicatorKind, Spot};
pub use topology::{DisplayId, DisplayTopology, Viewport, DISPLAY_NONE};
