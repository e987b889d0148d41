//! Screen capture for simulated environments.
//!
//! Renders an [`Environment`], resizes the frame without anti-aliasing and
//! hands back a `(1, channels, width, height)` candle tensor on the requested
//! device.

pub mod capture;
pub mod config;
pub mod device;
pub mod environment;
pub mod error;

pub use capture::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, ScreenCapture, capture, capture_default, capture_with,
    frame_to_tensor,
};
pub use config::CaptureConfig;
pub use device::DeviceSpec;
pub use environment::{Environment, EnvironmentError, RenderMode, StaticEnvironment};
pub use error::CaptureError;
pub use grab_image::ResizeFilter;
