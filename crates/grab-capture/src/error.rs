use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// The environment failed to render; the original error is kept as the source.
    Render(Box<dyn std::error::Error + Send + Sync>),
    Resize(grab_image::ImageError),
    Tensor(String),
    Device(String),
    Config(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Render(err) => write!(f, "render error: {err}"),
            CaptureError::Resize(err) => write!(f, "resize error: {err}"),
            CaptureError::Tensor(msg) => write!(f, "tensor error: {msg}"),
            CaptureError::Device(msg) => write!(f, "device error: {msg}"),
            CaptureError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Render(err) => Some(err.as_ref()),
            CaptureError::Resize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<grab_image::ImageError> for CaptureError {
    fn from(err: grab_image::ImageError) -> Self {
        CaptureError::Resize(err)
    }
}

impl From<candle_core::Error> for CaptureError {
    fn from(err: candle_core::Error) -> Self {
        CaptureError::Tensor(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Config(err.to_string())
    }
}
