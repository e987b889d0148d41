use grab_image::{Image, ImageError, decode_image, load_image};
use std::{fmt, path::Path};

/// How an environment should present its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Return the frame as an HWC pixel array.
    RgbArray,
    /// Present the frame to a viewer, e.g. a window.
    Human,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::RgbArray => write!(f, "rgb_array"),
            RenderMode::Human => write!(f, "human"),
        }
    }
}

/// A simulated system with a renderable visual state.
///
/// Rendering may have side effects owned by the environment (opening a
/// display, advancing an internal frame counter). Whether concurrent renders
/// are allowed is up to the implementation; capture borrows it mutably.
pub trait Environment {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render the current state. In [`RenderMode::RgbArray`] the result is
    /// `[height, width, channels]`.
    fn render(&mut self, mode: RenderMode) -> Result<Image, Self::Error>;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    type Error = E::Error;

    fn render(&mut self, mode: RenderMode) -> Result<Image, Self::Error> {
        (**self).render(mode)
    }
}

#[derive(Debug)]
pub enum EnvironmentError {
    Closed,
    UnsupportedMode(RenderMode),
    Image(ImageError),
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentError::Closed => write!(f, "environment is closed"),
            EnvironmentError::UnsupportedMode(mode) => {
                write!(f, "render mode {mode} is not supported")
            }
            EnvironmentError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for EnvironmentError {}

impl From<ImageError> for EnvironmentError {
    fn from(err: ImageError) -> Self {
        EnvironmentError::Image(err)
    }
}

/// An environment whose state is a single still image.
///
/// Renders are deterministic: every `RgbArray` render returns the same pixels
/// until the environment is closed.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    frame: Option<Image>,
    renders: usize,
}

impl StaticEnvironment {
    pub fn new(frame: Image) -> Self {
        Self {
            frame: Some(frame),
            renders: 0,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, EnvironmentError> {
        Ok(Self::new(decode_image(data)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EnvironmentError> {
        Ok(Self::new(load_image(path)?))
    }

    /// Dispose of the frame. Later renders fail with [`EnvironmentError::Closed`].
    pub fn close(&mut self) {
        self.frame = None;
    }

    pub fn is_closed(&self) -> bool {
        self.frame.is_none()
    }

    /// Number of successful renders so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Environment for StaticEnvironment {
    type Error = EnvironmentError;

    fn render(&mut self, mode: RenderMode) -> Result<Image, Self::Error> {
        let frame = self.frame.as_ref().ok_or(EnvironmentError::Closed)?;
        match mode {
            RenderMode::RgbArray => {
                self.renders += 1;
                Ok(frame.clone())
            }
            RenderMode::Human => Err(EnvironmentError::UnsupportedMode(mode)),
        }
    }
}
