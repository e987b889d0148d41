use crate::{CaptureError, DEFAULT_HEIGHT, DEFAULT_WIDTH, DeviceSpec};
use grab_image::ResizeFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capture settings. Every field is optional in JSON and falls back to its default.
///
/// ```json
/// { "height": 84, "width": 84, "filter": "nearest", "device": "cuda:0" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    pub height: usize,
    pub width: usize,
    pub filter: ResizeFilter,
    pub device: DeviceSpec,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            filter: ResizeFilter::Bilinear,
            device: DeviceSpec::Cpu,
        }
    }
}

impl CaptureConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CaptureError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CaptureError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.height == 0 || self.width == 0 {
            return Err(CaptureError::Config(format!(
                "capture size must be non-zero, got {}x{}",
                self.height, self.width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!((config.height, config.width), (80, 80));
        assert_eq!(config.filter, ResizeFilter::Bilinear);
        assert_eq!(config.device, DeviceSpec::Cpu);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        assert_eq!(CaptureConfig::from_json_str("{}").unwrap(), CaptureConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            CaptureConfig::from_json_str(r#"{"width": 120, "device": "cuda:1", "filter": "nearest"}"#)
                .unwrap();
        assert_eq!(config.height, 80);
        assert_eq!(config.width, 120);
        assert_eq!(config.filter, ResizeFilter::Nearest);
        assert_eq!(config.device, DeviceSpec::Cuda { ordinal: 1 });
    }

    #[test]
    fn test_rejects_zero_size() {
        let result = CaptureConfig::from_json_str(r#"{"height": 0}"#);
        assert!(matches!(result, Err(CaptureError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_device_and_fields() {
        assert!(CaptureConfig::from_json_str(r#"{"device": "tpu"}"#).is_err());
        assert!(CaptureConfig::from_json_str(r#"{"channels": 3}"#).is_err());
    }

    #[test]
    fn test_serializes_device_as_string() {
        let json = serde_json::to_string(&CaptureConfig::default()).unwrap();
        assert!(json.contains(r#""device":"cpu""#));
        assert!(json.contains(r#""filter":"bilinear""#));
    }

    #[test]
    fn test_missing_file() {
        let result = CaptureConfig::from_file("/nonexistent/grab.json");
        assert!(matches!(result, Err(CaptureError::Config(_))));
    }
}
