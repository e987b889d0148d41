use crate::{CaptureConfig, CaptureError, DeviceSpec, Environment, RenderMode};
use candle_core::{Device, Tensor as CanTensor};
use grab_base::Tensor;
use grab_image::{ResizeFilter, resize};

pub const DEFAULT_HEIGHT: usize = 80;
pub const DEFAULT_WIDTH: usize = 80;

/// Turn a resized HWC frame into a `(1, channels, width, height)` tensor on `device`.
///
/// The axes are permuted `(2, 1, 0)`, so width comes before height. Downstream
/// models that expect NCHW must transpose the last two axes themselves.
pub fn frame_to_tensor(frame: Tensor<f32>, device: &Device) -> Result<CanTensor, CaptureError> {
    let (h, w, c) = frame
        .dims3()
        .map_err(|e| CaptureError::Tensor(format!("expected HWC frame: {e}")))?;

    let tensor = CanTensor::from_vec(frame.data, (h, w, c), &Device::Cpu)?;

    // HWC -> CWH
    let tensor = tensor.permute((2, 1, 0))?;

    // [c, w, h] -> [1, c, w, h]
    let tensor = tensor.unsqueeze(0)?.contiguous()?;

    tensor
        .to_device(device)
        .map_err(|e| CaptureError::Device(format!("cannot place tensor on {}: {e}", DeviceSpec::of(device))))
}

/// Capture the current frame of `env` with an explicit resize filter.
pub fn capture_with<E: Environment>(
    env: &mut E,
    device: &Device,
    height: usize,
    width: usize,
    filter: ResizeFilter,
) -> Result<CanTensor, CaptureError> {
    let image = env
        .render(RenderMode::RgbArray)
        .map_err(|e| CaptureError::Render(Box::new(e)))?;
    log::debug!("rendered frame {:?}", image.shape());

    let frame = resize(&image.to_f32(), height, width, filter)?;
    log::debug!("resized to {}x{} ({})", height, width, filter);

    let tensor = frame_to_tensor(frame, device)?;
    log::debug!("placed {:?} on {}", tensor.dims(), DeviceSpec::of(device));
    Ok(tensor)
}

/// Capture the current frame of `env` as a `(1, channels, width, height)` tensor on `device`.
///
/// The render is resized to exactly `height` x `width` with bilinear sampling
/// and no anti-aliasing. Integer pixels are scaled into `[0, 1]`, float pixels
/// are kept as rendered.
///
/// # Errors
///
/// - `CaptureError::Render` wraps the environment's own error, unchanged.
/// - `CaptureError::Resize` if `height` or `width` is zero or the render is not HWC.
/// - `CaptureError::Device` if the tensor cannot be moved to `device`.
pub fn capture<E: Environment>(
    env: &mut E,
    device: &Device,
    height: usize,
    width: usize,
) -> Result<CanTensor, CaptureError> {
    capture_with(env, device, height, width, ResizeFilter::Bilinear)
}

/// [`capture`] at the default 80x80 size.
pub fn capture_default<E: Environment>(env: &mut E, device: &Device) -> Result<CanTensor, CaptureError> {
    capture(env, device, DEFAULT_HEIGHT, DEFAULT_WIDTH)
}

/// A configured capture bound to an open device.
#[derive(Debug, Clone)]
pub struct ScreenCapture {
    device: Device,
    config: CaptureConfig,
}

impl ScreenCapture {
    /// Validate `config` and open its device.
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        let device = config.device.create()?;
        log::info!(
            "screen capture: {}x{} {} on {}",
            config.height,
            config.width,
            config.filter,
            config.device
        );
        Ok(Self { device, config })
    }

    /// Use an already opened device; `config.device` is replaced by its spec.
    pub fn from_device(device: Device, mut config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        config.device = DeviceSpec::of(&device);
        Ok(Self { device, config })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn capture<E: Environment>(&self, env: &mut E) -> Result<CanTensor, CaptureError> {
        capture_with(
            env,
            &self.device,
            self.config.height,
            self.config.width,
            self.config.filter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_tensor_swaps_height_and_width() {
        let frame = Tensor::new(vec![2, 5, 3], vec![0.0f32; 30]).unwrap();
        let tensor = frame_to_tensor(frame, &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 3, 5, 2]);
    }

    #[test]
    fn test_frame_to_tensor_moves_values_not_resamples() {
        // h=2, w=2, c=2: value encodes (y, x, c) as 100y + 10x + c
        let data = vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0];
        let frame = Tensor::new(vec![2, 2, 2], data).unwrap();
        let tensor = frame_to_tensor(frame, &Device::Cpu).unwrap();

        let values: Vec<Vec<Vec<f32>>> = tensor.squeeze(0).unwrap().to_vec3().unwrap();
        for (c, plane) in values.iter().enumerate() {
            for (x, column) in plane.iter().enumerate() {
                for (y, &v) in column.iter().enumerate() {
                    assert_eq!(v, (100 * y + 10 * x + c) as f32);
                }
            }
        }
    }

    #[test]
    fn test_frame_to_tensor_rejects_wrong_rank() {
        let frame = Tensor::new(vec![4, 4], vec![0.0f32; 16]).unwrap();
        assert!(matches!(
            frame_to_tensor(frame, &Device::Cpu),
            Err(CaptureError::Tensor(_))
        ));
    }

    #[test]
    fn test_screen_capture_rejects_zero_size() {
        let config = CaptureConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(ScreenCapture::new(config), Err(CaptureError::Config(_))));
    }

    #[test]
    fn test_from_device_records_device() {
        let config = CaptureConfig {
            device: DeviceSpec::Cuda { ordinal: 4 },
            ..Default::default()
        };
        let capture = ScreenCapture::from_device(Device::Cpu, config).unwrap();
        assert_eq!(capture.config().device, DeviceSpec::Cpu);
        assert!(capture.device().is_cpu());
    }
}
