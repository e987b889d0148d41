use crate::CaptureError;
use candle_core::{Device, DeviceLocation};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where a captured tensor should live, e.g. `cpu` or `cuda:1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceSpec {
    #[default]
    Cpu,
    Cuda {
        ordinal: usize,
    },
    Metal {
        ordinal: usize,
    },
}

impl DeviceSpec {
    /// Open the candle device.
    ///
    /// CUDA and Metal devices need the `cuda` / `metal` features; without them
    /// candle reports the backend as unavailable.
    pub fn create(&self) -> Result<Device, CaptureError> {
        let device = match self {
            DeviceSpec::Cpu => Ok(Device::Cpu),
            DeviceSpec::Cuda { ordinal } => Device::new_cuda(*ordinal),
            DeviceSpec::Metal { ordinal } => Device::new_metal(*ordinal),
        };
        device.map_err(|e| CaptureError::Device(format!("cannot open {self}: {e}")))
    }

    /// The spec describing an already opened device.
    pub fn of(device: &Device) -> Self {
        match device.location() {
            DeviceLocation::Cpu => DeviceSpec::Cpu,
            DeviceLocation::Cuda { gpu_id } => DeviceSpec::Cuda { ordinal: gpu_id },
            DeviceLocation::Metal { gpu_id } => DeviceSpec::Metal { ordinal: gpu_id },
        }
    }
}

impl fmt::Display for DeviceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSpec::Cpu => write!(f, "cpu"),
            DeviceSpec::Cuda { ordinal } => write!(f, "cuda:{ordinal}"),
            DeviceSpec::Metal { ordinal } => write!(f, "metal:{ordinal}"),
        }
    }
}

impl FromStr for DeviceSpec {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (kind, ordinal) = match lower.split_once(':') {
            Some((kind, ordinal)) => {
                let ordinal = ordinal
                    .parse::<usize>()
                    .map_err(|_| CaptureError::Device(format!("invalid device ordinal in '{s}'")))?;
                (kind, ordinal)
            }
            None => (lower.as_str(), 0),
        };
        match kind {
            "cpu" if !lower.contains(':') => Ok(DeviceSpec::Cpu),
            "cuda" => Ok(DeviceSpec::Cuda { ordinal }),
            "metal" => Ok(DeviceSpec::Metal { ordinal }),
            _ => Err(CaptureError::Device(format!("unknown device '{s}'"))),
        }
    }
}

impl TryFrom<String> for DeviceSpec {
    type Error = CaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceSpec> for String {
    fn from(spec: DeviceSpec) -> Self {
        spec.to_string()
    }
}
