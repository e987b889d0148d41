use grab_base::Tensor;

/// A rendered or decoded pixel array in HWC layout, at its native precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    U8(Tensor<u8>),
    U16(Tensor<u16>),
    F32(Tensor<f32>),
}

impl Image {
    pub fn shape(&self) -> &[usize] {
        match self {
            Image::U8(t) => &t.shape,
            Image::U16(t) => &t.shape,
            Image::F32(t) => &t.shape,
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.shape()[2]
    }

    /// Floating-point intensities.
    ///
    /// Integer pixels are scaled by their type's maximum (u8 by 255, u16 by 65535).
    /// Float pixels are passed through untouched, out-of-range values included.
    pub fn to_f32(&self) -> Tensor<f32> {
        match self {
            Image::U8(t) => t.map(|&v| v as f32 / u8::MAX as f32),
            Image::U16(t) => t.map(|&v| v as f32 / u16::MAX as f32),
            Image::F32(t) => t.clone(),
        }
    }
}
