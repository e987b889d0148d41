use grab_base::Tensor;
use grab_image::{ImageError, ResizeFilter, resize};

fn checkerboard(size: usize) -> Tensor<f32> {
    let data = (0..size * size)
        .map(|i| ((i / size + i % size) % 2) as f32)
        .collect();
    Tensor::new(vec![size, size, 1], data).unwrap()
}

#[test]
fn test_resize_output_shape() {
    let frame = Tensor::zeros(vec![400, 600, 3]).unwrap();
    let resized = resize(&frame, 80, 80, ResizeFilter::Bilinear).unwrap();
    assert_eq!(resized.shape, vec![80, 80, 3]);
}

#[test]
fn test_resize_non_square_target() {
    let frame = Tensor::zeros(vec![10, 10, 4]).unwrap();
    let resized = resize(&frame, 3, 17, ResizeFilter::Nearest).unwrap();
    assert_eq!(resized.shape, vec![3, 17, 4]);
}

#[test]
fn test_resize_checkerboard_aliases_instead_of_blurring() {
    // 6 -> 2 maps output centers exactly onto source pixels 1 and 4.
    // An anti-aliased resize would pull every value toward 0.5.
    let resized = resize(&checkerboard(6), 2, 2, ResizeFilter::Bilinear).unwrap();
    assert_eq!(resized.data, vec![0.0, 1.0, 1.0, 0.0]);
}

#[test]
fn test_resize_checkerboard_keeps_full_contrast() {
    let resized = resize(&checkerboard(12), 4, 4, ResizeFilter::Bilinear).unwrap();
    let min = resized.data.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = resized.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert_eq!((min, max), (0.0, 1.0));
}

#[test]
fn test_resize_bilinear_upsample_mirrors_edges() {
    let frame = Tensor::new(vec![1, 2, 1], vec![0.0, 1.0]).unwrap();
    let resized = resize(&frame, 1, 4, ResizeFilter::Bilinear).unwrap();
    assert_eq!(resized.data, vec![0.25, 0.25, 0.75, 0.75]);
}

#[test]
fn test_resize_nearest_upsample_duplicates() {
    let frame = Tensor::new(vec![1, 2, 1], vec![3.0, 7.0]).unwrap();
    let resized = resize(&frame, 1, 4, ResizeFilter::Nearest).unwrap();
    assert_eq!(resized.data, vec![3.0, 3.0, 7.0, 7.0]);
}

#[test]
fn test_resize_identity_size_is_exact() {
    let data: Vec<f32> = (0..5 * 3 * 3).map(|v| v as f32 * 1.5).collect();
    let frame = Tensor::new(vec![5, 3, 3], data.clone()).unwrap();
    let resized = resize(&frame, 5, 3, ResizeFilter::Bilinear).unwrap();
    assert_eq!(resized.data, data);
}

#[test]
fn test_resize_does_not_mix_channels() {
    let data = [10.0, 20.0, 30.0].repeat(8 * 8);
    let frame = Tensor::new(vec![8, 8, 3], data).unwrap();
    let resized = resize(&frame, 3, 5, ResizeFilter::Bilinear).unwrap();
    for pixel in resized.data.chunks(3) {
        assert_eq!(pixel, &[10.0, 20.0, 30.0]);
    }
}

#[test]
fn test_resize_values_not_clamped() {
    let frame = Tensor::new(vec![1, 1, 1], vec![512.0]).unwrap();
    let resized = resize(&frame, 2, 2, ResizeFilter::Bilinear).unwrap();
    assert_eq!(resized.data, vec![512.0; 4]);
}

#[test]
fn test_resize_zero_height_fails() {
    let frame = Tensor::zeros(vec![4, 4, 3]).unwrap();
    let result = resize(&frame, 0, 80, ResizeFilter::Bilinear);
    assert!(matches!(result, Err(ImageError::Resize(_))));
}

#[test]
fn test_resize_zero_width_fails() {
    let frame = Tensor::zeros(vec![4, 4, 3]).unwrap();
    let err = resize(&frame, 80, 0, ResizeFilter::Nearest).unwrap_err();
    assert!(err.to_string().contains("non-zero"));
}

#[test]
fn test_resize_rejects_wrong_rank() {
    let frame = Tensor::zeros(vec![4, 4]).unwrap();
    let result = resize(&frame, 2, 2, ResizeFilter::Bilinear);
    assert!(matches!(result, Err(ImageError::Resize(_))));
}

#[test]
fn test_resize_rejects_empty_source() {
    let frame = Tensor::zeros(vec![0, 4, 3]).unwrap();
    let result = resize(&frame, 2, 2, ResizeFilter::Bilinear);
    assert!(matches!(result, Err(ImageError::Resize(_))));
}

#[test]
fn test_resize_filter_parse_and_serde() {
    assert_eq!("Nearest".parse::<ResizeFilter>().unwrap(), ResizeFilter::Nearest);
    assert!("lanczos".parse::<ResizeFilter>().is_err());
    assert_eq!(ResizeFilter::default(), ResizeFilter::Bilinear);

    let filter: ResizeFilter = serde_json::from_str("\"bilinear\"").unwrap();
    assert_eq!(filter, ResizeFilter::Bilinear);
    assert_eq!(serde_json::to_string(&ResizeFilter::Nearest).unwrap(), "\"nearest\"");
}
