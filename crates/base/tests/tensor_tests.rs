use base::{Tensor, TensorError, Vec2};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.ndim(), 2);
    assert_eq!(tensor.len(), 6);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1u8, 2, 3]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_interleaved_to_planar() {
    // 1x2 image, 3 channels: pixel0 = (1, 2, 3), pixel1 = (4, 5, 6)
    let hwc = Tensor::new(vec![1, 2, 3], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    let chw = hwc.interleaved_to_planar().unwrap();
    assert_eq!(chw.shape, vec![3, 1, 2]);
    assert_eq!(chw.data, vec![1, 4, 2, 5, 3, 6]);

    let back = chw.planar_to_interleaved().unwrap();
    assert_eq!(back, hwc);
}

#[test]
fn test_planar_reorder_rejects_wrong_rank() {
    let flat = Tensor::new(vec![6], vec![0u8; 6]).unwrap();
    assert!(flat.interleaved_to_planar().is_err());
    assert!(flat.planar_to_interleaved().is_err());
}

#[test]
fn test_vec2_area() {
    let size = Vec2::new(640usize, 480usize);
    assert_eq!(size.area(), 307_200);
    assert_eq!(Vec2::<usize>::default().area(), 0);
    assert_eq!(format!("{:?}", Vec2::new(3, 4)), "(3, 4)");
}
