use simdport::simd::{SimdCompare, SimdMinMax};
use simdport::PARALLEL_SIMD_THRESHOLD;

#[test]
fn test_parallel_eq_small_array() {
    let a = vec![1i32, -2, 3, -4];
    let b = vec![1i32, 2, 3, 4];
    let result = a.as_slice().par_simd_eq(b.as_slice()).unwrap();
    assert_eq!(result, [true, false, true, false]);
}

#[test]
fn test_parallel_gt_large_array() {
    let size = PARALLEL_SIMD_THRESHOLD * 2 + 13;
    let a: Vec<u32> = (0..size as u32).collect();
    let b: Vec<u32> = (0..size as u32).map(|i| u32::MAX - i).collect();

    let result = a.as_slice().par_simd_gt(b.as_slice()).unwrap();
    assert_eq!(result.len(), size);

    for (i, &gt) in result.iter().enumerate() {
        assert_eq!(gt, a[i] > b[i], "par_simd_gt large array failed at index {}", i);
    }
}

#[test]
fn test_parallel_min_max_large_array() {
    let size = PARALLEL_SIMD_THRESHOLD + 1_001;
    let a: Vec<i64> = (0..size as i64).map(|i| if i % 2 == 0 { i } else { -i }).collect();
    let b: Vec<i64> = (0..size as i64).map(|i| (size as i64 / 2) - i).collect();

    let lo = a.as_slice().par_simd_min(b.as_slice()).unwrap();
    let hi = a.as_slice().par_simd_max(b.as_slice()).unwrap();

    assert_eq!(lo, a.as_slice().scalar_min(b.as_slice()).unwrap());
    assert_eq!(hi, a.as_slice().scalar_max(b.as_slice()).unwrap());
}

#[test]
fn test_all_three_paths_agree() {
    let size = PARALLEL_SIMD_THRESHOLD + 77;
    let a: Vec<i8> = (0..size).map(|i| (i % 251) as i8).collect();
    let b: Vec<i8> = (0..size).map(|i| (i % 127) as i8).collect();

    let scalar = a.as_slice().scalar_eq(b.as_slice()).unwrap();
    assert_eq!(a.as_slice().simd_eq(b.as_slice()).unwrap(), scalar);
    assert_eq!(a.as_slice().par_simd_eq(b.as_slice()).unwrap(), scalar);

    let scalar = a.as_slice().scalar_max(b.as_slice()).unwrap();
    assert_eq!(a.as_slice().simd_max(b.as_slice()).unwrap(), scalar);
    assert_eq!(a.as_slice().par_simd_max(b.as_slice()).unwrap(), scalar);
}

#[test]
fn test_parallel_float_nan() {
    let size = PARALLEL_SIMD_THRESHOLD + 5;
    let mut a = vec![1.0f32; size];
    let b = vec![1.0f32; size];
    a[size - 1] = f32::NAN;
    a[0] = f32::NAN;

    let eq = a.as_slice().par_simd_eq(b.as_slice()).unwrap();
    assert!(!eq[0]);
    assert!(!eq[size - 1]);
    assert_eq!(eq.iter().filter(|&&lane| lane).count(), size - 2);
}

#[test]
fn test_parallel_rejects_mismatched_lengths() {
    let a = vec![0u16; PARALLEL_SIMD_THRESHOLD + 10];
    let b = vec![0u16; PARALLEL_SIMD_THRESHOLD + 11];
    assert!(a.as_slice().par_simd_min(b.as_slice()).is_err());
    assert!(a.as_slice().par_simd_eq(b.as_slice()).is_err());
}
