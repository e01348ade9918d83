//! Equality comparison through the portable API, checked against `==` on
//! plain arrays for every element type.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdport::prelude::*;
use simdport::simd::FloatElement;

#[test]
fn test_end_to_end_i32() {
    let a = Vector::<i32, 8>::from([1, -2, 3, -4, 5, -6, 7, -8]);
    let b = Vector::<i32, 8>::from([0, -2, 4, -4, 4, -6, 8, -9]);

    let eq = cmp_eq(&a, &b).eval();
    assert_eq!(
        eq.to_bools(),
        [false, true, false, true, false, true, false, false]
    );
}

macro_rules! random_eq_test {
    ($name:ident, $t:ty, $n:expr) => {
        #[test]
        fn $name() {
            let mut rng = StdRng::seed_from_u64(0xE0);

            for _ in 0..200 {
                let a: [$t; $n] = std::array::from_fn(|_| rng.random());
                // about half the lanes equal
                let b: [$t; $n] = std::array::from_fn(|i| if rng.random_bool(0.5) { a[i] } else { rng.random() });

                let got = cmp_eq(Vector::<$t, $n>::from(a), Vector::<$t, $n>::from(b)).eval();
                let expected: Vec<bool> = a.iter().zip(b.iter()).map(|(x, y)| x == y).collect();
                assert_eq!(got.to_bools(), expected, "a = {:?}, b = {:?}", a, b);
            }
        }
    };
}

random_eq_test!(test_random_eq_i8, i8, 35);
random_eq_test!(test_random_eq_u8, u8, 64);
random_eq_test!(test_random_eq_i16, i16, 9);
random_eq_test!(test_random_eq_u16, u16, 24);
random_eq_test!(test_random_eq_i32, i32, 13);
random_eq_test!(test_random_eq_u32, u32, 8);
random_eq_test!(test_random_eq_i64, i64, 7);
random_eq_test!(test_random_eq_u64, u64, 4);
random_eq_test!(test_random_eq_f32, f32, 11);
random_eq_test!(test_random_eq_f64, f64, 5);

#[test]
fn test_eq_64bit_halves_both_checked() {
    // differ only in one 32-bit half
    let a = Vector::<u64, 4>::from([0x0000_0000_FFFF_FFFF, 0x0000_0001_0000_0000, 5, u64::MAX]);
    let b = Vector::<u64, 4>::from([0x0000_0001_FFFF_FFFF, 0x0000_0001_0000_0001, 5, u64::MAX]);
    assert_eq!(cmp_eq(&a, &b).eval().to_bools(), [false, false, true, true]);
}

#[test]
fn test_eq_nan_and_signed_zero() {
    let a = Vector::<f64, 4>::from([f64::NAN, 0.0, -0.0, f64::INFINITY]);
    let b = Vector::<f64, 4>::from([f64::NAN, -0.0, 0.0, f64::INFINITY]);
    assert_eq!(cmp_eq(&a, &b).eval().to_bools(), [false, true, true, true]);
    assert_eq!(cmp_neq(&a, &b).eval().to_bools(), [true, false, false, false]);
}

#[test]
fn test_eq_self_unmasks_to_all_ones() {
    let a = Vector::<i16, 12>::from([3, -3, 0, i16::MIN, i16::MAX, 1, 2, 3, 4, 5, 6, 7]);
    let ones = unmask(cmp_eq(&a, &a)).eval();
    assert_eq!(ones.to_array(), [-1i16; 12]);

    let f = Vector::<f32, 3>::from([1.5, -0.0, f32::MAX]);
    let ones = unmask(cmp_eq(&f, &f)).eval();
    assert!(ones.to_vec().iter().all(|lane| lane.to_bits() == u32::MAX));
}

#[test]
fn test_eq_single_lane_vector() {
    let a = Vector::<u8, 1>::splat(9);
    let b = Vector::<u8, 1>::splat(9);
    let mask = cmp_eq(&a, &b).eval();
    assert!(mask.all());
    assert_eq!(mask.to_bools(), [true]);
}

/// NaN never compares equal, to itself or to anything else.
fn check_nan_unordered<T, const N: usize>()
where
    T: FloatElement + NativeLane<Selected>,
{
    let nan = Vector::<T, N>::splat(T::nan());
    let one = Vector::<T, N>::splat(T::one());

    assert!(!cmp_eq(&nan, &nan).eval().any());
    assert!(!cmp_eq(&nan, &one).eval().any());
    assert!(cmp_neq(&nan, &nan).eval().all());
    assert!(cmp_eq(&one, &one).eval().all());
}

#[test]
fn test_nan_unordered_all_float_widths() {
    check_nan_unordered::<f32, 4>();
    check_nan_unordered::<f32, 13>();
    check_nan_unordered::<f64, 2>();
    check_nan_unordered::<f64, 7>();
}

#[test]
fn test_eq_same_width_mixed_signedness() {
    let signed = Vector::<i8, 4>::from([-1, 0, i8::MIN, 5]);
    let unsigned = Vector::<u8, 4>::from([255, 1, 128, 5]);
    let eq = cmp_eq(signed.bit_cast::<u8, 4>(), &unsigned).eval();
    assert_eq!(eq.to_bools(), [true, false, true, true]);
}
