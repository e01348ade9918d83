//! Every compiled backend must agree bit for bit with the scalar backend.
//!
//! On x86_64 the SSE2 backend is always compiled, so these tests exercise
//! its emulation paths even when the build selects AVX2.

use num::{One, Zero};
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdport::prelude::*;
use simdport::simd::Scalar;

#[cfg(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2")
))]
use simdport::simd::sse2::Sse2;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx2"
))]
use simdport::simd::avx2::Avx2;

const EDGES: usize = 6;
const PAIRS: usize = EDGES * EDGES;

/// Zero, one, all-ones, sign bit only, largest positive and its successor
/// pattern, all built from raw bits.
fn edge_values<T: Element>() -> [T; EDGES] {
    let width = 8 * std::mem::size_of::<T>();
    let zero = T::Bits::zero();
    let one = T::Bits::one();
    let ones = !zero;
    let sign = one << (width - 1);

    [zero, one, ones, sign, ones >> 1, sign | one].map(T::from_bits)
}

/// Every ordered pair of edge values, as two lane arrays.
fn edge_pairs<T: Element>() -> ([T; PAIRS], [T; PAIRS]) {
    let edges = edge_values::<T>();
    (
        std::array::from_fn(|i| edges[i / EDGES]),
        std::array::from_fn(|i| edges[i % EDGES]),
    )
}

fn random_lanes<T: Element, const N: usize>(rng: &mut StdRng) -> [T; N]
where
    StandardUniform: Distribution<T>,
{
    std::array::from_fn(|_| rng.random())
}

fn compare<T, const N: usize, B>(a: [T; N], b: [T; N]) -> [Vec<bool>; 3]
where
    T: NativeLane<B>,
    B: Backend,
{
    let va = Vector::<T, N, B>::from(a);
    let vb = Vector::<T, N, B>::from(b);
    [
        cmp_eq(&va, &vb).eval().to_bools(),
        cmp_gt(&va, &vb).eval().to_bools(),
        cmp_ge(&va, &vb).eval().to_bools(),
    ]
}

fn min_max<T, const N: usize, B>(a: [T; N], b: [T; N]) -> [Vec<T::Bits>; 3]
where
    T: IntLane<B>,
    B: Backend,
{
    let va = Vector::<T, N, B>::from(a);
    let vb = Vector::<T, N, B>::from(b);
    let bits = |v: Vector<T, N, B>| -> Vec<T::Bits> { v.to_vec().into_iter().map(Element::to_bits).collect() };
    [
        bits(min(&va, &vb).eval()),
        bits(max(&va, &vb).eval()),
        bits(unmask(cmp_gt(&va, &vb)).eval()),
    ]
}

macro_rules! each_backend {
    ($check:ident, $a:expr, $b:expr) => {{
        let reference = $check::<_, PAIRS, Scalar>($a, $b);
        assert_eq!($check::<_, PAIRS, Selected>($a, $b), reference, "selected backend");

        #[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")))]
        assert_eq!($check::<_, PAIRS, Sse2>($a, $b), reference, "sse2 backend");

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"))]
        assert_eq!($check::<_, PAIRS, Avx2>($a, $b), reference, "avx2 backend");
    }};
}

macro_rules! edge_tests {
    (int: $($name:ident => $t:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let (a, b) = edge_pairs::<$t>();
                each_backend!(compare, a, b);
                each_backend!(min_max, a, b);
            }
        )*
    };
    (float: $($name:ident => $t:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let (a, b) = edge_pairs::<$t>();
                each_backend!(compare, a, b);
            }
        )*
    };
}

edge_tests! {
    int:
    test_edges_i8 => i8,
    test_edges_u8 => u8,
    test_edges_i16 => i16,
    test_edges_u16 => u16,
    test_edges_i32 => i32,
    test_edges_u32 => u32,
    test_edges_i64 => i64,
    test_edges_u64 => u64,
}

edge_tests! {
    float:
    test_edges_f32 => f32,
    test_edges_f64 => f64,
}

macro_rules! random_tests {
    ($($name:ident => $t:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let mut rng = StdRng::seed_from_u64(0xC0FFEE);

                for _ in 0..100 {
                    let a: [$t; PAIRS] = random_lanes(&mut rng);
                    let mut b: [$t; PAIRS] = random_lanes(&mut rng);
                    // copy some lanes so equality and the 64-bit low-half
                    // paths are reached
                    for i in (0..PAIRS).step_by(3) {
                        b[i] = a[i];
                    }
                    each_backend!(compare, a, b);
                    each_backend!(min_max, a, b);
                }
            }
        )*
    };
}

random_tests! {
    test_random_i8 => i8,
    test_random_u8 => u8,
    test_random_i16 => i16,
    test_random_u16 => u16,
    test_random_i32 => i32,
    test_random_u32 => u32,
    test_random_i64 => i64,
    test_random_u64 => u64,
}

#[test]
fn test_random_floats_with_nan() {
    let mut rng = StdRng::seed_from_u64(0xF10A7);

    for _ in 0..100 {
        let mut a: [f64; PAIRS] = random_lanes(&mut rng);
        let b: [f64; PAIRS] = random_lanes(&mut rng);
        a[rng.random_range(0..PAIRS)] = f64::NAN;
        a[1] = b[1];
        each_backend!(compare, a, b);

        let c: [f32; PAIRS] = a.map(|x| x as f32);
        let d: [f32; PAIRS] = b.map(|x| x as f32);
        each_backend!(compare, c, d);
    }
}

#[test]
fn test_edge_values_are_distinct() {
    let edges = edge_values::<i16>();
    assert_eq!(edges, [0, 1, -1, i16::MIN, i16::MAX, i16::MIN + 1]);
    let edges = edge_values::<u8>();
    assert_eq!(edges, [0, 1, 255, 128, 127, 129]);
}
