//! Expression evaluation: idempotence, lane independence and composition.

use proptest::prelude::*;
use simdport::prelude::*;

proptest! {
    // Changing one lane of an input changes at most that lane of the result.
    #[test]
    fn prop_lane_independence_min(
        a in prop::array::uniform16(any::<i32>()),
        b in prop::array::uniform16(any::<i32>()),
        index in 0usize..16,
        replacement in any::<i32>(),
    ) {
        let before = min(Vector::<i32, 16>::from(a), Vector::<i32, 16>::from(b)).eval().to_array();

        let mut changed = a;
        changed[index] = replacement;
        let after = min(Vector::<i32, 16>::from(changed), Vector::<i32, 16>::from(b)).eval().to_array();

        for lane in 0..16 {
            if lane != index {
                prop_assert_eq!(before[lane], after[lane]);
            }
        }
        prop_assert_eq!(after[index], replacement.min(b[index]));
    }

    #[test]
    fn prop_lane_independence_gt_u64(
        a in prop::array::uniform5(any::<u64>()),
        b in prop::array::uniform5(any::<u64>()),
        index in 0usize..5,
        replacement in any::<u64>(),
    ) {
        let before = cmp_gt(Vector::<u64, 5>::from(a), Vector::<u64, 5>::from(b)).eval().to_bools();

        let mut changed = a;
        changed[index] = replacement;
        let after = cmp_gt(Vector::<u64, 5>::from(changed), Vector::<u64, 5>::from(b)).eval().to_bools();

        for lane in 0..5 {
            if lane != index {
                prop_assert_eq!(before[lane], after[lane]);
            }
        }
        prop_assert_eq!(after[index], replacement > b[index]);
    }

    #[test]
    fn prop_eval_is_idempotent(a in prop::array::uniform12(any::<i16>()), b in prop::array::uniform12(any::<i16>())) {
        let va = Vector::<i16, 12>::from(a);
        let vb = Vector::<i16, 12>::from(b);

        let once = max(&va, &vb).eval();
        let twice = once.eval();
        prop_assert_eq!(&once, &twice);

        let mask = cmp_eq(&va, &vb).eval();
        prop_assert_eq!(mask.eval(), mask);
    }

    #[test]
    fn prop_mask_round_trip(a in prop::array::uniform7(any::<i64>())) {
        let va = Vector::<i64, 7>::from(a);
        prop_assert_eq!(unmask(cmp_eq(&va, &va)).eval().to_array(), [-1i64; 7]);
    }

    #[test]
    fn prop_ge_is_gt_or_eq(a in prop::array::uniform9(any::<u8>()), b in prop::array::uniform9(any::<u8>())) {
        let va = Vector::<u8, 9>::from(a);
        let vb = Vector::<u8, 9>::from(b);

        let ge = cmp_ge(&va, &vb).eval();
        let gt_or_eq = cmp_gt(&va, &vb).eval().or(&cmp_eq(&va, &vb).eval());
        prop_assert_eq!(ge, gt_or_eq);
    }
}

#[test]
fn test_expressions_accept_values_refs_and_nodes() {
    let a = Vector::<u32, 6>::from([1, 2, 3, 4, 5, 6]);
    let b = Vector::<u32, 6>::splat(3);

    let by_value = min(a.clone(), b.clone()).eval();
    let by_ref = min(&a, &b).eval();
    let nested = min(min(&a, &b), &b).eval();

    assert_eq!(by_value, by_ref);
    assert_eq!(nested, by_ref);
}

#[test]
fn test_clamp_composition() {
    // clamp(x, lo, hi) = min(max(x, lo), hi)
    let x = Vector::<i8, 20>::from(std::array::from_fn(|i| (i as i16 * 7 - 60) as i8));
    let lo = Vector::<i8, 20>::splat(-10);
    let hi = Vector::<i8, 20>::splat(25);

    let clamped = min(max(&x, &lo), &hi).eval();
    for (lane, value) in clamped.to_vec().into_iter().enumerate() {
        assert_eq!(value, ((lane as i16 * 7 - 60) as i8).clamp(-10, 25));
    }
}

#[test]
fn test_float_select_with_integer_mask() {
    let bits = Vector::<i32, 4>::from([1, -1, 2, -2]);
    let keep = cmp_gt(&bits, Vector::<i32, 4>::zero()).eval().bit_cast::<f32, 4>();

    let on = Vector::<f32, 4>::from([1.0, 2.0, 3.0, 4.0]);
    let off = Vector::<f32, 4>::splat(0.0);
    assert_eq!(blend(&on, &off, &keep).eval().to_array(), [1.0, 0.0, 3.0, 0.0]);
}

#[test]
fn test_mask_logic_in_expressions() {
    let a = Vector::<i16, 10>::from([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let in_range = cmp_ge(&a, Vector::splat(3))
        .eval()
        .and(&cmp_lt(&a, Vector::splat(7)).eval());

    assert_eq!(
        in_range.to_bools(),
        [false, false, false, true, true, true, true, false, false, false]
    );
    assert!(in_range.any());
    assert!(!in_range.all());
    assert_eq!(unmask(in_range.not()).eval().lane(0), -1);
}
