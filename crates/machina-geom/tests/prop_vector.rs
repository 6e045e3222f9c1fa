use machina_geom::{BlockLocation, BlockRotation, BlockVector, rotate};
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn bounded_i32() -> impl Strategy<Value = i32> {
    -1_000_000i32..=1_000_000
}

fn arb_vector() -> impl Strategy<Value = BlockVector> {
    (bounded_i32(), bounded_i32(), bounded_i32())
        .prop_map(|(dx, dy, dz)| BlockVector::new(dx, dy, dz))
}

fn arb_rotation() -> impl Strategy<Value = BlockRotation> {
    (0usize..4).prop_map(BlockRotation::from_index)
}

proptest! {
    // North is the reference frame: rotating by it changes nothing.
    #[test]
    fn north_is_identity(v in arb_vector()) {
        prop_assert_eq!(rotate(v, BlockRotation::North), v);
    }

    // Four applications of any fixed rotation return the original vector exactly.
    #[test]
    fn four_fold_identity(v in arb_vector(), r in arb_rotation()) {
        let back = rotate(rotate(rotate(rotate(v, r), r), r), r);
        prop_assert_eq!(back, v);
    }

    // Rotating by a then b equals rotating by their combined step.
    #[test]
    fn composition_closure(v in arb_vector(), a in arb_rotation(), b in arb_rotation()) {
        prop_assert_eq!(rotate(rotate(v, a), b), rotate(v, a.compose(b)));
    }

    #[test]
    fn composition_associative(a in arb_rotation(), b in arb_rotation(), c in arb_rotation()) {
        prop_assert_eq!(a.compose(b).compose(c), a.compose(b.compose(c)));
    }

    // Height is never affected by a yaw rotation.
    #[test]
    fn rotation_preserves_y(v in arb_vector(), r in arb_rotation()) {
        prop_assert_eq!(rotate(v, r).dy, v.dy);
    }

    // Rotation commutes with vector addition.
    #[test]
    fn rotation_is_linear(a in arb_vector(), b in arb_vector(), r in arb_rotation()) {
        prop_assert_eq!(rotate(a + b, r), rotate(a, r) + rotate(b, r));
    }

    #[test]
    fn relative_then_offset_to(x in bounded_i32(), y in bounded_i32(), z in bounded_i32(), v in arb_vector()) {
        let anchor = BlockLocation::new(x, y, z);
        prop_assert_eq!(anchor.offset_to(anchor.relative(v)), v);
    }
}
