use proptest::prelude::*;

use super::*;

const TOLERANCE: Tolerance = Tolerance {
    acceptable: 0.001,
    error_threshold: 0.1,
};

#[test]
fn deviation_equal_to_acceptable_is_ok() {
    assert_eq!(classify(0.001, 1.0, &TOLERANCE), Classification::Ok);
}

#[test]
fn deviation_equal_to_error_bound_is_fixable() {
    assert_eq!(classify(0.1, 1.0, &TOLERANCE), Classification::Fixable);
}

#[test]
fn deviation_just_above_error_bound_is_error() {
    let above = 0.1 + 1e-12;
    assert_eq!(classify(above, 1.0, &TOLERANCE), Classification::Error);
}

#[test]
fn diameter_examples() {
    let expected = 0.635;
    let dev = |actual: f64| (actual - expected).abs();

    assert_eq!(classify(dev(0.66), expected, &TOLERANCE), Classification::Fixable);
    assert_eq!(classify(dev(0.58), expected, &TOLERANCE), Classification::Fixable);
    assert_eq!(classify(dev(0.40), expected, &TOLERANCE), Classification::Error);
}

#[test]
fn negative_expected_uses_magnitude() {
    assert_eq!(classify(0.05, -1.0, &TOLERANCE), Classification::Fixable);
}

#[test]
fn zero_expected_is_strict() {
    assert_eq!(classify(0.0005, 0.0, &TOLERANCE), Classification::Ok);
    assert_eq!(classify(0.001, 0.0, &TOLERANCE), Classification::Ok);
    assert_eq!(classify(0.0011, 0.0, &TOLERANCE), Classification::Error);
}

#[test]
fn zero_acceptable_makes_exact_match_the_only_ok() {
    let strict = Tolerance {
        acceptable: 0.0,
        error_threshold: 0.1,
    };
    assert_eq!(classify(0.0, 1.0, &strict), Classification::Ok);
    assert_eq!(classify(1e-9, 1.0, &strict), Classification::Fixable);
}

#[test]
fn grid_deviation_measures_nearest_line() {
    assert!((grid_deviation(1.3, 1.27) - 0.03).abs() < 1e-12);
    assert!((grid_deviation(2.5, 1.27) - 0.04).abs() < 1e-12);
    assert!(grid_deviation(2.54, 1.27) < 1e-12);
}

#[test]
fn grid_deviation_handles_negative_coordinates() {
    assert!((grid_deviation(-1.3, 1.27) - 0.03).abs() < 1e-12);
    assert!((grid_deviation(-0.05, 1.27) - 0.05).abs() < 1e-12);
}

#[test]
fn grid_midpoint_is_half_unit_away() {
    assert!((grid_deviation(0.635, 1.27) - 0.635).abs() < 1e-12);
}

#[test]
fn snap_to_grid_rounds_to_nearest_multiple() {
    assert!((snap_to_grid(1.3, 1.27) - 1.27).abs() < 1e-12);
    assert!((snap_to_grid(-1.3, 1.27) + 1.27).abs() < 1e-12);
    assert!((snap_to_grid(5.0, 1.27) - 5.08).abs() < 1e-12);
}

#[test]
fn classification_ordering_puts_error_last() {
    assert!(Classification::Ok < Classification::Fixable);
    assert!(Classification::Fixable < Classification::Error);
    assert_eq!(Classification::Fixable.to_string(), "FIXABLE");
}

proptest! {
    #[test]
    fn grid_deviation_is_symmetric_around_lines(
        k in -100i32..100,
        grid in 0.1f64..10.0,
        fraction in 0.0f64..0.5,
    ) {
        let offset = grid * fraction;
        let line = f64::from(k) * grid;
        let after = grid_deviation(line + offset, grid);
        let before = grid_deviation(line + grid - offset, grid);
        prop_assert!((after - before).abs() < 1e-9);
        prop_assert!((after - offset).abs() < 1e-9);
    }

    #[test]
    fn snapped_values_have_no_deviation(value in -1000.0f64..1000.0, grid in 0.1f64..10.0) {
        let snapped = snap_to_grid(value, grid);
        prop_assert!(grid_deviation(snapped, grid) < 1e-9);
        prop_assert!((snapped - value).abs() <= grid / 2.0 + 1e-9);
    }
}
