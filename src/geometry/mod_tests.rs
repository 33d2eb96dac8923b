use super::*;

#[test]
fn rect_center_is_midpoint() {
    let rect = RectGeometry {
        x: 1.0,
        y: 2.0,
        width: 4.0,
        height: 2.0,
    };
    assert_eq!(rect.center(), Point::new(3.0, 3.0));
}

#[test]
fn arc_diameters_double_radii() {
    let arc = ArcGeometry {
        center_x: 0.0,
        center_y: 0.0,
        radius_x: 0.3175,
        radius_y: 0.5,
        start_angle: 0.0,
        end_angle: std::f64::consts::TAU,
    };
    assert!((arc.diameter_x() - 0.635).abs() < 1e-12);
    assert!((arc.diameter_y() - 1.0).abs() < 1e-12);
}

#[test]
fn geometry_reports_its_kind() {
    let path = ShapeGeometry::Path(PathGeometry {
        start: Point::new(0.0, 0.0),
        end: Point::new(1.0, 0.0),
    });
    assert_eq!(path.kind(), ShapeKind::Path);
}

#[test]
fn format_number_strips_float_noise() {
    let noisy: f64 = "3.8100000000000005".parse().unwrap();
    assert_eq!(format_number(noisy), "3.81");
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number(1.27), "1.27");
    assert_eq!(format_number(-2.54), "-2.54");
}

#[test]
fn format_number_prints_integers_without_fraction() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(-1e-12), "0");
}

#[test]
fn format_number_keeps_large_values() {
    assert_eq!(format_number(123_456.5), "123456.5");
}
