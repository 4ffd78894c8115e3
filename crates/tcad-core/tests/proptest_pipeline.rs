//! Property-based tests for unit math, prompt parsing and tessellation.
//!
//! Run with: cargo test -p tcad-core --test proptest_pipeline

use std::collections::HashMap;

use glam::DVec3;
use proptest::prelude::*;
use tcad_core::{
    ErrorKind, IdGenerator, Mesh, Primitive, Shape, TessellationConfig, Unit, generate_box_mesh,
    generate_cylinder_mesh_with_segments, generate_sphere_mesh_with_segments, parse_command,
    tessellate, to_millimeters,
};

const TOLERANCE: f64 = 1e-6;

// =============================================================================
// Helpers
// =============================================================================

/// Every directed edge used once, and its reverse used once
fn is_closed(mesh: &Mesh) -> bool {
    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for t in &mesh.triangles {
        for edge in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            *edges.entry(edge).or_default() += 1;
        }
    }
    edges
        .iter()
        .all(|(&(a, b), &count)| a != b && count == 1 && edges.get(&(b, a)) == Some(&1))
}

fn assert_bounds(mesh: &Mesh, expected_size: DVec3) {
    let bounds = mesh.bounds().unwrap();
    let size = bounds.size();
    for axis in 0..3 {
        assert!(
            (size[axis] - expected_size[axis]).abs() < TOLERANCE,
            "axis {axis}: {} vs {}",
            size[axis],
            expected_size[axis]
        );
        assert!(bounds.center()[axis].abs() < TOLERANCE);
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_dimension() -> impl Strategy<Value = f64> {
    0.01..1000.0f64
}

fn arb_unit_token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["mm", "cm", "in", "inch", "inches", "MM", "Cm", "Inch"])
}

/// Decimal text the grammar accepts: `12`, `3.25`, `.5`
fn arb_number_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..5000).prop_map(|n| n.to_string()),
        (0u32..500, 1u32..100).prop_map(|(i, f)| format!("{i}.{f:02}")),
        (1u32..100).prop_map(|f| format!(".{f:02}")),
    ]
}

fn arb_sentence() -> impl Strategy<Value = String> {
    let n = arb_number_text;
    let u = || prop::sample::select(vec!["mm", "cm", "in", "inch", "inches"]);
    prop_oneof![
        (n(), n(), n(), u()).prop_map(|(a, b, c, unit)| format!("{a} x {b} x {c} {unit} box")),
        (n(), u(), n(), u(), n(), u())
            .prop_map(|(a, au, b, bu, c, cu)| format!("box {a}{au} by {b}{bu} by {c}{cu}")),
        (n(), u()).prop_map(|(s, unit)| format!("cube {s}{unit}")),
        (n(), u()).prop_map(|(s, unit)| format!("{s} {unit} cube")),
        (n(), n()).prop_map(|(r, h)| format!("cylinder radius {r} height {h}mm")),
        (n(), u()).prop_map(|(r, unit)| format!("sphere radius {r} {unit}")),
    ]
}

fn arb_keyword() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["box", "cube", "cylinder", "sphere"])
}

// =============================================================================
// Units
// =============================================================================

proptest! {
    #[test]
    fn unit_round_trip(value in 1e-3..3.9e4f64) {
        for unit in Unit::ALL {
            let mm = unit.to_millimeters(value).unwrap();
            let back = mm / unit.factor();
            prop_assert!(((back - value) / value).abs() <= 1e-9);
        }
    }

    #[test]
    fn unit_tokens_are_case_insensitive(value in 0.001..1e4f64, token in arb_unit_token()) {
        let lower = to_millimeters(value, &token.to_lowercase()).unwrap();
        prop_assert_eq!(to_millimeters(value, token).unwrap(), lower);
    }

    #[test]
    fn out_of_range_values_are_rejected(value in 1e6..1e300f64, token in arb_unit_token()) {
        let err = to_millimeters(value * 1.01, token).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidDimension);
        let err = to_millimeters(1.0 / value, token).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    }

    #[test]
    fn non_positive_values_are_rejected(value in -1e9..=0.0f64, token in arb_unit_token()) {
        let err = to_millimeters(value, token).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    }
}

// =============================================================================
// Grammar
// =============================================================================

proptest! {
    #[test]
    fn supported_sentences_parse_deterministically(sentence in arb_sentence(), start in 1u64..1000) {
        let ids = IdGenerator::starting_at(start);
        let (mut a, mut b) = (ids, ids);
        let first = parse_command(&sentence, &mut a).unwrap();
        let second = parse_command(&sentence, &mut b).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.peek(), start + 1);
    }

    #[test]
    fn verbs_do_not_change_the_primitive(sentence in arb_sentence()) {
        let bare = parse_command(&sentence, &mut IdGenerator::new()).unwrap();
        let create = parse_command(&format!("create {sentence}"), &mut IdGenerator::new()).unwrap();
        prop_assert_eq!(bare, create);
    }

    #[test]
    fn keyword_lines_are_never_ignored(keyword in arb_keyword(), rest in "[a-z0-9 .x-]{0,24}") {
        let line = format!("{keyword} {rest}");
        if let Err(err) = parse_command(&line, &mut IdGenerator::new()) {
            prop_assert!(
                matches!(
                    err.kind(),
                    ErrorKind::MissingDimension | ErrorKind::InvalidDimension | ErrorKind::UnknownUnit
                ),
                "{line:?} -> {err}"
            );
        }
    }

    #[test]
    fn failures_leave_the_counter_alone(line in "[a-z0-9 .-]{0,24}", start in 1u64..100) {
        let mut ids = IdGenerator::starting_at(start);
        if parse_command(&line, &mut ids).is_err() {
            prop_assert_eq!(ids.peek(), start);
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

proptest! {
    #[test]
    fn box_mesh_is_closed_and_exact(w in arb_dimension(), d in arb_dimension(), h in arb_dimension()) {
        let mesh = generate_box_mesh(w, d, h);
        prop_assert_eq!(mesh.triangle_count(), 12);
        prop_assert!(is_closed(&mesh));
        for v in &mesh.vertices {
            prop_assert!((v.x.abs() - w / 2.0).abs() < TOLERANCE);
            prop_assert!((v.y.abs() - h / 2.0).abs() < TOLERANCE);
            prop_assert!((v.z.abs() - d / 2.0).abs() < TOLERANCE);
        }
        assert_bounds(&mesh, DVec3::new(w, h, d));
    }

    #[test]
    fn cylinder_mesh_is_closed_and_on_surface(
        r in arb_dimension(),
        h in arb_dimension(),
        segments in 3u32..96,
    ) {
        let mesh = generate_cylinder_mesh_with_segments(r, h, segments);
        prop_assert_eq!(mesh.triangle_count(), 4 * segments as usize);
        prop_assert!(is_closed(&mesh));
        for v in &mesh.vertices {
            let radial = (v.x * v.x + v.z * v.z).sqrt();
            let on_cap = (v.y.abs() - h / 2.0).abs() < TOLERANCE && radial <= r + TOLERANCE;
            let on_side = (radial - r).abs() < TOLERANCE && v.y.abs() <= h / 2.0 + TOLERANCE;
            prop_assert!(on_cap || on_side, "{v:?} off surface");
        }
    }

    #[test]
    fn sphere_mesh_is_closed_and_on_surface(
        r in arb_dimension(),
        lat in 2u32..48,
        lon in 3u32..48,
    ) {
        let mesh = generate_sphere_mesh_with_segments(r, lat, lon);
        prop_assert_eq!(mesh.triangle_count(), 2 * lon as usize * (lat as usize - 1));
        prop_assert!(is_closed(&mesh));
        for v in &mesh.vertices {
            prop_assert!((v.length() - r).abs() < TOLERANCE);
        }
    }

    #[test]
    fn round_bounds_match_analytic(
        r in arb_dimension(),
        h in arb_dimension(),
        quarter in 1u32..24,
        half in 1u32..24,
    ) {
        let config = TessellationConfig {
            cylinder_segments: 4 * quarter,
            sphere_lat_segments: 2 * half,
            sphere_lon_segments: 4 * quarter,
        };
        prop_assert!(config.validate().is_ok());

        let cylinder = Primitive::new("cylinder-1", Shape::Cylinder { radius_mm: r, height_mm: h }).unwrap();
        assert_bounds(&tessellate(&cylinder, &config), DVec3::new(2.0 * r, h, 2.0 * r));

        let sphere = Primitive::new("sphere-1", Shape::Sphere { radius_mm: r }).unwrap();
        assert_bounds(&tessellate(&sphere, &config), DVec3::splat(2.0 * r));
    }
}
