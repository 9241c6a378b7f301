// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Fill rule correctness tests with area verification.

mod helpers;

use helpers::{assert_area_approx, tessellate, Shape};
use polytess::{FillRule, TessMode};

const RULES: [FillRule; 2] = [FillRule::NonZero, FillRule::EvenOdd];
const MODES: [TessMode; 3] = [TessMode::Convex, TessMode::Monotone, TessMode::Triangulation];

fn area(shape: &Shape, rule: FillRule, mode: TessMode) -> f64 {
    let (out, _) = tessellate(shape, rule, mode);
    helpers::verify_valid_output(&out);
    out.area()
}

/// Three nested squares:
/// - Outer: 6x6, CCW (area=36)
/// - Middle: 4x4, CW (area=16)
/// - Inner: 2x2, CCW (area=4)
///
/// Winding numbers from outside to inside: 0, 1, 0, 1
fn alternating_nested_squares() -> Shape {
    Shape::new()
        .contour(&[(-3.0, -3.0), (3.0, -3.0), (3.0, 3.0), (-3.0, 3.0)])
        .contour(&[(-2.0, -2.0), (-2.0, 2.0), (2.0, 2.0), (2.0, -2.0)])
        .contour(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)])
}

/// Same squares, all CCW: winding 1, 2, 3 from outside in.
fn stacked_nested_squares() -> Shape {
    Shape::new()
        .contour(&[(-3.0, -3.0), (3.0, -3.0), (3.0, 3.0), (-3.0, 3.0)])
        .contour(&[(-2.0, -2.0), (2.0, -2.0), (2.0, 2.0), (-2.0, 2.0)])
        .contour(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)])
}

#[test]
fn alternating_nested_squares_agree_under_both_rules() {
    for rule in RULES {
        for mode in MODES {
            let a = area(&alternating_nested_squares(), rule, mode);
            assert_area_approx(a, 24.0, 1e-6, &format!("{:?}/{:?}", rule, mode));
        }
    }
}

#[test]
fn stacked_nested_squares_differ_by_rule() {
    for mode in MODES {
        let nonzero = area(&stacked_nested_squares(), FillRule::NonZero, mode);
        assert_area_approx(nonzero, 36.0, 1e-6, "NonZero stacked");
        let even_odd = area(&stacked_nested_squares(), FillRule::EvenOdd, mode);
        assert_area_approx(even_odd, 24.0, 1e-6, "EvenOdd stacked");
    }
}

#[test]
fn doubly_wound_contour() {
    let shape = Shape::new().contour(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
    ]);
    for mode in MODES {
        assert_area_approx(area(&shape, FillRule::NonZero, mode), 100.0, 1e-6, "NonZero twice");
        let (out, _) = tessellate(&shape, FillRule::EvenOdd, mode);
        assert!(out.is_empty(), "EvenOdd should leave nothing: {:?}", out);
    }
}

#[test]
fn overlapping_squares_same_direction() {
    let shape = Shape::new()
        .contour(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        .contour(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]);
    for mode in MODES {
        assert_area_approx(area(&shape, FillRule::NonZero, mode), 28.0, 1e-6, "NonZero union");
        assert_area_approx(area(&shape, FillRule::EvenOdd, mode), 24.0, 1e-6, "EvenOdd xor");
    }
    let (_, stats) = tessellate(&shape, FillRule::NonZero, TessMode::Triangulation);
    assert_eq!(stats.intersections, 2);
}

#[test]
fn overlapping_squares_opposite_direction() {
    let shape = Shape::new()
        .contour(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        .contour(&[(2.0, 2.0), (2.0, 6.0), (6.0, 6.0), (6.0, 2.0)]);
    for rule in RULES {
        assert_area_approx(area(&shape, rule, TessMode::Triangulation), 24.0, 1e-6, "cancelled overlap");
    }
}

#[test]
fn bowtie_under_both_rules() {
    let shape = Shape::new().contour(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
    for rule in RULES {
        let (out, stats) = tessellate(&shape, rule, TessMode::Triangulation);
        assert_eq!(stats.intersections, 1);
        assert_eq!(out.triangles.len(), 2);
        assert_area_approx(out.area(), 50.0, 1e-6, "bowtie");
        // the crossing is a new vertex shared by both triangles
        for t in &out.triangles {
            assert!(t.contains(&helpers::p(5.0, 5.0)), "{:?}", t);
        }
    }
}

// The center pentagon of a pentagram has winding two.
#[test]
fn pentagram_center_depends_on_rule() {
    let shape = Shape::new().contour(&[
        (350.0, 75.0),
        (423.0, 301.0),
        (231.0, 161.0),
        (469.0, 161.0),
        (277.0, 301.0),
    ]);
    let (nonzero, stats) = tessellate(&shape, FillRule::NonZero, TessMode::Triangulation);
    let (even_odd, _) = tessellate(&shape, FillRule::EvenOdd, TessMode::Triangulation);
    helpers::verify_valid_output(&nonzero);
    helpers::verify_valid_output(&even_odd);
    assert_eq!(stats.intersections, 5);
    assert!(even_odd.area() > 0.0);
    assert!(
        nonzero.area() > even_odd.area(),
        "NonZero ({}) should cover more than EvenOdd ({})",
        nonzero.area(),
        even_odd.area()
    );
}

// Crossings on a near-collinear run: rounded intersection points must not
// leave clockwise triangles or reflex corners behind.
#[test]
fn rounded_crossings_stay_counter_clockwise() {
    let shapes = [
        Shape::new()
            .contour(&[(5.0, 2.0), (6.0, 0.0), (0.0, 6.0), (4.0, 6.0)])
            .contour(&[(6.0, 0.0), (4.0, 2.0), (7.0, 2.0), (1.0, 0.0), (0.0, 7.0)]),
        Shape::new().contour(&[(0.0, 4.0), (0.0, 6.0), (7.0, 2.0), (7.0, 6.0), (2.0, 4.0), (5.0, 5.0)]),
    ];
    for shape in &shapes {
        for rule in RULES {
            let (tri, _) = tessellate(shape, rule, TessMode::Triangulation);
            helpers::verify_valid_output(&tri);
            let (conv, _) = tessellate(shape, rule, TessMode::Convex);
            helpers::verify_valid_output(&conv);
            for poly in &conv.polygons {
                assert!(helpers::is_convex(poly), "{:?}: reflex corner in {:?}", rule, poly);
            }
            let tol = 1e-4 * tri.area().max(1.0);
            assert_area_approx(conv.area(), tri.area(), tol, "convex vs triangles");
        }
    }
}
