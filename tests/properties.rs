// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Property tests over random star-shaped polygons and random tangles of
// grid contours.

mod helpers;

use polytess::{Collected, FillRule, Point, Polygon, TessConfig, TessMode, Tessellator};
use proptest::prelude::*;

/// A simple polygon: vertices at increasing angles around the origin, each
/// at its own radius, rounded to integers. The smallest radius keeps the
/// rounding from reordering neighbouring angles.
fn star_shaped() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(16u32..64, 3..40).prop_map(|radii| {
        let n = radii.len();
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                let r = r as f64;
                Point::new((r * a.cos()).round() as f32, (r * a.sin()).round() as f32)
            })
            .collect()
    })
}

/// One to three contours of random grid points. Crossings, shared
/// vertices, overlapping edges and both orientations all occur.
fn tangled() -> impl Strategy<Value = (Vec<Point>, Vec<u16>)> {
    let contour = prop::collection::vec((0i8..8, 0i8..8), 3..9);
    prop::collection::vec(contour, 1..4).prop_map(|contours| {
        let counts = contours.iter().map(|c| c.len() as u16).collect();
        let points = contours
            .into_iter()
            .flatten()
            .map(|(x, y)| Point::new(x as f32, y as f32))
            .collect();
        (points, counts)
    })
}

fn run_shape(points: &[Point], counts: &[u16], rule: FillRule, mode: TessMode) -> Collected {
    let mut tess = Tessellator::with_config(TessConfig {
        rule,
        mode,
        validate_mesh: true,
        ..TessConfig::default()
    });
    let mut out = Collected::new();
    tess.done(Polygon::new(points, counts), None, &mut out)
        .unwrap_or_else(|e| panic!("{:?}/{:?} failed on {:?} {:?}: {}", rule, mode, points, counts, e));
    out
}

fn run(points: &[Point], rule: FillRule, mode: TessMode) -> (Collected, Tessellator) {
    let counts = [points.len() as u16];
    let mut tess = Tessellator::with_config(TessConfig {
        rule,
        mode,
        validate_mesh: true,
        ..TessConfig::default()
    });
    let mut out = Collected::new();
    tess.done(Polygon::new(points, &counts), None, &mut out)
        .unwrap_or_else(|e| panic!("{:?} failed on {:?}: {}", mode, points, e));
    (out, tess)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_mode_covers_the_same_area(points in star_shaped()) {
        let (tri, _) = run(&points, FillRule::NonZero, TessMode::Triangulation);
        let (mono, _) = run(&points, FillRule::NonZero, TessMode::Monotone);
        let (conv, _) = run(&points, FillRule::NonZero, TessMode::Convex);
        let expected = tri.area();
        let tol = 1e-6 * expected.max(1.0);
        prop_assert!((mono.area() - expected).abs() <= tol, "{} vs {}", mono.area(), expected);
        prop_assert!((conv.area() - expected).abs() <= tol, "{} vs {}", conv.area(), expected);
        helpers::verify_valid_output(&tri);
        helpers::verify_valid_output(&mono);
        helpers::verify_valid_output(&conv);
    }

    #[test]
    fn tangled_input_covers_the_same_area_in_every_mode((points, counts) in tangled()) {
        for rule in [FillRule::NonZero, FillRule::EvenOdd] {
            let tri = run_shape(&points, &counts, rule, TessMode::Triangulation);
            let mono = run_shape(&points, &counts, rule, TessMode::Monotone);
            let conv = run_shape(&points, &counts, rule, TessMode::Convex);
            let expected = tri.area();
            let tol = 1e-4 * expected.max(1.0);
            prop_assert!((mono.area() - expected).abs() <= tol, "{:?}: {} vs {}", rule, mono.area(), expected);
            prop_assert!((conv.area() - expected).abs() <= tol, "{:?}: {} vs {}", rule, conv.area(), expected);
            helpers::verify_valid_output(&tri);
            helpers::verify_valid_output(&mono);
            helpers::verify_valid_output(&conv);
        }
    }

    #[test]
    fn tangled_convex_output_is_convex((points, counts) in tangled()) {
        for rule in [FillRule::NonZero, FillRule::EvenOdd] {
            let out = run_shape(&points, &counts, rule, TessMode::Convex);
            for poly in &out.polygons {
                prop_assert!(helpers::is_convex(poly), "{:?}: {:?}", rule, poly);
            }
        }
    }

    #[test]
    fn monotone_output_is_monotone(points in star_shaped()) {
        let (out, _) = run(&points, FillRule::NonZero, TessMode::Monotone);
        for poly in &out.polygons {
            prop_assert!(helpers::y_turns(poly) <= 2, "{:?}", poly);
        }
    }

    #[test]
    fn convex_output_is_convex(points in star_shaped()) {
        let (out, _) = run(&points, FillRule::EvenOdd, TessMode::Convex);
        for poly in &out.polygons {
            prop_assert!(helpers::is_convex(poly), "{:?}", poly);
        }
    }

    #[test]
    fn mesh_satisfies_euler(points in star_shaped()) {
        let (_, tess) = run(&points, FillRule::NonZero, TessMode::Triangulation);
        let counts = tess.mesh().counts();
        prop_assert_eq!(counts.euler_characteristic(), 2 * counts.components as i64);
        prop_assert!(tess.mesh().check().is_ok());
    }

    #[test]
    fn tessellation_is_idempotent(points in star_shaped()) {
        let counts = [points.len() as u16];
        let mut tess = Tessellator::new();
        let mut first = Collected::new();
        let s1 = tess.done(Polygon::new(&points, &counts), None, &mut first).unwrap();
        let mut second = Collected::new();
        let s2 = tess.done(Polygon::new(&points, &counts), None, &mut second).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(s1, s2);
    }

    #[test]
    fn reversing_the_contour_keeps_the_area(points in star_shaped()) {
        let (fwd, _) = run(&points, FillRule::NonZero, TessMode::Triangulation);
        let mut rev = points.clone();
        rev.reverse();
        let (bwd, _) = run(&rev, FillRule::NonZero, TessMode::Triangulation);
        let tol = 1e-6 * fwd.area().max(1.0);
        prop_assert!((fwd.area() - bwd.area()).abs() <= tol);
    }
}
