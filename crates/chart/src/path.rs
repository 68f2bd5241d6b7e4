//! Monotone cubic interpolation in x.
//!
//! Tangents follow the Steffen scheme: at an interior point the slope is
//! limited by the smaller adjacent secant, and it is zero at local extrema,
//! so the curve never overshoots the data between two samples.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn secant(a: Point, b: Point) -> f64 {
    let h = b.x - a.x;
    if h == 0.0 { 0.0 } else { (b.y - a.y) / h }
}

/// Tangent at `b` given its neighbours.
fn interior_tangent(a: Point, b: Point, c: Point) -> f64 {
    let h0 = b.x - a.x;
    let h1 = c.x - b.x;
    let s0 = secant(a, b);
    let s1 = secant(b, c);
    if h0 + h1 == 0.0 {
        return 0.0;
    }
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs())
}

/// One-sided tangent at an end point, from the neighbouring tangent `t`.
fn end_tangent(a: Point, b: Point, t: f64) -> f64 {
    let h = b.x - a.x;
    if h == 0.0 { t } else { (3.0 * (b.y - a.y) / h - t) / 2.0 }
}

fn tangents(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut m = vec![0.0; n];
    for i in 1..n - 1 {
        m[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    m[0] = end_tangent(points[0], points[1], m[1]);
    m[n - 1] = end_tangent(points[n - 2], points[n - 1], m[n - 2]);
    m
}

/// Open path through `points` (ascending in x).
#[must_use]
pub fn monotone_x(points: &[Point]) -> Vec<PathSegment> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut path = Vec::with_capacity(points.len());
    path.push(PathSegment::MoveTo(*first));

    match points.len() {
        1 => {}
        2 => path.push(PathSegment::LineTo(points[1])),
        _ => {
            let m = tangents(points);
            for (i, w) in points.windows(2).enumerate() {
                let (p0, p1) = (w[0], w[1]);
                let dx = (p1.x - p0.x) / 3.0;
                path.push(PathSegment::CubicTo {
                    c1: Point::new(p0.x + dx, p0.y + dx * m[i]),
                    c2: Point::new(p1.x - dx, p1.y - dx * m[i + 1]),
                    to: p1,
                });
            }
        }
    }
    path
}

/// Closed area under the curve down to `baseline`.
#[must_use]
pub fn monotone_area(points: &[Point], baseline: f64) -> Vec<PathSegment> {
    let mut path = monotone_x(points);
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        path.push(PathSegment::LineTo(Point::new(last.x, baseline)));
        path.push(PathSegment::LineTo(Point::new(first.x, baseline)));
        path.push(PathSegment::Close);
    }
    path
}

/// SVG path data.
#[must_use]
pub fn to_svg(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::MoveTo(p) => out.push_str(&format!("M{:.2},{:.2}", p.x, p.y)),
            PathSegment::LineTo(p) => out.push_str(&format!("L{:.2},{:.2}", p.x, p.y)),
            PathSegment::CubicTo { c1, c2, to } => out.push_str(&format!(
                "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                c1.x, c1.y, c2.x, c2.y, to.x, to.y
            )),
            PathSegment::Close => out.push('Z'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(ys: &[f64]) -> Vec<Point> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| Point::new(i as f64 * 10.0, *y))
            .collect()
    }

    #[test]
    fn test_short_paths() {
        assert!(monotone_x(&[]).is_empty());
        assert_eq!(monotone_x(&pts(&[1.0])).len(), 1);
        assert!(matches!(monotone_x(&pts(&[1.0, 2.0]))[1], PathSegment::LineTo(_)));
    }

    #[test]
    fn test_no_overshoot_on_monotone_data() {
        let data = pts(&[0.0, 1.0, 1.0, 5.0, 6.0]);
        for segment in monotone_x(&data) {
            if let PathSegment::CubicTo { c1, c2, to } = segment {
                for c in [c1, c2, to] {
                    assert!((0.0..=6.0).contains(&c.y), "control {c:?} overshoots");
                }
            }
        }
    }

    #[test]
    fn test_flat_at_local_extremum() {
        let data = pts(&[0.0, 5.0, 0.0]);
        let path = monotone_x(&data);
        let PathSegment::CubicTo { c2, to, .. } = path[1] else {
            panic!("expected a cubic segment");
        };
        assert_eq!(c2.y, to.y);
    }

    #[test]
    fn test_area_closes_to_baseline() {
        let area = monotone_area(&pts(&[3.0, 4.0, 2.0]), 100.0);
        assert_eq!(area.last(), Some(&PathSegment::Close));
        assert_eq!(area[area.len() - 2], PathSegment::LineTo(Point::new(0.0, 100.0)));
        assert!(to_svg(&area).starts_with("M0.00,3.00C"));
    }
}
