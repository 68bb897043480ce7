use std::f64::consts::{PI, TAU};

/// Axis-aligned box on the cell grid.
///
/// TOP / LEFT corner is 0/0, y grows downwards.
/// Bounds are half-open: `[x, x+w) × [y, y+h)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBox {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Half-open interval endpoints of a [CellBox]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

impl CellBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        assert!(w > 0 && h > 0, "box extent must be positive, got {w}x{h}");
        Self { x, y, w, h }
    }

    pub fn x(&self) -> i32 { self.x }
    pub fn y(&self) -> i32 { self.y }
    pub fn w(&self) -> i32 { self.w }
    pub fn h(&self) -> i32 { self.h }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x0: self.x,
            x1: self.x + self.w,
            y0: self.y,
            y1: self.y + self.h,
        }
    }

    /// Strict overlap on both axes. Boxes sharing only an edge or a corner do not intersect.
    pub fn intersects(&self, other: &CellBox) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
    }

    pub fn touches_top(&self) -> bool {
        self.y <= 0
    }

    pub fn touches_bottom(&self, screen_h: i32) -> bool {
        self.y + self.h >= screen_h
    }

    pub fn touches_left(&self) -> bool {
        self.x <= 0
    }

    pub fn touches_right(&self, screen_w: i32) -> bool {
        self.x + self.w >= screen_w
    }

    pub fn with_x(&self, x: i32) -> Self {
        Self { x, ..*self }
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Direction in radians, always kept in `[0, 2π)`, plus a constant magnitude (cells per tick)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    direction: f64,
    magnitude: f64,
}

impl Velocity {
    pub fn new(direction: f64, magnitude: f64) -> Self {
        assert!(magnitude > 0.0, "magnitude must be positive, got {magnitude}");
        Self {
            direction: normalize_direction(direction),
            magnitude,
        }
    }

    pub fn direction(&self) -> f64 { self.direction }
    pub fn magnitude(&self) -> f64 { self.magnitude }

    /// Bounce off a horizontal surface (top, bottom, paddle, block)
    pub fn reflect_vertical(&mut self) {
        self.direction = normalize_direction(-self.direction);
    }

    /// Bounce off a vertical surface (left or right wall)
    pub fn reflect_horizontal(&mut self) {
        self.direction = normalize_direction(PI - self.direction);
    }

    /// Cell displacement for one tick.
    /// Physics y points up, screen y points down - hence the negation.
    pub fn displacement(&self) -> (i32, i32) {
        let dx = (self.magnitude * self.direction.cos()).round() as i32;
        let dy = -(self.magnitude * self.direction.sin()).round() as i32;
        (dx, dy)
    }
}

pub fn normalize_direction(direction: f64) -> f64 {
    let d = direction.rem_euclid(TAU);
    // rem_euclid may round up to TAU for tiny negative inputs
    if d >= TAU { 0.0 } else { d }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use rstest::rstest;

    use super::*;

    fn assert_eq_roughly(what: &str, a: f64, b: f64, tolerance: f64) {
        assert!((a - b).abs() <= tolerance, "'{what}' difference between {a} and {b} more than {tolerance}");
    }

    /// angles equal modulo 2π
    fn assert_same_angle(a: f64, b: f64) {
        let diff = (a - b).rem_euclid(TAU);
        assert!(diff < 1e-9 || TAU - diff < 1e-9, "{a} and {b} are different angles");
    }

    #[rstest]
    #[case(CellBox::new(0, 0, 2, 2), CellBox::new(2, 0, 2, 2), false)]
    #[case(CellBox::new(0, 0, 2, 2), CellBox::new(0, 2, 2, 2), false)]
    #[case(CellBox::new(0, 0, 2, 2), CellBox::new(2, 2, 2, 2), false)]
    #[case(CellBox::new(0, 0, 2, 2), CellBox::new(1, 1, 2, 2), true)]
    #[case(CellBox::new(0, 0, 10, 10), CellBox::new(3, 3, 1, 1), true)]
    #[case(CellBox::new(5, 5, 4, 1), CellBox::new(8, 5, 2, 1), true)]
    #[case(CellBox::new(5, 5, 4, 1), CellBox::new(9, 5, 2, 1), false)]
    #[case(CellBox::new(-3, -3, 2, 2), CellBox::new(-2, -2, 1, 1), true)]
    fn intersects_is_strict_and_symmetric(#[case] a: CellBox, #[case] b: CellBox, #[case] expected: bool) {
        assert_eq!(a.intersects(&b), expected);
        assert_eq!(b.intersects(&a), expected);
    }

    #[test]
    fn bounds_are_half_open() {
        let b = CellBox::new(3, 4, 5, 6).bounds();
        assert_eq!(b, Bounds { x0: 3, x1: 8, y0: 4, y1: 10 });
    }

    #[rstest]
    #[case(CellBox::new(5, 0, 2, 1), true, false, false, false)]
    #[case(CellBox::new(5, -1, 2, 1), true, false, false, false)]
    #[case(CellBox::new(5, 9, 2, 1), false, true, false, false)]
    #[case(CellBox::new(0, 5, 2, 1), false, false, true, false)]
    #[case(CellBox::new(8, 5, 2, 1), false, false, false, true)]
    #[case(CellBox::new(7, 5, 2, 1), false, false, false, false)]
    #[case(CellBox::new(0, 0, 10, 10), true, true, true, true)]
    fn touches_screen_edges(
        #[case] b: CellBox,
        #[case] top: bool,
        #[case] bottom: bool,
        #[case] left: bool,
        #[case] right: bool,
    ) {
        assert_eq!(b.touches_top(), top);
        assert_eq!(b.touches_bottom(10), bottom);
        assert_eq!(b.touches_left(), left);
        assert_eq!(b.touches_right(10), right);
    }

    #[test]
    #[should_panic]
    fn empty_box_is_rejected() {
        CellBox::new(0, 0, 0, 1);
    }

    #[rstest]
    #[case(FRAC_PI_4)]
    #[case(3.0 * FRAC_PI_4)]
    #[case(FRAC_PI_2)]
    #[case(5.5)]
    #[case(0.0)]
    fn vertical_reflection_negates_direction(#[case] direction: f64) {
        let mut v = Velocity::new(direction, 1.0);
        v.reflect_vertical();
        assert_same_angle(v.direction(), -direction);
        assert!(v.direction() >= 0.0 && v.direction() < TAU);
    }

    #[rstest]
    #[case(FRAC_PI_4)]
    #[case(3.0 * FRAC_PI_4)]
    #[case(5.5)]
    #[case(0.0)]
    fn horizontal_reflection_complements_direction(#[case] direction: f64) {
        let mut v = Velocity::new(direction, 1.0);
        v.reflect_horizontal();
        assert_same_angle(v.direction(), PI - direction);
        assert!(v.direction() >= 0.0 && v.direction() < TAU);
    }

    #[rstest]
    #[case(- FRAC_PI_4, 7.0 * FRAC_PI_4)]
    #[case(TAU + 1.0, 1.0)]
    #[case(- TAU, 0.0)]
    #[case(- 1e-18, 0.0)]
    fn direction_is_normalized(#[case] direction: f64, #[case] expected: f64) {
        assert_eq_roughly("direction", normalize_direction(direction), expected, 1e-9);
    }

    #[rstest]
    #[case(FRAC_PI_4, 1.0, (1, - 1))]
    #[case(3.0 * FRAC_PI_4, 1.0, (- 1, - 1))]
    #[case(5.0 * FRAC_PI_4, 1.0, (- 1, 1))]
    #[case(7.0 * FRAC_PI_4, 1.0, (1, 1))]
    #[case(FRAC_PI_2, 2.0, (0, - 2))]
    #[case(0.0, 3.0, (3, 0))]
    fn displacement_uses_screen_orientation(#[case] direction: f64, #[case] magnitude: f64, #[case] expected: (i32, i32)) {
        assert_eq!(Velocity::new(direction, magnitude).displacement(), expected);
    }
}
