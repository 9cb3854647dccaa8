// Axis-aligned bounding box.

use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box spanning `min..=max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// A zero-sized box at `p`.
    pub fn from_point(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_grows_to_cover_every_point() {
        let mut rect = Rect::from_point(Vec2::new(2.0, 1.0));
        rect.include(Vec2::new(-1.0, 5.0));
        rect.include(Vec2::new(4.0, -3.0));
        assert_eq!(rect.min, Vec2::new(-1.0, -3.0));
        assert_eq!(rect.max, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn include_inside_point_is_a_no_op() {
        let mut rect = Rect::from_point(Vec2::ZERO);
        rect.include(Vec2::new(3.0, 2.0));
        let before = rect;
        rect.include(Vec2::new(1.0, 1.0));
        assert_eq!(rect, before);
    }
}
