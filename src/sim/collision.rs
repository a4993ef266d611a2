//! Axis-aligned collision boxes
//!
//! Everything in the runner is a box in screen space (y grows downward).
//! Obstacles are tested with a shrunken box so grazing an edge is forgiven.

use glam::Vec2;

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.w - 2.0 * amount,
            self.h - 2.0 * amount,
        )
    }

    /// Strict overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 30.0, 60.0);
        let b = Rect::new(25.0, 50.0, 40.0, 40.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_inset_forgives_grazing_contact() {
        let player = Rect::new(85.0, 540.0, 30.0, 60.0);
        // Obstacle whose raw box pokes 3px into the player's right side
        let obstacle = Rect::new(112.0, 560.0, 40.0, 40.0);
        assert!(player.overlaps(&obstacle));
        assert!(!player.overlaps(&obstacle.inset(5.0)));
    }

    #[test]
    fn test_inset_geometry() {
        let r = Rect::new(10.0, 20.0, 40.0, 40.0).inset(5.0);
        assert_eq!(r, Rect::new(15.0, 25.0, 30.0, 30.0));
        assert_eq!(r.right(), 45.0);
        assert_eq!(r.bottom(), 55.0);
    }
}
