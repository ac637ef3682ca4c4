//! Screen-space geometry in panel pixels

/// Top-left anchor for text and glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Origin {
    pub x: u16,
    pub y: u16,
}

impl Origin {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Shift right by `dx` pixels
    pub const fn right(self, dx: u16) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

/// Axis-aligned rectangle, origin plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Origin {
        Origin::new(self.x, self.y)
    }

    /// One past the last column
    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    /// One past the last row
    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    /// Pixel count
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping part of two rectangles
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x0 < x1 && y0 < y1 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));

        let c = Rect::new(10, 0, 4, 4);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(4, 56, 40, 40);
        assert!(r.contains(4, 56));
        assert!(r.contains(43, 95));
        assert!(!r.contains(44, 56));
        assert!(r.contains_rect(&Rect::new(10, 60, 20, 20)));
        assert!(!r.contains_rect(&Rect::new(10, 60, 40, 20)));
        assert_eq!(r.area(), 1600);
    }
}
