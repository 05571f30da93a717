//! Small geometry helpers shared by the dispatcher, renderer and CLI.

use crate::annotation::Position;

/// Axis-aligned bounding box in image coordinates (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box covering every position, or `None` for an empty iterator.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let [x, y] = iter.next()?;
        let mut bounds = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        for [x, y] in iter {
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }

    /// Square box of half-size `radius` centred on `center`.
    pub fn around(center: Position, radius: f64) -> Option<Self> {
        if !radius.is_finite() {
            return None;
        }
        Some(Bounds {
            min_x: center[0] - radius,
            min_y: center[1] - radius,
            max_x: center[0] + radius,
            max_y: center[1] + radius,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Corners in ring order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Position; 4] {
        [
            [self.min_x, self.min_y],
            [self.max_x, self.min_y],
            [self.max_x, self.max_y],
            [self.min_x, self.max_y],
        ]
    }

    /// Smallest box containing both boxes.
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box evenly in all directions.
    pub fn inflate(self, amount: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    pub fn contains(&self, at: Position) -> bool {
        (self.min_x..=self.max_x).contains(&at[0]) && (self.min_y..=self.max_y).contains(&at[1])
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: Position, b: Position) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Parses `"x,y"` into a position. Whitespace around components is ignored.
pub fn parse_position(raw: &str) -> Option<Position> {
    let (x, y) = raw.split_once(',')?;
    let x = x.trim().parse::<f64>().ok()?;
    let y = y.trim().parse::<f64>().ok()?;
    (x.is_finite() && y.is_finite()).then_some([x, y])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_positions_tracks_extremes() {
        let bounds = Bounds::from_positions([[3.0, 8.0], [-1.0, 2.0], [5.0, 4.0]]).unwrap();
        assert_eq!(bounds.corners()[0], [-1.0, 2.0]);
        assert_eq!(bounds.corners()[2], [5.0, 8.0]);
        assert_eq!(bounds.width(), 6.0);
        assert_eq!(bounds.height(), 6.0);
    }

    #[test]
    fn bounds_from_nothing_is_none() {
        assert!(Bounds::from_positions(std::iter::empty()).is_none());
    }

    #[test]
    fn union_and_inflate() {
        let a = Bounds::around([0.0, 0.0], 1.0).unwrap();
        let b = Bounds::around([10.0, 10.0], 1.0).unwrap();
        let both = a.union(b).inflate(2.0);
        assert_eq!((both.min_x, both.max_y), (-3.0, 13.0));
        assert!(both.contains([5.0, 5.0]));
        assert!(!a.contains([5.0, 5.0]));
    }

    #[test]
    fn parse_position_accepts_spaces_and_rejects_garbage() {
        assert_eq!(parse_position(" 1.5, -2 "), Some([1.5, -2.0]));
        assert_eq!(parse_position("1;2"), None);
        assert_eq!(parse_position("x,2"), None);
        assert_eq!(parse_position("inf,2"), None);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance([0.0, 0.0], [3.0, 4.0]), 5.0);
    }
}
