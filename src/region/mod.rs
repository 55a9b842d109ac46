use crate::{Error, Result};
use geo::{coord, Coord, Rect};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// An axis-aligned selection in longitude/latitude degrees.
///
/// The fields always satisfy `west <= east` and `south <= north`, no matter
/// which corners the region was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Region {
    pub fn from_corners(a: Coord, b: Coord) -> Result<Region> {
        for c in [a, b] {
            if !c.x.is_finite() || !c.y.is_finite() {
                Err(Error::InvalidInput(format!(
                    "Corner coordinates must be finite, got ({}, {})",
                    c.x, c.y
                )))?
            }
        }
        Ok(Region::from(Rect::new(a, b)))
    }

    pub fn south_west(&self) -> Coord {
        coord! { x: self.west, y: self.south }
    }

    pub fn north_east(&self) -> Coord {
        coord! { x: self.east, y: self.north }
    }

    /// Coordinates in the order the analysis backend expects.
    pub fn wire_bounds(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    pub fn is_degenerate(&self) -> bool {
        self.west == self.east || self.south == self.north
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region {
            west: rect.min().x,
            south: rect.min().y,
            east: rect.max().x,
            north: rect.max().y,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.west, self.south, self.east, self.north
        )
    }
}

#[cfg(test)]
mod test {
    use super::Region;
    use crate::Error;
    use geo::coord;

    #[test]
    fn from_corners_any_drag_direction() {
        let expected = [77.1, 28.4, 77.3, 28.7];
        let corners = [
            (coord! { x: 77.1, y: 28.4 }, coord! { x: 77.3, y: 28.7 }),
            (coord! { x: 77.3, y: 28.7 }, coord! { x: 77.1, y: 28.4 }),
            (coord! { x: 77.1, y: 28.7 }, coord! { x: 77.3, y: 28.4 }),
            (coord! { x: 77.3, y: 28.4 }, coord! { x: 77.1, y: 28.7 }),
        ];
        for (a, b) in corners {
            let region = Region::from_corners(a, b).unwrap();
            assert_eq!(expected, region.wire_bounds());
            let [west, south, east, north] = region.wire_bounds();
            assert!(west <= east);
            assert!(south <= north);
        }
    }

    #[test]
    fn corner_accessors() {
        let region =
            Region::from_corners(coord! { x: 10.0, y: -5.0 }, coord! { x: -10.0, y: 5.0 })
                .unwrap();
        assert_eq!(coord! { x: -10.0, y: -5.0 }, region.south_west());
        assert_eq!(coord! { x: 10.0, y: 5.0 }, region.north_east());
        assert_eq!(
            region,
            Region::from(geo::Rect::new(region.north_east(), region.south_west()))
        );
    }

    #[test]
    fn non_finite_corner() {
        let res = Region::from_corners(coord! { x: f64::NAN, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        let res = Region::from_corners(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: f64::INFINITY },
        );
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn degenerate() {
        let region =
            Region::from_corners(coord! { x: 1.0, y: 2.0 }, coord! { x: 1.0, y: 3.0 }).unwrap();
        assert!(region.is_degenerate());
        assert_eq!("[1, 2, 1, 3]", region.to_string());
    }
}
