pub mod layer;
pub use layer::ShapeLayer;

use crate::{region::Region, Error, Result};
use geo::{BoundingRect, Coord, Geometry, LineString, Point, Polygon, Rect};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Polyline,
    Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub geometry: Geometry,
}

impl Shape {
    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.bounding_rect()
    }
}

/// Emitted once the user finishes drawing a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCreated {
    pub shape: Shape,
}

impl ShapeCreated {
    pub fn bounds(&self) -> Result<Region> {
        let rect = self
            .shape
            .bounds()
            .ok_or(Error::InvalidInput("Drawn shape has no extent".into()))?;
        Region::from_corners(rect.min(), rect.max())
    }

    pub fn south_west(&self) -> Result<Coord> {
        Ok(self.bounds()?.south_west())
    }

    pub fn north_east(&self) -> Result<Coord> {
        Ok(self.bounds()?.north_east())
    }
}

/// Decides which shape kinds the user may create on the map.
pub struct DrawControl {
    enabled: Vec<ShapeKind>,
}

impl DrawControl {
    pub fn new(enabled: &[ShapeKind]) -> DrawControl {
        DrawControl {
            enabled: enabled.to_vec(),
        }
    }

    pub fn rectangles_only() -> DrawControl {
        DrawControl::new(&[ShapeKind::Rectangle])
    }

    pub fn is_enabled(&self, kind: ShapeKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Completes a drawing gesture. Rectangles take the two corners of the drag.
    pub fn finish(&self, kind: ShapeKind, points: &[Coord]) -> Result<ShapeCreated> {
        if !self.is_enabled(kind) {
            Err(Error::InvalidInput(format!("Drawing {kind} shapes is disabled")))?
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            Err(Error::InvalidInput(format!(
                "Shape points must be finite, got ({}, {})",
                p.x, p.y
            )))?
        }
        let geometry = match (kind, points) {
            (ShapeKind::Rectangle, [a, b]) => Geometry::Rect(Rect::new(*a, *b)),
            (ShapeKind::Polygon, points) if points.len() >= 3 => {
                Geometry::Polygon(Polygon::new(LineString::from(points.to_vec()), vec![]))
            }
            (ShapeKind::Polyline, points) if points.len() >= 2 => {
                Geometry::LineString(LineString::from(points.to_vec()))
            }
            (ShapeKind::Marker, [p]) => Geometry::Point(Point::from(*p)),
            _ => Err(Error::InvalidInput(format!(
                "Can't build a {kind} from {} points",
                points.len()
            )))?,
        };
        Ok(ShapeCreated {
            shape: Shape { kind, geometry },
        })
    }
}
