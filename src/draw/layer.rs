use super::Shape;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::Value;

/// The group of shapes currently displayed on the map.
#[derive(Default)]
pub struct ShapeLayer {
    shapes: Vec<Shape>,
}

impl ShapeLayer {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .shapes
            .iter()
            .map(|shape| {
                let mut properties = JsonObject::new();
                properties.insert("kind".into(), Value::String(shape.kind.to_string()));
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&shape.geometry))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
