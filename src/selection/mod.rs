use crate::{
    analysis::AnalysisRequest,
    draw::{ShapeCreated, ShapeLayer},
    region::Region,
    Result,
};
use tracing::{info, warn};

/// One outbound exchange triggered by a drawn shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub seq: u64,
    pub region: Region,
    pub request: AnalysisRequest,
}

/// Owns the single selected region and the shapes displayed on the map.
#[derive(Default)]
pub struct SelectionController {
    layer: ShapeLayer,
    current: Option<Region>,
    seq: u64,
}

impl SelectionController {
    pub fn on_shape_drawn(&mut self, event: ShapeCreated) -> Result<Submission> {
        let region = Region::from_corners(event.south_west()?, event.north_east()?)?;
        self.layer.clear();
        self.layer.add(event.shape);
        self.current = Some(region);
        if region.is_degenerate() {
            warn!(%region, "Selected region has zero area");
        }
        let request = AnalysisRequest::new(&region);
        info!(coordinates = ?request.bounds, "Selected coordinates");
        self.seq += 1;
        Ok(Submission {
            seq: self.seq,
            region,
            request,
        })
    }

    pub fn current_region(&self) -> Option<&Region> {
        self.current.as_ref()
    }

    pub fn latest_seq(&self) -> u64 {
        self.seq
    }

    pub fn layer(&self) -> &ShapeLayer {
        &self.layer
    }
}

#[cfg(test)]
mod test {
    use super::SelectionController;
    use crate::draw::{DrawControl, ShapeKind};
    use geo::coord;

    #[test]
    fn starts_empty() {
        let controller = SelectionController::default();
        assert!(controller.current_region().is_none());
        assert!(controller.layer().is_empty());
        assert_eq!(0, controller.latest_seq());
    }

    #[test]
    fn second_shape_replaces_first() {
        let control = DrawControl::rectangles_only();
        let mut controller = SelectionController::default();
        let a = control
            .finish(
                ShapeKind::Rectangle,
                &[coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }],
            )
            .unwrap();
        let b = control
            .finish(
                ShapeKind::Rectangle,
                &[coord! { x: 5.0, y: 5.0 }, coord! { x: 6.0, y: 7.0 }],
            )
            .unwrap();
        let b_shape = b.shape.clone();

        controller.on_shape_drawn(a).unwrap();
        assert_eq!(1, controller.layer().len());
        let submission = controller.on_shape_drawn(b).unwrap();

        assert_eq!(1, controller.layer().len());
        assert_eq!(&b_shape, &controller.layer().shapes()[0]);
        assert_eq!(
            [5.0, 5.0, 6.0, 7.0],
            controller.current_region().unwrap().wire_bounds()
        );
        assert_eq!(2, submission.seq);
        assert_eq!(2, controller.latest_seq());
    }

    #[test]
    fn request_uses_wire_order_for_any_drag() {
        let control = DrawControl::rectangles_only();
        let mut controller = SelectionController::default();
        let event = control
            .finish(
                ShapeKind::Rectangle,
                &[coord! { x: 78.9, y: 20.1 }, coord! { x: 78.2, y: 20.9 }],
            )
            .unwrap();
        let submission = controller.on_shape_drawn(event).unwrap();
        assert_eq!([78.2, 20.1, 78.9, 20.9], submission.request.bounds);
        assert_eq!(1, submission.seq);
    }

    #[test]
    fn degenerate_rectangle_is_still_submitted() {
        let control = DrawControl::rectangles_only();
        let mut controller = SelectionController::default();
        let event = control
            .finish(
                ShapeKind::Rectangle,
                &[coord! { x: 3.0, y: 3.0 }, coord! { x: 3.0, y: 3.0 }],
            )
            .unwrap();
        let submission = controller.on_shape_drawn(event).unwrap();
        assert_eq!([3.0, 3.0, 3.0, 3.0], submission.request.bounds);
    }
}
