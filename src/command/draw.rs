use super::{parse_corners, report};
use crate::{conf::Conf, session::Session, Result};
use geo::coord;

pub async fn run(args: &[String], conf: &Conf) -> Result<()> {
    let [x1, y1, x2, y2] = parse_corners(args)?;
    let mut session = Session::new(conf)?;
    session.draw_rectangle(coord! { x: x1, y: y1 }, coord! { x: x2, y: y2 })?;
    session.settle().await;
    report(&session, conf)
}
