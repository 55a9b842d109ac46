pub mod draw;
pub mod session;

use crate::{conf::Conf, session::Session, Error, Result};

/// Parses `lng1 lat1 lng2 lat2`, the two corners of a rectangle drag.
pub fn parse_corners(args: &[String]) -> Result<[f64; 4]> {
    if args.len() != 4 {
        Err(Error::CLI(format!(
            "Expected 4 coordinates (lng1 lat1 lng2 lat2), got {}",
            args.len()
        )))?
    }
    let mut corners = [0.0; 4];
    for (i, arg) in args.iter().enumerate() {
        corners[i] = arg
            .parse()
            .map_err(|_| Error::CLI(format!("Not a coordinate: {arg}")))?;
    }
    Ok(corners)
}

pub fn report(session: &Session, conf: &Conf) -> Result<()> {
    if let Some(region) = session.current_region() {
        println!("Current region: {region}");
    }
    for cycle in session.cycles() {
        println!("#{} {} {}", cycle.seq, cycle.region, cycle.state);
    }
    for path in session.write_to(&conf.output_dir)? {
        println!("{}", path.display());
    }
    Ok(())
}
