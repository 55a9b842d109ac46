use super::{parse_corners, report};
use crate::{conf::Conf, session::Session, Error, Result};
use actix_web::rt::task::spawn_blocking;
use geo::coord;
use std::io;
use tracing::{info, warn};

/// Reads one rectangle drag per line and submits it right away.
pub async fn run(conf: &Conf) -> Result<()> {
    let mut session = Session::new(conf)?;

    while let Some(input) = read_line().await? {
        match handle_line(&mut session, &input) {
            Some(Ok(seq)) => info!(seq, "Submitted region"),
            Some(Err(e)) => {
                warn!(%e, input = input.trim(), "Skipping line");
                eprintln!("Skipping line: {e}");
            }
            None => {}
        }
    }

    info!("End of input, waiting for outstanding responses");
    session.settle().await;
    report(&session, conf)
}

/// Submits the drag on one input line. Blank lines and `#` comments yield `None`.
fn handle_line(session: &mut Session, input: &str) -> Option<Result<u64>> {
    let input = input.trim();

    if input.is_empty() || input.starts_with('#') {
        return None;
    }

    let args: Vec<String> = input.split_whitespace().map(Into::into).collect();
    Some(parse_corners(&args).and_then(|[x1, y1, x2, y2]| {
        session.draw_rectangle(coord! { x: x1, y: y1 }, coord! { x: x2, y: y2 })
    }))
}

// Blocking reads go to a separate thread so outstanding exchanges keep running
async fn read_line() -> Result<Option<String>> {
    let (read, input) = spawn_blocking(|| {
        let mut input = String::new();
        io::stdin().read_line(&mut input).map(|read| (read, input))
    })
    .await
    .map_err(|e| Error::Generic(format!("Failed to read stdin: {e}")))??;
    Ok(if read == 0 { None } else { Some(input) })
}
