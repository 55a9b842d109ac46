use crate::{
    analysis::{AnalysisClient, AnalysisResponse},
    conf::{Conf, StalePolicy},
    draw::{DrawControl, ShapeCreated, ShapeKind},
    region::Region,
    render::{Dashboard, RenderOutcome, ResponseRenderer},
    selection::{SelectionController, Submission},
    service::filesystem::output_file_path,
    Result,
};
use actix_web::rt::task::JoinHandle;
use futures_util::future::join_all;
use geo::Coord;
use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};
use strum::Display;
use time::OffsetDateTime;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CycleState {
    AwaitingResponse,
    Rendered,
    Failed,
    Discarded,
}

/// One submission and what became of its response.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub seq: u64,
    pub region: Region,
    pub state: CycleState,
    pub submitted_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
}

struct SessionState {
    controller: SelectionController,
    renderer: ResponseRenderer<Dashboard>,
    cycles: Vec<Cycle>,
    stale_responses: StalePolicy,
}

impl SessionState {
    fn new(conf: &Conf) -> SessionState {
        SessionState {
            controller: SelectionController::default(),
            renderer: ResponseRenderer::new(Dashboard::new(conf), conf.backend_url.clone()),
            cycles: vec![],
            stale_responses: conf.stale_responses,
        }
    }

    fn begin(&mut self, event: ShapeCreated) -> Result<Submission> {
        let submission = self.controller.on_shape_drawn(event)?;
        self.cycles.push(Cycle {
            seq: submission.seq,
            region: submission.region,
            state: CycleState::AwaitingResponse,
            submitted_at: OffsetDateTime::now_utc(),
            finished_at: None,
        });
        Ok(submission)
    }

    fn complete(&mut self, seq: u64, outcome: Result<AnalysisResponse>) -> CycleState {
        let latest = self.controller.latest_seq();
        let state = if seq != latest && self.stale_responses == StalePolicy::Discard {
            warn!(seq, latest, "Discarding stale response");
            CycleState::Discarded
        } else {
            match outcome {
                Ok(res) => match self.renderer.on_response(&res) {
                    RenderOutcome::Rendered { .. } => CycleState::Rendered,
                    RenderOutcome::ServerError(_) => CycleState::Failed,
                },
                Err(e) => {
                    self.renderer.on_transport_failure(&e);
                    CycleState::Failed
                }
            }
        };
        if let Some(cycle) = self.cycles.iter_mut().find(|it| it.seq == seq) {
            let now = OffsetDateTime::now_utc();
            cycle.state = state;
            cycle.finished_at = Some(now);
            info!(
                seq,
                state = %state,
                elapsed_sec = (now - cycle.submitted_at).as_seconds_f64(),
                "Submission cycle finished"
            );
        }
        state
    }
}

/// Single-threaded glue between the drawing surface, the backend and the dashboard.
///
/// Exchanges run as local tasks on the current actix runtime, so drawing a new
/// rectangle never waits for an outstanding response.
pub struct Session {
    state: Rc<RefCell<SessionState>>,
    control: DrawControl,
    client: Rc<AnalysisClient>,
    pending: Vec<JoinHandle<()>>,
}

impl Session {
    pub fn new(conf: &Conf) -> Result<Session> {
        Ok(Session {
            state: Rc::new(RefCell::new(SessionState::new(conf))),
            control: DrawControl::rectangles_only(),
            client: Rc::new(AnalysisClient::new(conf)?),
            pending: vec![],
        })
    }

    /// Same as a finished rectangle drag between two corners.
    pub fn draw_rectangle(&mut self, a: Coord, b: Coord) -> Result<u64> {
        let event = self.control.finish(ShapeKind::Rectangle, &[a, b])?;
        self.on_shape_drawn(event)
    }

    pub fn on_shape_drawn(&mut self, event: ShapeCreated) -> Result<u64> {
        let submission = self.state.borrow_mut().begin(event)?;
        let seq = submission.seq;
        let state = self.state.clone();
        let client = self.client.clone();
        self.pending.push(actix_web::rt::spawn(async move {
            let outcome = client.process(&submission.request).await;
            state.borrow_mut().complete(submission.seq, outcome);
        }));
        Ok(seq)
    }

    /// Waits for every outstanding exchange. There is no timeout.
    pub async fn settle(&mut self) {
        for res in join_all(self.pending.drain(..)).await {
            if let Err(e) = res {
                error!(%e, "Submission task failed");
            }
        }
    }

    pub fn cycles(&self) -> Vec<Cycle> {
        self.state.borrow().cycles.clone()
    }

    pub fn dashboard(&self) -> Dashboard {
        self.state.borrow().renderer.targets().clone()
    }

    pub fn current_region(&self) -> Option<Region> {
        self.state.borrow().controller.current_region().copied()
    }

    /// Writes the dashboard files and `selection.geojson`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let state = self.state.borrow();
        let mut written = state.renderer.targets().write_to(dir)?;
        let path = output_file_path(dir, "selection.geojson")?;
        let selection = state.controller.layer().to_geojson();
        fs::write(&path, serde_json::to_string_pretty(&selection)?)?;
        written.push(path);
        Ok(written)
    }
}
