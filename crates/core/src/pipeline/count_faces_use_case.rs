use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_sink::{DisplayError, DisplaySink};
use crate::pipeline::loop_logger::LoopLogger;
use crate::shared::clock::Clock;
use crate::shared::constants::QUIT_POLL_WAIT;
use crate::telemetry::domain::telemetry_reporter::{ReportOutcome, TelemetryReporter};

/// Why the main loop stopped.
#[derive(Debug)]
pub enum StopReason {
    QuitRequested,
    CaptureFailed(CaptureError),
    DisplayFailed(DisplayError),
}

#[derive(Debug)]
pub struct LoopSummary {
    /// Completed capture/detect/display/report iterations.
    pub iterations: usize,
    pub reports_sent: usize,
    pub reports_failed: usize,
    pub stop_reason: StopReason,
}

/// The main loop: capture, detect, annotate, display, report, poll quit.
///
/// Runs on the caller's thread until the operator quits or the source or
/// display fails. The source is released and the display closed on every
/// exit path.
pub struct CountFacesUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn DisplaySink>,
    reporter: TelemetryReporter,
    clock: Box<dyn Clock>,
    logger: Box<dyn LoopLogger>,
}

struct Counters {
    iterations: usize,
    reports_sent: usize,
    reports_failed: usize,
}

impl CountFacesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn DisplaySink>,
        reporter: TelemetryReporter,
        clock: Box<dyn Clock>,
        logger: Box<dyn LoopLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            annotator,
            display,
            reporter,
            clock,
            logger,
        }
    }

    pub fn execute(&mut self) -> LoopSummary {
        let mut counters = Counters {
            iterations: 0,
            reports_sent: 0,
            reports_failed: 0,
        };
        let stop_reason = self.run_until_stopped(&mut counters);

        self.source.release();
        self.display.close();
        self.logger.summary();

        log::info!(
            "Stopped after {} iterations ({} reports sent, {} failed)",
            counters.iterations,
            counters.reports_sent,
            counters.reports_failed
        );
        LoopSummary {
            iterations: counters.iterations,
            reports_sent: counters.reports_sent,
            reports_failed: counters.reports_failed,
            stop_reason,
        }
    }

    fn run_until_stopped(&mut self, counters: &mut Counters) -> StopReason {
        loop {
            let stage = Instant::now();
            let mut frame = match self.source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("Failed to grab frame: {e}. Exiting.");
                    return StopReason::CaptureFailed(e);
                }
            };
            self.logger.timing("capture", elapsed_ms(stage));

            let stage = Instant::now();
            let faces = self.detector.detect(&frame);
            self.logger.timing("detect", elapsed_ms(stage));
            self.logger.metric("faces", faces.len() as f64);

            let stage = Instant::now();
            self.annotator.annotate(&mut frame, &faces);
            if let Err(e) = self.display.show(&frame) {
                log::error!("Failed to display frame: {e}. Exiting.");
                return StopReason::DisplayFailed(e);
            }
            self.logger.timing("display", elapsed_ms(stage));

            let stage = Instant::now();
            match self.reporter.maybe_report(faces.len(), self.clock.now()) {
                ReportOutcome::NotDue => {}
                ReportOutcome::Sent { .. } => counters.reports_sent += 1,
                ReportOutcome::Failed { .. } => counters.reports_failed += 1,
            }
            self.logger.timing("report", elapsed_ms(stage));

            self.logger.iteration(counters.iterations);
            counters.iterations += 1;

            if self.display.poll_quit(QUIT_POLL_WAIT) {
                log::info!("Quit requested");
                return StopReason::QuitRequested;
            }
        }
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
