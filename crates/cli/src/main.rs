use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;

use facecount_core::annotation::infrastructure::overlay_annotator::OverlayAnnotator;
use facecount_core::capture::domain::frame_source::FrameSource;
use facecount_core::capture::infrastructure::image_directory_source::ImageDirectorySource;
use facecount_core::detection::infrastructure::heuristic_face_detector::HeuristicFaceDetector;
use facecount_core::display::domain::display_sink::DisplaySink;
use facecount_core::display::infrastructure::console_display::ConsoleDisplay;
use facecount_core::pipeline::count_faces_use_case::{CountFacesUseCase, StopReason};
use facecount_core::pipeline::loop_logger::SummaryLoopLogger;
use facecount_core::shared::clock::SystemClock;
use facecount_core::shared::constants::{
    DEFAULT_REPORT_URL, QUIT_KEY, REPORT_INTERVAL, REPORT_TIMEOUT, WINDOW_TITLE,
};
use facecount_core::telemetry::domain::telemetry_reporter::TelemetryReporter;
use facecount_core::telemetry::infrastructure::http_report_transport::HttpReportTransport;

/// Counts face-shaped regions in a live camera feed and reports the count
/// to a remote receiver.
///
/// Camera capture and the preview window are opt-in Cargo features; see the
/// notes below the options for what this build includes.
#[derive(Parser)]
#[command(name = "facecount", after_help = build_features_help())]
struct Cli {
    /// Receiver endpoint for count reports.
    #[arg(long, default_value = DEFAULT_REPORT_URL)]
    url: String,

    /// Seconds between count reports.
    #[arg(long, default_value_t = REPORT_INTERVAL.as_secs())]
    interval_secs: u64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = REPORT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Camera device index.
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Replay still images from this directory instead of a camera.
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Print counts to the console instead of opening a window.
    #[arg(long)]
    headless: bool,
}

fn build_features_help() -> String {
    let status = |enabled: bool| if enabled { "included" } else { "NOT included" };
    format!(
        "Native backends (Cargo features of this binary):\n  \
         camera  live webcam capture, {}\n  \
         window  \"{WINDOW_TITLE}\" preview window, {}\n\n\
         Build both with `cargo build --release --features camera,window`.\n\
         Without camera support pass --input-dir to replay still images; \
         without window support frames are logged and `q` + Enter quits.",
        status(cfg!(feature = "camera")),
        status(cfg!(feature = "window")),
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let source = open_source(&cli)?;
    let transport = HttpReportTransport::new(&cli.url, Duration::from_secs(cli.timeout_secs))?;
    let url = transport.url().to_string();
    let reporter = TelemetryReporter::starting_at(
        Box::new(transport),
        Duration::from_secs(cli.interval_secs),
        Instant::now(),
    );
    let display = open_display(cli.headless);

    log::info!(
        "Reporting to {url} every {}s. Press '{QUIT_KEY}' to quit.",
        reporter.interval().as_secs()
    );

    let mut use_case = CountFacesUseCase::new(
        source,
        Box::new(HeuristicFaceDetector::new()),
        Box::new(OverlayAnnotator::new()),
        display,
        reporter,
        Box::new(SystemClock),
        Box::new(SummaryLoopLogger::default()),
    );
    let summary = use_case.execute();

    match summary.stop_reason {
        StopReason::QuitRequested | StopReason::CaptureFailed(_) => Ok(()),
        StopReason::DisplayFailed(e) => Err(e.into()),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.interval_secs == 0 {
        return Err("Report interval must be at least 1 second".into());
    }
    if cli.timeout_secs == 0 {
        return Err("Request timeout must be at least 1 second".into());
    }
    if let Some(dir) = &cli.input_dir {
        if !dir.is_dir() {
            return Err(format!("Input directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn open_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    if let Some(dir) = &cli.input_dir {
        let source = ImageDirectorySource::open(dir)?;
        log::info!("Replaying {} images from {}", source.len(), dir.display());
        return Ok(Box::new(source));
    }
    open_camera(cli.camera)
}

#[cfg(feature = "camera")]
fn open_camera(index: u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use facecount_core::capture::infrastructure::webcam_source::WebcamSource;

    log::info!("Opening camera {index}");
    Ok(Box::new(WebcamSource::open(index)?))
}

#[cfg(not(feature = "camera"))]
fn open_camera(_index: u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("Built without camera support; rebuild with `--features camera` or pass --input-dir (see --help)".into())
}

#[cfg(feature = "window")]
fn open_display(headless: bool) -> Box<dyn DisplaySink> {
    use facecount_core::display::infrastructure::window_display::WindowDisplay;

    if headless {
        Box::new(ConsoleDisplay::new())
    } else {
        Box::new(WindowDisplay::new(WINDOW_TITLE))
    }
}

#[cfg(not(feature = "window"))]
fn open_display(_headless: bool) -> Box<dyn DisplaySink> {
    Box::new(ConsoleDisplay::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_fixed_settings() {
        let cli = Cli::try_parse_from(["facecount"]).unwrap();
        assert_eq!(cli.url, DEFAULT_REPORT_URL);
        assert_eq!(cli.interval_secs, 5);
        assert_eq!(cli.timeout_secs, 2);
        assert_eq!(cli.camera, 0);
        assert!(cli.input_dir.is_none());
        assert!(!cli.headless);
    }

    #[test]
    fn test_help_explains_native_features() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("--features camera,window"));
        assert!(help.contains(WINDOW_TITLE));
        let camera_line = help
            .lines()
            .find(|line| line.trim_start().starts_with("camera "))
            .unwrap();
        assert_eq!(
            camera_line.ends_with("NOT included"),
            !cfg!(feature = "camera")
        );
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let cli = Cli::try_parse_from(["facecount", "--interval-secs", "0"]).unwrap();
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_missing_input_dir_is_rejected() {
        let cli =
            Cli::try_parse_from(["facecount", "--input-dir", "/nonexistent/facecount-frames"])
                .unwrap();
        assert!(validate(&cli).is_err());
    }

    #[cfg(not(feature = "camera"))]
    #[test]
    fn test_camera_request_without_support_points_to_feature() {
        let err = open_camera(0).err().unwrap();
        assert!(err.to_string().contains("--features camera"));
    }
}
