use {
    crate::*,
    anyhow::{Context, Result, bail},
    base::{Vec2, log_info},
    equi::{BoundaryRenderer, Equi2Pers, Projector},
    image::{load, normalize, save},
    preview::{ControllerConfig, HeadlessPreview, InteractiveController, MinifbPreview, Preview},
    std::path::{Path, PathBuf},
    video::{CaptureHandle, FfmpegConfig, FfmpegSource},
};

fn require_input(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("input not found: {}", path.display());
    }
    Ok(())
}

/// Runs the configured mode end to end and returns the path of the written artifact.
pub fn run(config: &HarnessConfig) -> Result<PathBuf> {
    let input = config.input_path();
    require_input(&input)?;

    let projector = Equi2Pers::new(config.pers().clone()).context("configure projector")?;
    match config.mode() {
        Mode::Image => run_image_mode(config, &input, &projector),
        Mode::Video => {
            if config.headless() {
                run_video_mode(config, &input, &projector, &mut HeadlessPreview::new())
            } else {
                let size = Vec2::new(config.pers().width(), config.pers().height());
                let mut window = MinifbPreview::new("draw-bfov - q to quit, wasd to rotate", size)
                    .context("open preview window")?;
                run_video_mode(config, &input, &projector, &mut window)
            }
        }
    }
}

/// Loads one panorama, outlines the view at the configured rotation and saves the overlay.
pub fn run_image_mode<P: Projector>(config: &HarnessConfig, input: &Path, projector: &P) -> Result<PathBuf> {
    let raw = load(input).with_context(|| format!("load '{}'", input.display()))?;
    let equi = normalize(raw)?;
    log_info!(
        "image mode: {}x{} panorama, rotation {:?}",
        equi.width(),
        equi.height(),
        config.rotation()
    );

    let polygon = projector.boundary(&equi, &config.rotation())?;
    let overlay = BoundaryRenderer::new(config.style().clone()).render(&equi, &polygon);

    let output = config.output_path();
    save(&overlay, &output).with_context(|| format!("write '{}'", output.display()))?;
    log_info!("wrote {}", output.display());
    Ok(output)
}

/// Previews a panorama video until it ends or the viewer quits, then saves the latency chart.
///
/// The controller logs the timing summary and any release failure.
pub fn run_video_mode<P: Projector, V: Preview>(
    config: &HarnessConfig,
    input: &Path,
    projector: &P,
    preview: &mut V,
) -> Result<PathBuf> {
    let source = FfmpegSource::open(&FfmpegConfig::new(input))
        .with_context(|| format!("open video '{}'", input.display()))?;
    let controller = InteractiveController::new(projector, ControllerConfig::default());
    let report = controller.run(CaptureHandle::open(source), preview)?;

    let output = config.output_path();
    save(&report.chart, &output).with_context(|| format!("write '{}'", output.display()))?;
    log_info!("wrote {}", output.display());
    Ok(output)
}
