use {
    base::{Level, init_file_logger, init_stdout_logger, log_fatal},
    clap::{Parser, ValueEnum},
    draw_bfov::{HarnessConfig, Mode},
    equi::{BoundaryStyle, Interpolation, PersConfig, Rotation},
    std::path::PathBuf,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Nearest,
    Bilinear,
}

impl From<ModeArg> for Interpolation {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Nearest => Interpolation::Nearest,
            ModeArg::Bilinear => Interpolation::Bilinear,
        }
    }
}

/// Boundary-FOV preview for equirectangular panoramas.
#[derive(Parser, Debug)]
#[command(name = "draw-bfov", version)]
struct Cli {
    /// Preview a video interactively instead of outlining a still image.
    #[arg(long)]
    video: bool,

    /// Input file; defaults to equi.jpg or R0010028_er_30.MP4 in the data directory.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory holding the default inputs.
    #[arg(long, env = "BFOV_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Directory the overlay or chart is written to.
    #[arg(long, default_value = "./results")]
    results: PathBuf,

    /// Perspective height in pixels.
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Perspective width in pixels.
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Sampling mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Bilinear)]
    mode: ModeArg,

    /// Segments whose row or column jump reaches this many pixels are not drawn.
    #[arg(long, default_value_t = 100)]
    seam_threshold: u32,

    /// Image mode roll in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    roll: f32,

    /// Image mode pitch in radians.
    #[arg(long, default_value_t = std::f32::consts::FRAC_PI_2, allow_hyphen_values = true)]
    pitch: f32,

    /// Image mode yaw in radians.
    #[arg(long, default_value_t = std::f32::consts::PI, allow_hyphen_values = true)]
    yaw: f32,

    /// Run the video loop without a window.
    #[arg(long)]
    headless: bool,

    /// Write logs to dated files in this directory instead of stdout.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> HarnessConfig {
        let mode = if self.video { Mode::Video } else { Mode::Image };
        HarnessConfig::default()
            .with_mode(mode)
            .with_data(self.data.clone())
            .with_data_dir(&self.data_dir)
            .with_results_dir(&self.results)
            .with_rotation(Rotation::new(self.roll, self.pitch, self.yaw))
            .with_pers(
                PersConfig::default()
                    .with_height(self.height)
                    .with_width(self.width)
                    .with_fov_x(self.fov)
                    .with_mode(self.mode.into()),
            )
            .with_style(BoundaryStyle::default().with_seam_threshold(self.seam_threshold))
            .with_headless(self.headless)
            .with_log_dir(self.log_dir.clone())
    }

    fn log_level(&self) -> Level {
        if self.verbose {
            return Level::Debug;
        }
        std::env::var("BFOV_LOG")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Level::Info)
    }
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config();

    match config.log_dir() {
        Some(dir) => {
            if let Err(error) = init_file_logger(dir, cli.log_level()) {
                eprintln!("cannot log to {}: {error:#}", dir.display());
                std::process::exit(1);
            }
        }
        None => init_stdout_logger(cli.log_level()),
    }

    if let Err(error) = draw_bfov::run(&config) {
        log_fatal!("{:#}", error);
    }
}
