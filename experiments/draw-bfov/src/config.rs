use {
    equi::{BoundaryStyle, PersConfig, Rotation},
    std::{
        env,
        f32::consts::{FRAC_PI_2, PI},
        path::{Path, PathBuf},
    },
};

pub const DATA_DIR_ENV: &str = "BFOV_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RESULTS_DIR: &str = "./results";
pub const DEFAULT_IMAGE: &str = "equi.jpg";
pub const DEFAULT_VIDEO: &str = "R0010028_er_30.MP4";
pub const OVERLAY_FILE: &str = "test_bounding_box.jpg";
pub const CHART_FILE: &str = "times_equi2pers_numpy_video.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Draw the boundary of one view onto a still panorama.
    Image,
    /// Preview a panorama video interactively and chart the projection latency.
    Video,
}

#[derive(Clone, Debug)]
pub struct HarnessConfig {
    mode: Mode,
    data: Option<PathBuf>,
    data_dir: PathBuf,
    results_dir: PathBuf,
    rotation: Rotation,
    pers: PersConfig,
    style: BoundaryStyle,
    headless: bool,
    log_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self {
            mode: Mode::Image,
            data: None,
            data_dir,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            rotation: Rotation::new(0.0, FRAC_PI_2, PI),
            pers: PersConfig::default(),
            style: BoundaryStyle::default(),
            headless: false,
            log_dir: None,
        }
    }
}

impl HarnessConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `data` instead of the mode's default input file.
    pub fn with_data(mut self, data: Option<PathBuf>) -> Self {
        self.data = data;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_results_dir(mut self, results_dir: impl Into<PathBuf>) -> Self {
        self.results_dir = results_dir.into();
        self
    }

    /// Set the view rotation used by image mode.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pers(mut self, pers: PersConfig) -> Self {
        self.pers = pers;
        self
    }

    pub fn with_style(mut self, style: BoundaryStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pers(&self) -> &PersConfig {
        &self.pers
    }

    pub fn style(&self) -> &BoundaryStyle {
        &self.style
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// The explicit data path, or the mode's default file under the data directory.
    pub fn input_path(&self) -> PathBuf {
        match &self.data {
            Some(path) => path.clone(),
            None => match self.mode {
                Mode::Image => self.data_dir.join(DEFAULT_IMAGE),
                Mode::Video => self.data_dir.join(DEFAULT_VIDEO),
            },
        }
    }

    /// Where the mode writes its artifact.
    pub fn output_path(&self) -> PathBuf {
        match self.mode {
            Mode::Image => self.results_dir.join(OVERLAY_FILE),
            Mode::Video => self.results_dir.join(CHART_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = HarnessConfig::default().with_data_dir("./data");
        assert_eq!(config.input_path(), PathBuf::from("./data/equi.jpg"));
        assert_eq!(
            config.output_path(),
            PathBuf::from("./results/test_bounding_box.jpg")
        );

        let config = config.with_mode(Mode::Video);
        assert_eq!(config.input_path(), PathBuf::from("./data/R0010028_er_30.MP4"));
        assert_eq!(
            config.output_path(),
            PathBuf::from("./results/times_equi2pers_numpy_video.png")
        );
    }

    #[test]
    fn test_explicit_data_wins() {
        let config = HarnessConfig::default()
            .with_mode(Mode::Video)
            .with_data(Some(PathBuf::from("/tmp/clip.mp4")));
        assert_eq!(config.input_path(), PathBuf::from("/tmp/clip.mp4"));
    }

    #[test]
    fn test_default_rotation_looks_down_and_back() {
        assert_eq!(
            HarnessConfig::default().rotation(),
            Rotation::new(0.0, FRAC_PI_2, PI)
        );
    }
}
