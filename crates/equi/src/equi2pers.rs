use {
    crate::*,
    base::{Tensor, log_debug},
    image::Image,
    std::{f32::consts::PI, str::FromStr},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Bilinear,
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Interpolation::Nearest),
            "bilinear" => Ok(Interpolation::Bilinear),
            other => Err(format!("unknown interpolation mode: {other}")),
        }
    }
}

/// Output geometry of the perspective camera.
#[derive(Clone, Debug)]
pub struct PersConfig {
    height: usize,
    width: usize,
    fov_x: f32,
    mode: Interpolation,
}

impl Default for PersConfig {
    fn default() -> Self {
        Self {
            height: 480,
            width: 640,
            fov_x: 90.0,
            mode: Interpolation::Bilinear,
        }
    }
}

impl PersConfig {
    /// Set the output height in pixels.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the output width in pixels.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the horizontal field of view in degrees.
    pub fn with_fov_x(mut self, fov_x: f32) -> Self {
        self.fov_x = fov_x;
        self
    }

    /// Set the sampling mode.
    pub fn with_mode(mut self, mode: Interpolation) -> Self {
        self.mode = mode;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn fov_x(&self) -> f32 {
        self.fov_x
    }

    pub fn mode(&self) -> Interpolation {
        self.mode
    }
}

/// Pinhole camera looking into an equirectangular panorama.
///
/// Longitude 0 sits on the centre column and grows to the left; latitude +pi/2 is row 0.
/// Sampling wraps horizontally across the seam and clamps vertically.
pub struct Equi2Pers {
    config: PersConfig,
    // unit camera rays, row-major over the output image
    rays: Vec<[f32; 3]>,
}

impl Equi2Pers {
    pub fn new(config: PersConfig) -> Result<Self, EquiError> {
        if config.width == 0 || config.height == 0 {
            return Err(EquiError::Config(format!(
                "output size must be non-zero, got {}x{}",
                config.width, config.height
            )));
        }
        if !(config.fov_x > 0.0 && config.fov_x < 180.0) {
            return Err(EquiError::Config(format!(
                "fov_x must be inside (0, 180) degrees, got {}",
                config.fov_x
            )));
        }

        let (w, h) = (config.width, config.height);
        let focal = w as f32 / (2.0 * (config.fov_x.to_radians() / 2.0).tan());
        let cx = (w as f32 - 1.0) / 2.0;
        let cy = (h as f32 - 1.0) / 2.0;
        let mut rays = Vec::with_capacity(w * h);
        for v in 0..h {
            for u in 0..w {
                let d = [focal, cx - u as f32, cy - v as f32];
                let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
                rays.push([d[0] / norm, d[1] / norm, d[2] / norm]);
            }
        }
        log_debug!(
            "equi2pers: {}x{} fov_x {} ({:?}), focal {:.2}",
            w,
            h,
            config.fov_x,
            config.mode,
            focal
        );
        Ok(Self { config, rays })
    }

    pub fn config(&self) -> &PersConfig {
        &self.config
    }

    // continuous equirectangular position of a rotated ray, in pixel units
    fn locate(m: &Mat3, ray: [f32; 3], eq_w: usize, eq_h: usize) -> (f32, f32) {
        let r = mat_vec(m, ray);
        let lon = r[1].atan2(r[0]);
        let lat = r[2].clamp(-1.0, 1.0).asin();
        let x = (0.5 - lon / (2.0 * PI)) * eq_w as f32;
        let y = (0.5 - lat / PI) * eq_h as f32;
        (x, y)
    }

    /// Output pixels in border order: clockwise from the top-left corner, each corner once.
    fn border(&self) -> Vec<(usize, usize)> {
        let (w, h) = (self.config.width, self.config.height);
        let mut out = Vec::with_capacity(2 * (w + h));
        out.extend((0..w).map(|u| (u, 0)));
        out.extend((1..h).map(|v| (w - 1, v)));
        if h > 1 {
            out.extend((0..w - 1).rev().map(|u| (u, h - 1)));
        }
        if w > 1 {
            out.extend((1..h - 1).rev().map(|v| (0, v)));
        }
        out
    }
}

fn check_equi(equi: &Image) -> Result<(), EquiError> {
    if equi.width() == 0 || equi.height() == 0 {
        return Err(EquiError::Input(format!(
            "equirectangular image is empty: {:?}",
            equi.shape()
        )));
    }
    Ok(())
}

impl Projector for Equi2Pers {
    fn project(&self, equi: &Image, rotation: &Rotation) -> Result<Image, EquiError> {
        check_equi(equi)?;
        let (eq_w, eq_h) = (equi.width(), equi.height());
        let planes = [equi.plane(0), equi.plane(1), equi.plane(2)];
        let m = rotation.matrix();
        let out_plane = self.rays.len();
        let mut data = vec![0u8; out_plane * 3];

        for (i, &ray) in self.rays.iter().enumerate() {
            let (x, y) = Self::locate(&m, ray, eq_w, eq_h);
            // pixel centres sit at half-integer positions
            let (x, y) = (x - 0.5, y - 0.5);
            match self.config.mode {
                Interpolation::Nearest => {
                    let xi = (x.round() as i64).rem_euclid(eq_w as i64) as usize;
                    let yi = (y.round() as i64).clamp(0, eq_h as i64 - 1) as usize;
                    let src = yi * eq_w + xi;
                    for (c, plane) in planes.iter().enumerate() {
                        data[c * out_plane + i] = plane[src];
                    }
                }
                Interpolation::Bilinear => {
                    let x0 = x.floor();
                    let y0 = y.floor();
                    let fx = x - x0;
                    let fy = y - y0;
                    let xa = (x0 as i64).rem_euclid(eq_w as i64) as usize;
                    let xb = (x0 as i64 + 1).rem_euclid(eq_w as i64) as usize;
                    let ya = (y0 as i64).clamp(0, eq_h as i64 - 1) as usize;
                    let yb = (y0 as i64 + 1).clamp(0, eq_h as i64 - 1) as usize;
                    for (c, plane) in planes.iter().enumerate() {
                        let top = plane[ya * eq_w + xa] as f32 * (1.0 - fx)
                            + plane[ya * eq_w + xb] as f32 * fx;
                        let bottom = plane[yb * eq_w + xa] as f32 * (1.0 - fx)
                            + plane[yb * eq_w + xb] as f32 * fx;
                        let value = top * (1.0 - fy) + bottom * fy;
                        data[c * out_plane + i] = value.round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }

        let tensor = Tensor::new(vec![3, self.config.height, self.config.width], data)?;
        Ok(Image::from_planar(tensor)?)
    }

    fn boundary(&self, equi: &Image, rotation: &Rotation) -> Result<BoundaryPolygon, EquiError> {
        check_equi(equi)?;
        let (eq_w, eq_h) = (equi.width(), equi.height());
        let m = rotation.matrix();
        let points = self
            .border()
            .into_iter()
            .map(|(u, v)| {
                let (x, y) = Self::locate(&m, self.rays[v * self.config.width + u], eq_w, eq_h);
                let col = (x.floor() as i64).rem_euclid(eq_w as i64) as i32;
                let row = (y.floor() as i64).clamp(0, eq_h as i64 - 1) as i32;
                BoundaryPoint::new(row, col)
            })
            .collect();
        Ok(BoundaryPolygon::new(points))
    }
}
