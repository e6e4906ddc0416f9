use base::{Tensor, Vec2};
use equi::{
    BoundaryRenderer, EquiError, Equi2Pers, Interpolation, PersConfig, Projector, Rotation,
};
use image::Image;
use std::f32::consts::{FRAC_PI_2, PI};

// 3 x height x width panorama whose red channel encodes the column and green the row
fn gradient_equi(width: usize, height: usize) -> Image {
    let mut image = Image::filled(Vec2::new(width, height), [0, 0, 0]);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 256 / width) as u8;
            let g = (y * 256 / height) as u8;
            image.set_pixel(x, y, [r, g, 40]);
        }
    }
    image
}

fn seam_pairs(renderer: &BoundaryRenderer, polygon: &equi::BoundaryPolygon) -> usize {
    polygon
        .cyclic_pairs()
        .filter(|&(a, b)| renderer.crosses_seam(a, b))
        .count()
}

#[test]
fn test_config_defaults() {
    let config = PersConfig::default();
    assert_eq!(config.height(), 480);
    assert_eq!(config.width(), 640);
    assert_eq!(config.fov_x(), 90.0);
    assert_eq!(config.mode(), Interpolation::Bilinear);
}

#[test]
fn test_interpolation_from_str() {
    assert_eq!("nearest".parse::<Interpolation>(), Ok(Interpolation::Nearest));
    assert_eq!("Bilinear".parse::<Interpolation>(), Ok(Interpolation::Bilinear));
    assert!("bicubic".parse::<Interpolation>().is_err());
}

#[test]
fn test_invalid_config_is_rejected() {
    for config in [
        PersConfig::default().with_width(0),
        PersConfig::default().with_height(0),
        PersConfig::default().with_fov_x(0.0),
        PersConfig::default().with_fov_x(180.0),
    ] {
        assert!(matches!(Equi2Pers::new(config), Err(EquiError::Config(_))));
    }
}

#[test]
fn test_project_output_shape() {
    let projector = Equi2Pers::new(PersConfig::default().with_width(32).with_height(24)).unwrap();
    let pers = projector
        .project(&gradient_equi(128, 64), &Rotation::default())
        .unwrap();
    assert_eq!(pers.shape(), &[3, 24, 32]);
}

#[test]
fn test_project_centre_looks_at_panorama_centre() {
    let projector = Equi2Pers::new(
        PersConfig::default()
            .with_width(9)
            .with_height(9)
            .with_mode(Interpolation::Nearest),
    )
    .unwrap();
    let equi = gradient_equi(64, 32);
    let pers = projector.project(&equi, &Rotation::default()).unwrap();

    assert_eq!(pers.pixel(4, 4), equi.pixel(32, 16));
}

#[test]
fn test_project_uniform_panorama_stays_uniform() {
    let equi = Image::filled(Vec2::new(64, 32), [90, 60, 30]);
    for mode in [Interpolation::Nearest, Interpolation::Bilinear] {
        let projector = Equi2Pers::new(
            PersConfig::default()
                .with_width(16)
                .with_height(12)
                .with_mode(mode),
        )
        .unwrap();
        let pers = projector.project(&equi, &Rotation::new(0.3, -0.4, 2.0)).unwrap();
        assert_eq!(pers, Image::filled(Vec2::new(16, 12), [90, 60, 30]));
    }
}

#[test]
fn test_bilinear_sampling_wraps_across_seam() {
    // only the two edge columns carry red
    let mut equi = Image::filled(Vec2::new(64, 32), [0, 0, 0]);
    for y in 0..32 {
        equi.set_pixel(0, y, [200, 0, 0]);
        equi.set_pixel(63, y, [100, 0, 0]);
    }
    let projector = Equi2Pers::new(PersConfig::default().with_width(9).with_height(9)).unwrap();
    let pers = projector.project(&equi, &Rotation::new(0.0, 0.0, PI)).unwrap();

    let [r, _, _] = pers.pixel(4, 4).unwrap();
    assert!((148..=152).contains(&r), "red was {r}");
}

#[test]
fn test_project_rejects_empty_panorama() {
    let projector = Equi2Pers::new(PersConfig::default().with_width(4).with_height(4)).unwrap();
    let empty = Image::from_planar(Tensor::new(vec![3, 0, 0], vec![]).unwrap()).unwrap();
    assert!(matches!(
        projector.project(&empty, &Rotation::default()),
        Err(EquiError::Input(_))
    ));
    assert!(projector.boundary(&empty, &Rotation::default()).is_err());
}

#[test]
fn test_boundary_point_count_follows_border() {
    let projector = Equi2Pers::new(PersConfig::default().with_width(64).with_height(48)).unwrap();
    let polygon = projector
        .boundary(&gradient_equi(256, 128), &Rotation::default())
        .unwrap();
    assert_eq!(polygon.len(), 2 * 64 + 2 * 48 - 4);
}

#[test]
fn test_boundary_at_rest_is_centred_and_seam_free() {
    let projector = Equi2Pers::new(PersConfig::default()).unwrap();
    let equi = gradient_equi(1024, 512);
    let polygon = projector.boundary(&equi, &Rotation::default()).unwrap();

    // 90 degree FOV spans a quarter of the width around the centre column
    for point in polygon.points() {
        assert!((380..=644).contains(&point.col), "col {}", point.col);
        assert!((140..=372).contains(&point.row), "row {}", point.row);
    }

    let renderer = BoundaryRenderer::default();
    assert_eq!(seam_pairs(&renderer, &polygon), 0);
    assert_eq!(renderer.segments(&polygon).len(), polygon.len());
}

#[test]
fn test_boundary_facing_the_seam_splits_top_and_bottom_edges() {
    let projector = Equi2Pers::new(PersConfig::default()).unwrap();
    let equi = gradient_equi(1024, 512);
    let polygon = projector.boundary(&equi, &Rotation::new(0.0, 0.0, PI)).unwrap();

    let renderer = BoundaryRenderer::default();
    assert_eq!(seam_pairs(&renderer, &polygon), 2);
    assert_eq!(renderer.segments(&polygon).len(), polygon.len() - 2);
}

#[test]
fn test_boundary_around_the_pole_wraps_once() {
    let projector = Equi2Pers::new(PersConfig::default()).unwrap();
    let equi = gradient_equi(1024, 512);
    let polygon = projector
        .boundary(&equi, &Rotation::new(0.0, FRAC_PI_2, PI))
        .unwrap();

    // looking straight down: the outline circles the nadir in the lower half
    for point in polygon.points() {
        assert!(point.row > 256, "row {}", point.row);
        assert!((0..1024).contains(&point.col));
    }

    let renderer = BoundaryRenderer::default();
    assert_eq!(seam_pairs(&renderer, &polygon), 1);

    let out = renderer.render(&equi, &polygon);
    assert_eq!(out.shape(), &[3, 512, 1024]);
    assert_ne!(out, equi);
}
