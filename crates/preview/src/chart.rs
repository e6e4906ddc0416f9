use {
    crate::*,
    base::Vec2,
    image::{Image, draw_line, draw_polyline},
};

pub const CHART_WIDTH: usize = 640;
pub const CHART_HEIGHT: usize = 480;

const MARGIN_LEFT: i32 = 60;
const MARGIN_RIGHT: i32 = 20;
const MARGIN_TOP: i32 = 20;
const MARGIN_BOTTOM: i32 = 40;
const GRID_LINES: i32 = 4;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const AXIS: [u8; 3] = [0, 0, 0];
const GRID: [u8; 3] = [220, 220, 220];
const SERIES: [u8; 3] = [31, 119, 180];
const MEAN: [u8; 3] = [214, 39, 40];

/// Latency over frame index.
///
/// The x axis spans the recorded frames, the y axis runs from zero to 110% of the
/// slowest frame. Grid lines split the y range into quarters; the mean is a
/// horizontal line across the plot.
pub fn render_timing_chart(timings: &FrameTimings) -> Image {
    let mut chart = Image::filled(Vec2::new(CHART_WIDTH, CHART_HEIGHT), BACKGROUND);

    let left = MARGIN_LEFT;
    let right = CHART_WIDTH as i32 - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = CHART_HEIGHT as i32 - MARGIN_BOTTOM;
    let plot_w = (right - left) as f64;
    let plot_h = (bottom - top) as f64;

    for i in 1..=GRID_LINES {
        let y = bottom - (plot_h * i as f64 / GRID_LINES as f64).round() as i32;
        draw_line(&mut chart, Vec2::new(left, y), Vec2::new(right, y), GRID, 1);
    }
    draw_line(&mut chart, Vec2::new(left, bottom), Vec2::new(right, bottom), AXIS, 1);
    draw_line(&mut chart, Vec2::new(left, bottom), Vec2::new(left, top), AXIS, 1);

    let Some(max) = timings.max() else {
        return chart;
    };
    let y_max = (max.as_secs_f64() * 1.1).max(f64::MIN_POSITIVE);
    let to_y = |secs: f64| bottom - (secs / y_max * plot_h).round() as i32;

    let n = timings.len();
    let step = if n > 1 { plot_w / (n - 1) as f64 } else { 0.0 };
    let points: Vec<Vec2<i32>> = timings
        .samples()
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = left + (i as f64 * step).round() as i32;
            Vec2::new(x, to_y(sample.as_secs_f64()))
        })
        .collect();
    if let [point] = points.as_slice() {
        draw_line(&mut chart, *point, *point, SERIES, 3);
    } else {
        draw_polyline(&mut chart, &points, SERIES, 1);
    }

    if let Some(mean) = timings.mean() {
        let y = to_y(mean.as_secs_f64());
        draw_line(&mut chart, Vec2::new(left, y), Vec2::new(right, y), MEAN, 1);
    }
    chart
}
