use {crate::Image, base::Vec2};

/// Draws a straight line from `from` to `to` (x = column, y = row).
///
/// The segment is clipped to the image first, then rasterised with Bresenham's
/// algorithm, stamping a square brush exactly `thickness` pixels wide at every step.
/// Even widths extend towards +x and +y.
pub fn draw_line(image: &mut Image, from: Vec2<i32>, to: Vec2<i32>, color: [u8; 3], thickness: u32) {
    let width = image.width() as i32;
    let height = image.height() as i32;
    if width == 0 || height == 0 {
        return;
    }
    let Some((start, end)) = clip_line(from, to, width, height) else {
        return;
    };

    let Vec2 { x: mut x0, y: mut y0 } = start;
    let Vec2 { x: x1, y: y1 } = end;
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let thickness = thickness.max(1) as i32;
    let reach = (-(thickness - 1) / 2, thickness / 2);

    loop {
        stamp(image, x0, y0, reach, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws `points` as an open polyline.
pub fn draw_polyline(image: &mut Image, points: &[Vec2<i32>], color: [u8; 3], thickness: u32) {
    for pair in points.windows(2) {
        draw_line(image, pair[0], pair[1], color, thickness);
    }
}

fn stamp(image: &mut Image, cx: i32, cy: i32, (lo, hi): (i32, i32), color: [u8; 3]) {
    for dy in lo..=hi {
        for dx in lo..=hi {
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 {
                image.set_pixel(x as usize, y as usize, color);
            }
        }
    }
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(p: Vec2<i32>, width: i32, height: i32) -> u8 {
    let mut code = INSIDE;
    if p.x < 0 {
        code |= LEFT;
    } else if p.x >= width {
        code |= RIGHT;
    }
    if p.y < 0 {
        code |= TOP;
    } else if p.y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip_line(
    mut a: Vec2<i32>,
    mut b: Vec2<i32>,
    width: i32,
    height: i32,
) -> Option<(Vec2<i32>, Vec2<i32>)> {
    loop {
        let code_a = outcode(a, width, height);
        let code_b = outcode(b, width, height);
        if (code_a | code_b) == 0 {
            return Some((a, b));
        }
        if (code_a & code_b) != 0 {
            return None;
        }
        let code = if code_a != 0 { code_a } else { code_b };
        let clipped = clip_point(a, b, code, width, height);
        if code == code_a {
            a = clipped;
        } else {
            b = clipped;
        }
    }
}

// intersection of segment a-b with the image edge named by `code`, computed in i64
fn clip_point(a: Vec2<i32>, b: Vec2<i32>, code: u8, width: i32, height: i32) -> Vec2<i32> {
    let (x0, y0, x1, y1) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (x, y) = if code & TOP != 0 {
        (x0 + dx * (0 - y0) / dy, 0)
    } else if code & BOTTOM != 0 {
        let edge = (height - 1) as i64;
        (x0 + dx * (edge - y0) / dy, edge)
    } else if code & LEFT != 0 {
        (0, y0 + dy * (0 - x0) / dx)
    } else {
        let edge = (width - 1) as i64;
        (edge, y0 + dy * (edge - x0) / dx)
    };
    Vec2::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_covers_thickness() {
        for (thickness, rows) in [(1, vec![5]), (2, vec![5, 6]), (3, vec![4, 5, 6])] {
            let mut image = Image::filled(Vec2::new(10, 10), [0, 0, 0]);
            draw_line(&mut image, Vec2::new(5, 5), Vec2::new(5, 5), [9, 9, 9], thickness);
            let drawn: Vec<usize> = (0..10).filter(|&y| image.pixel(5, y) == Some([9, 9, 9])).collect();
            assert_eq!(drawn, rows, "thickness {thickness}");
        }
    }

    #[test]
    fn test_clip_inside_is_unchanged() {
        let a = Vec2::new(1, 1);
        let b = Vec2::new(5, 7);
        assert_eq!(clip_line(a, b, 10, 10), Some((a, b)));
    }

    #[test]
    fn test_clip_fully_outside_is_rejected() {
        assert_eq!(clip_line(Vec2::new(-5, -5), Vec2::new(-1, -9), 10, 10), None);
    }

    #[test]
    fn test_clip_crossing_edge() {
        let clipped = clip_line(Vec2::new(-10, 5), Vec2::new(5, 5), 10, 10);
        assert_eq!(clipped, Some((Vec2::new(0, 5), Vec2::new(5, 5))));
    }
}
