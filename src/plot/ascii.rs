//! Terminal preview of a sampled response.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks after an `lti analyze` run
//! - deterministic output (helpful for golden tests)
//!
//! The series is drawn as a connected `*` trace; a `-` baseline marks `y = 0`
//! when zero lies inside the plotted range.

/// Render `(x, y)` samples into a `width × height` character grid with a one-line header.
pub fn render_ascii_series(label: &str, series: &[(f64, f64)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let finite: Vec<(f64, f64)> = series
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let (x_min, x_max) = bounds(finite.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = bounds(finite.iter().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    if y_min < 0.0 && y_max > 0.0 {
        let row = to_row(0.0, y_min, y_max, height);
        grid[row].iter_mut().for_each(|c| *c = '-');
    }

    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in &finite {
        let cell = (to_col(x, x_min, x_max, width), to_row(y, y_min, y_max, height));
        match prev {
            Some(from) => trace(&mut grid, from, cell),
            None => grid[cell.1][cell.0] = '*',
        }
        prev = Some(cell);
    }

    let mut out = format!("{label}: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n");
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

fn pad(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let margin = ((max - min).abs() * frac).max(1e-12);
    (min - margin, max + margin)
}

fn to_col(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn to_row(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    // Row 0 is the top of the plot (largest y).
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    ((1.0 - u) * (height as f64 - 1.0)).round() as usize
}

/// Bresenham line between two cells, overwriting the baseline but nothing else.
fn trace(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (mut x, mut y) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let cell = &mut grid[y as usize][x as usize];
        if *cell == ' ' || *cell == '-' {
            *cell = '*';
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
