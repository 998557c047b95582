//! Composite 2×2 response figure rendered with Plotters.
//!
//! Layout (row-major):
//!
//! ```text
//! +----------------------+----------------------+
//! | impulse (linear)     | step (linear)        |
//! +----------------------+----------------------+
//! | magnitude (log-x)    | phase (log-x)        |
//! +----------------------+----------------------+
//! ```
//!
//! The figure is drawn into an in-memory SVG document and then written with
//! an atomic rename, so a concurrent reader never sees a half-written file.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::info;

use crate::domain::ResponseSet;
use crate::error::AppError;
use crate::io::write_atomic;

/// Pixel size of the composite figure.
pub const FIGURE_SIZE: (u32, u32) = (1200, 800);

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

/// Static description of one panel.
struct Panel {
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
    label: &'static str,
    color: RGBColor,
}

const IMPULSE: Panel = Panel {
    title: "Impulse Response",
    x_desc: "Time (s)",
    y_desc: "Amplitude",
    label: "Impulse Response",
    color: RGBColor(31, 119, 180),
};

const STEP: Panel = Panel {
    title: "Step Response",
    x_desc: "Time (s)",
    y_desc: "Amplitude",
    label: "Step Response",
    color: RGBColor(255, 105, 180),
};

const MAGNITUDE: Panel = Panel {
    title: "Frequency Response - Magnitude",
    x_desc: "Frequency (rad/s)",
    y_desc: "Magnitude (dB)",
    label: "Magnitude Response",
    color: RGBColor(31, 119, 180),
};

const PHASE: Panel = Panel {
    title: "Frequency Response - Phase",
    x_desc: "Frequency (rad/s)",
    y_desc: "Phase (degrees)",
    label: "Phase Response",
    color: RGBColor(255, 165, 0),
};

/// Render the composite figure to `output_path`, replacing any existing file.
pub fn render(responses: &ResponseSet, display_string: &str, output_path: &Path) -> Result<PathBuf, AppError> {
    let svg = render_svg(responses, display_string)?;
    write_atomic(output_path, svg.as_bytes()).map_err(|e| {
        AppError::render(format!(
            "Failed to write plot '{}': {e}",
            output_path.display()
        ))
    })?;
    info!(path = %output_path.display(), bytes = svg.len(), "plot written");
    Ok(output_path.to_path_buf())
}

/// Render the composite figure into an SVG document.
pub fn render_svg(responses: &ResponseSet, display_string: &str) -> Result<String, AppError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        draw_figure(&root, responses, display_string)
            .and_then(|()| root.present())
            .map_err(|e| AppError::render(format!("Failed to draw plot: {e}")))?;
    }
    Ok(svg)
}

fn draw_figure(root: &Area<'_>, responses: &ResponseSet, display_string: &str) -> DrawResult<()> {
    root.fill(&WHITE)?;
    let body = root.titled(display_string, ("sans-serif", 22))?;
    let panels = body.split_evenly((2, 2));

    let horizon = responses.horizon();
    draw_linear_panel(&panels[0], &responses.impulse, horizon, &IMPULSE)?;
    draw_linear_panel(&panels[1], &responses.step, horizon, &STEP)?;
    draw_log_panel(&panels[2], &responses.magnitude_series(), &MAGNITUDE)?;
    draw_log_panel(&panels[3], &responses.phase_series(), &PHASE)?;
    Ok(())
}

fn draw_linear_panel(area: &Area<'_>, series: &[(f64, f64)], horizon: f64, panel: &Panel) -> DrawResult<()> {
    let x1 = if horizon > 0.0 { horizon } else { 1.0 };
    let (y0, y1) = axis_range(series.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .draw()?;

    let color = panel.color;
    chart
        .draw_series(LineSeries::new(series.iter().copied(), color.stroke_width(2)))?
        .label(panel.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_log_panel(area: &Area<'_>, series: &[(f64, f64)], panel: &Panel) -> DrawResult<()> {
    let (w0, w1) = match (series.first(), series.last()) {
        (Some(&(a, _)), Some(&(b, _))) if a > 0.0 && b > a => (a, b),
        _ => (1e-2, 1e2),
    };
    let (y0, y1) = axis_range(series.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d((w0..w1).log_scale(), y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .draw()?;

    let color = panel.color;
    chart
        .draw_series(LineSeries::new(series.iter().copied(), color.stroke_width(2)))?
        .label(panel.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Value range padded by 5%; flat series get a unit band around their level.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !(lo.is_finite() && hi.is_finite()) {
        return (-1.0, 1.0);
    }
    let span = hi - lo;
    if span < 1e-9 * (1.0 + hi.abs()) {
        let mid = 0.5 * (lo + hi);
        let pad = (mid.abs() * 0.1).max(1.0);
        return (mid - pad, mid + pad);
    }
    let pad = span * 0.05;
    (lo - pad, hi + pad)
}
