use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::ops::Range;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbImage};
use log::info;
use plotters::prelude::*;

use crate::chart::{format_tick, Chart, Line};
use crate::error::{Error, Result};
use crate::scales::XCoord;

/// Output size in pixels (a 10×6 inch figure at 100 dpi).
pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 600;

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

/// Rasterize `chart` and write it as a PNG to `path`.
///
/// The file is created before anything is drawn, so an unwritable path
/// fails fast with [`Error::Io`]. A chart that fails to draw, encode or
/// flush leaves no regular file behind.
pub fn render_and_persist(chart: &Chart, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let result = rasterize(chart, path).and_then(|image| write_png(&image, file, path));

    match &result {
        Ok(()) => info!("wrote {}", path.display()),
        // Only partial chart files are removed, never devices or pipes.
        Err(_) if is_regular_file(path) => {
            let _ = std::fs::remove_file(path);
        }
        Err(_) => {}
    }
    result
}

/// Encode `image` into `writer` and flush it, so a full disk surfaces here
/// instead of being dropped with the buffer.
fn write_png<W: Write + Seek>(image: &RgbImage, writer: W, path: &Path) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(writer);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => io_error(source),
            source => Error::Encode {
                path: path.to_path_buf(),
                source,
            },
        })?;
    writer.flush().map_err(io_error)
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

fn rasterize(chart: &Chart, path: &Path) -> Result<RgbImage> {
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    draw_chart(chart, &mut buffer).map_err(|e| Error::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    RgbImage::from_raw(WIDTH, HEIGHT, buffer).ok_or_else(|| Error::Render {
        path: path.to_path_buf(),
        message: "pixel buffer does not match image size".to_string(),
    })
}

fn draw_chart(chart: &Chart, buffer: &mut [u8]) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::with_buffer(buffer, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let log = chart.options.log_x_axis;
    let axis = chart.axis();
    let visible: Vec<_> = chart
        .lines
        .iter()
        .map(|line| (line, axis.visible_points(&line.points)))
        .collect();
    let (x_range, y_range) = bounds(visible.iter().flat_map(|(_, pts)| pts.iter().copied()), log);

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(XCoord::new(x_range, &chart.options), y_range)?;

    let x_formatter = |v: &f64| format_tick(*v, log);
    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .label_style(("sans-serif", 14));
    if !chart.options.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (line, points) in &visible {
        let color = to_rgb(line);
        ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        if chart.options.show_markers {
            ctx.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
        }
    }

    if chart.options.show_legend && !visible.is_empty() {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn to_rgb(line: &Line) -> RGBColor {
    let (r, g, b) = line.color.into_components();
    RGBColor(r, g, b)
}

/// Padded data bounds; falls back to a unit range when there is nothing to
/// show. A log x range is padded by a ratio and stays positive.
fn bounds(points: impl Iterator<Item = (f64, f64)>, log_x: bool) -> (Range<f64>, Range<f64>) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (px, py) in points {
        x = (x.0.min(px), x.1.max(px));
        y = (y.0.min(py), y.1.max(py));
    }
    let x = if log_x { padded_log(x) } else { padded(x) };
    (x, padded(y))
}

fn padded((lo, hi): (f64, f64)) -> Range<f64> {
    if lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };
    (lo - pad)..(hi + pad)
}

fn padded_log((lo, hi): (f64, f64)) -> Range<f64> {
    if lo > hi {
        return 0.1..1.0;
    }
    (lo / 1.25)..(hi * 1.25)
}
