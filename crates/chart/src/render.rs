//! Frame rendering.
//!
//! [`render`] is a pure function of the series, the mode, the viewport, the
//! transform and the timeframe. It returns backend-agnostic draw commands
//! together with the scales used to produce them, so hit-testing can run
//! against exactly what is on screen.
//!
//! Both scales are refit to the visible subset on every call: the time
//! domain spans the first to last visible timestamp and the value domain
//! spans the visible lows and highs with a 2% pad.

use crate::error::ChartError;
use crate::path::{PathSegment, Point, monotone_area, monotone_x};
use crate::scale::{
    TimeScale, ValueScale, format_time, format_value, padded_value_domain, value_ticks,
};
use crate::style::{self, Color};
use crate::transform::ZoomTransform;
use crate::viewport::Viewport;
use coinboard_domain::entities::ohlcv::validate_series;
use coinboard_domain::{CandleDirection, ChartMode, OhlcvPoint, Timeframe};
use serde::Serialize;
use std::ops::Range;
use tracing::trace;

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Vertical gradient definition referenced by [`DrawCommand::Area`].
    LinearGradient {
        id: String,
        color: Color,
        top_opacity: f64,
        bottom_opacity: f64,
    },
    Area {
        path: Vec<PathSegment>,
        gradient_id: String,
    },
    Line {
        path: Vec<PathSegment>,
        stroke: Color,
        width: f64,
    },
    Wick {
        x: f64,
        y_high: f64,
        y_low: f64,
        stroke: Color,
        width: f64,
    },
    Body {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        fill: Color,
        direction: CandleDirection,
    },
    Axis {
        from: Point,
        to: Point,
        stroke: Color,
    },
    TimeTick {
        x: f64,
        y: f64,
        label: String,
    },
    ValueTick {
        x: f64,
        y: f64,
        label: String,
    },
    HoverLine {
        x: f64,
        y_top: f64,
        y_bottom: f64,
        stroke: Color,
        dash: f64,
    },
}

/// Output of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub time_scale: TimeScale,
    pub value_scale: ValueScale,
    /// Indices of the points on screen.
    pub visible: Range<usize>,
}

impl Frame {
    #[must_use]
    pub fn value_domain(&self) -> (f64, f64) {
        self.value_scale.domain
    }

    #[must_use]
    pub fn bodies(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Body { .. }))
    }
}

/// Indices of the points inside the zoomed window.
///
/// When fewer than two points fall inside, the neighbours on both sides are
/// added so the window always spans real data.
#[must_use]
pub fn visible_range(
    points: &[OhlcvPoint],
    transform: &ZoomTransform,
    viewport: &Viewport,
) -> Range<usize> {
    let Some(base) = TimeScale::over(points, viewport.x_range()) else {
        return 0..0;
    };
    let (t0, t1) = transform.visible_domain(&base);
    let mut start = points.partition_point(|p| p.timestamp_ms < t0);
    let mut end = points.partition_point(|p| p.timestamp_ms <= t1);

    if end.saturating_sub(start) < 2 {
        start = start.saturating_sub(1);
        end = (end.max(start) + 1).min(points.len());
    }
    start..end
}

/// Renders `points` as `mode` under `transform`.
///
/// `transform` is clamped to the timeframe's zoom bounds and the plot
/// extent before use, so a hand-built or deserialized transform is safe.
///
/// # Errors
/// [`ChartError::EmptySeries`] for an empty input, or a domain error if the
/// timestamps are not strictly ascending.
pub fn render(
    points: &[OhlcvPoint],
    mode: ChartMode,
    viewport: &Viewport,
    transform: &ZoomTransform,
    timeframe: Timeframe,
) -> Result<Frame, ChartError> {
    if points.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    validate_series(points)?;

    let mut transform = *transform;
    transform.clamp_to(timeframe.zoom_bounds(), viewport.x_range());
    let visible = visible_range(points, &transform, viewport);
    let subset = &points[visible.clone()];
    let time_scale = TimeScale::over(subset, viewport.x_range()).ok_or(ChartError::EmptySeries)?;
    let value_domain = padded_value_domain(subset).ok_or(ChartError::EmptySeries)?;
    let value_scale = ValueScale::new(value_domain, viewport.y_range());

    let mut commands = Vec::with_capacity(subset.len() * 2 + 16);
    match mode {
        ChartMode::Price | ChartMode::MarketCap => {
            draw_area(&mut commands, subset, mode, &time_scale, &value_scale, viewport);
        }
        ChartMode::Candlestick => {
            draw_candles(&mut commands, subset, &time_scale, &value_scale, viewport);
        }
    }
    draw_axes(&mut commands, &time_scale, &value_scale, viewport, timeframe);

    trace!(
        mode = ?mode,
        visible = subset.len(),
        commands = commands.len(),
        "Rendered frame"
    );
    Ok(Frame {
        commands,
        time_scale,
        value_scale,
        visible,
    })
}

fn gradient_id(mode: ChartMode) -> &'static str {
    match mode {
        ChartMode::MarketCap => "blueGradient",
        _ => "redGradient",
    }
}

fn draw_area(
    commands: &mut Vec<DrawCommand>,
    points: &[OhlcvPoint],
    mode: ChartMode,
    x: &TimeScale,
    y: &ValueScale,
    viewport: &Viewport,
) {
    let color = style::series_color(mode);
    let id = gradient_id(mode).to_string();
    let coords: Vec<Point> = points
        .iter()
        .map(|p| Point::new(x.map(p.timestamp_ms), y.map(p.close)))
        .collect();

    commands.push(DrawCommand::LinearGradient {
        id: id.clone(),
        color,
        top_opacity: style::GRADIENT_TOP_OPACITY,
        bottom_opacity: 0.0,
    });
    commands.push(DrawCommand::Area {
        path: monotone_area(&coords, viewport.y_range().0),
        gradient_id: id,
    });
    commands.push(DrawCommand::Line {
        path: monotone_x(&coords),
        stroke: color,
        width: style::LINE_WIDTH,
    });
}

/// `max(5, plot_width / count - 2)`.
#[must_use]
pub fn candle_width(viewport: &Viewport, count: usize) -> f64 {
    let per_point = viewport.plot_width() / count.max(1) as f64;
    (per_point - style::CANDLE_GAP).max(style::MIN_CANDLE_WIDTH)
}

fn draw_candles(
    commands: &mut Vec<DrawCommand>,
    points: &[OhlcvPoint],
    x: &TimeScale,
    y: &ValueScale,
    viewport: &Viewport,
) {
    let width = candle_width(viewport, points.len());
    for p in points {
        let cx = x.map(p.timestamp_ms);
        let direction = p.direction();
        let color = style::candle_color(direction);

        commands.push(DrawCommand::Wick {
            x: cx,
            y_high: y.map(p.high),
            y_low: y.map(p.low),
            stroke: color,
            width: style::WICK_WIDTH,
        });

        let top = y.map(p.open.max(p.close));
        let bottom = y.map(p.open.min(p.close));
        commands.push(DrawCommand::Body {
            x: cx - width / 2.0,
            y: top,
            width,
            height: (bottom - top).abs().max(style::MIN_BODY_HEIGHT),
            corner_radius: style::BODY_CORNER_RADIUS,
            fill: color,
            direction,
        });
    }
}

fn draw_axes(
    commands: &mut Vec<DrawCommand>,
    x: &TimeScale,
    y: &ValueScale,
    viewport: &Viewport,
    timeframe: Timeframe,
) {
    let (x0, x1) = viewport.x_range();
    let (y_bottom, y_top) = viewport.y_range();

    commands.push(DrawCommand::Axis {
        from: Point::new(x0, y_bottom),
        to: Point::new(x1, y_bottom),
        stroke: style::AXIS,
    });
    commands.push(DrawCommand::Axis {
        from: Point::new(x1, y_bottom),
        to: Point::new(x1, y_top),
        stroke: style::AXIS,
    });

    for t in x.ticks(timeframe.tick_count()) {
        commands.push(DrawCommand::TimeTick {
            x: x.map(t),
            y: y_bottom,
            label: format_time(t, timeframe.tick_format()),
        });
    }

    let labels_can_fit = (viewport.plot_height() / (style::TEXT_SIZE * 3.0)) as usize;
    let (lowest, highest) = y.domain;
    let ticks = value_ticks(lowest, highest, labels_can_fit);
    let step = match ticks.as_slice() {
        [a, b, ..] => a - b,
        _ => 1.0,
    };
    for v in ticks {
        commands.push(DrawCommand::ValueTick {
            x: x1,
            y: y.map(v),
            label: format_value(v, step),
        });
    }
}
