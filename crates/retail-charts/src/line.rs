//! Line chart
//!
//! Points are min-max scaled into the plot band and joined by rotated
//! segments. The area under the line is approximated by a single rectangle
//! from the highest point down to the baseline.

use crate::{
    chartkit::{AxisLabel, Circle, LineSegment, LinearScale, MinMax, Point, Rect, Scale},
    colors, screen_chart_width, ChartDimensions, Selection, Tooltip,
};
use leptos::prelude::*;
use retail_core::{Series, ValueFormat};

/// Height taken below the plot by the label row
pub const LINE_LABEL_RESERVE: f64 = 30.0;
pub const LINE_PADDING_TOP: f64 = 16.0;
pub const LINE_PADDING_BOTTOM: f64 = 8.0;
/// Horizontal inset of the first and last point
pub const LINE_INSET: f64 = 10.0;
pub const LINE_GRID_LINES: usize = 4;
/// Labels are thinned to roughly this many
pub const LINE_MAX_LABELS: usize = 6;
const LINE_LABEL_CHARS: usize = 3;

/// Line chart configuration
#[derive(Debug, Clone)]
pub struct LineChartConfig {
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub format: ValueFormat,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub marker_inner_radius: f64,
    /// Area fill opacity
    pub fill_opacity: f64,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            width: screen_chart_width(),
            height: 180.0,
            color: colors::PRIMARY.to_string(),
            format: ValueFormat::default(),
            stroke_width: 2.5,
            marker_radius: 5.0,
            marker_inner_radius: 3.0,
            fill_opacity: 0.07,
        }
    }
}

impl LineChartConfig {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }
}

/// `(i / max(n-1, 1)) * (W - 20) + 10`
pub fn line_x(index: usize, count: usize, width: f64) -> f64 {
    let span = count.saturating_sub(1).max(1) as f64;
    (index as f64 / span) * (width - 2.0 * LINE_INSET) + LINE_INSET
}

/// Indices that get an x-axis label: every `ceil(n/6)`-th plus the last
pub fn label_indices(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let step = count.div_ceil(LINE_MAX_LABELS);
    (0..count)
        .filter(|i| i % step == 0 || *i == count - 1)
        .collect()
}

/// Horizontal grid line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
}

/// Point marker: outer ring and inner dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub outer: Circle,
    pub inner: Circle,
    pub selected: bool,
}

/// Line chart geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineLayout {
    pub points: Vec<Point>,
    pub segments: Vec<LineSegment>,
    pub markers: Vec<Marker>,
    /// Only present with two or more points
    pub area: Option<Rect>,
    pub grid: Vec<GridLine>,
    pub labels: Vec<AxisLabel>,
    pub plot_height: f64,
}

/// Lay out `series` as a line chart
pub fn line_layout(series: &Series, config: &LineChartConfig, selection: Selection) -> LineLayout {
    let dims = ChartDimensions::new(config.width, config.height);
    let plot_height = (dims.height - LINE_LABEL_RESERVE).max(0.0);
    let usable = (plot_height - LINE_PADDING_TOP - LINE_PADDING_BOTTOM).max(0.0);
    let top = LINE_PADDING_TOP;
    let baseline = (plot_height - LINE_PADDING_BOTTOM).max(top);

    let grid = LinearScale::new()
        .domain(top, top + usable)
        .ticks(LINE_GRID_LINES)
        .into_iter()
        .map(|y| GridLine {
            y,
            x1: LINE_INSET,
            x2: (dims.width - LINE_INSET).max(LINE_INSET),
        })
        .collect();

    if series.is_empty() {
        tracing::debug!("line layout for empty series");
        return LineLayout {
            grid,
            plot_height,
            ..Default::default()
        };
    }

    let values = series.values();
    let y_scale = MinMax::from_values(&values)
        .with_max_floor(1.0)
        .scale()
        .range(top + usable, top)
        .clamp(true);

    let n = series.len();
    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new(line_x(i, n, dims.width), y_scale.scale(v).clamp(top, baseline)))
        .collect();

    let segments = points
        .windows(2)
        .map(|pair| LineSegment::between(pair[0], pair[1]))
        .collect();

    let area = (points.len() > 1)
        .then(|| {
            let first = points.first()?;
            let last = points.last()?;
            let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            Some(Rect::new(first.x, min_y, last.x - first.x, (baseline - min_y).max(0.0)))
        })
        .flatten();

    let selection = selection.retain_valid(n);
    let markers = points
        .iter()
        .enumerate()
        .map(|(i, p)| Marker {
            index: i,
            outer: Circle::new(p.x, p.y, config.marker_radius),
            inner: Circle::new(p.x, p.y, config.marker_inner_radius),
            selected: selection.is_selected(i),
        })
        .collect();

    let labels = label_indices(n)
        .into_iter()
        .filter_map(|i| {
            let entry = series.get(i)?;
            Some(AxisLabel {
                x: points[i].x,
                y: plot_height + 18.0,
                text: entry.short_label(LINE_LABEL_CHARS),
            })
        })
        .collect();

    LineLayout {
        points,
        segments,
        markers,
        area,
        grid,
        labels,
        plot_height,
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Line chart card; tapping a point shows its value
#[component]
pub fn LineChart(
    #[prop(into)] data: Signal<Series>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<LineChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let dims = ChartDimensions::new(config.width, config.height);
    let selection = crate::use_selection(data);

    let color = config.color.clone();
    let fill = colors::with_alpha(&config.color, config.fill_opacity);
    let stroke = config.stroke_width;
    let format = config.format.clone();

    let layout = Signal::derive(move || line_layout(&data.get(), &config, selection.get()));
    let tooltip = move || data.with(|series| Tooltip::for_selection(series, selection.get(), &format));

    view! {
        <div class="chart-card line-chart">
            <h3 class="chart-title">{title}</h3>

            {move || {
                tooltip().map(|t| {
                    view! {
                        <div class="chart-tooltip">
                            <span class="tooltip-label">{t.label.clone()}</span>
                            <span class="tooltip-value">{t.detail()}</span>
                        </div>
                    }
                })
            }}

            <svg
                class="line-chart-svg"
                viewBox=dims.viewbox()
                style="width: 100%;"
            >
                {move || {
                    let layout = layout.get();
                    let color = color.clone();
                    let fill = fill.clone();

                    let grid = layout.grid.iter().map(|g| {
                        view! {
                            <line
                                x1=g.x1
                                y1=g.y
                                x2=g.x2
                                y2=g.y
                                stroke=colors::BORDER
                                stroke-width="1"
                            />
                        }
                    }).collect_view();

                    let area = layout.area.map(|r| {
                        view! {
                            <rect x=r.x y=r.y width=r.width height=r.height fill=fill.clone() />
                        }
                    });

                    let segments = layout.segments.iter().map(|s| {
                        view! {
                            <rect
                                x=s.origin.x
                                y=s.origin.y - stroke / 2.0
                                width=s.length
                                height=stroke
                                rx=stroke / 2.0
                                fill=color.clone()
                                transform=s.svg_transform()
                            />
                        }
                    }).collect_view();

                    let markers = layout.markers.iter().map(|m| {
                        let index = m.index;
                        let outer_r = if m.selected { m.outer.r + 1.5 } else { m.outer.r };
                        view! {
                            <g class="line-point" on:click=move |_| selection.update(|s| s.tap(index))>
                                <circle
                                    cx=m.outer.cx
                                    cy=m.outer.cy
                                    r=outer_r
                                    fill=colors::SURFACE
                                    stroke=color.clone()
                                    stroke-width="2"
                                />
                                <circle cx=m.inner.cx cy=m.inner.cy r=m.inner.r fill=color.clone() />
                            </g>
                        }
                    }).collect_view();

                    let labels = layout.labels.into_iter().map(|label| {
                        view! {
                            <text
                                x=label.x
                                y=label.y
                                text-anchor="middle"
                                fill=colors::TEXT_SECONDARY
                                font-size="9"
                            >
                                {label.text}
                            </text>
                        }
                    }).collect_view();

                    view! {
                        <g class="grid">{grid}</g>
                        {area}
                        <g class="segments">{segments}</g>
                        <g class="markers">{markers}</g>
                        <g class="labels">{labels}</g>
                    }
                }}
            </svg>
        </div>
    }
}
