//! Vertical bar chart
//!
//! One bar per entry in input order. Bars grow up from the plot baseline; the
//! bottom `BAR_LABEL_RESERVE` pixels hold the abbreviated labels.

use crate::{
    chartkit::{AxisLabel, LinearScale, Rect, Scale, max_value, non_negative, normalize},
    colors, screen_chart_width, ChartDimensions, Selection, Tooltip,
};
use leptos::prelude::*;
use retail_core::{Series, ValueFormat};

/// Horizontal gap reserved per bar
pub const BAR_GAP: f64 = 4.0;
/// Minimum visible bar width
pub const MIN_BAR_WIDTH: f64 = 10.0;
/// Minimum visible bar height
pub const MIN_BAR_HEIGHT: f64 = 2.0;
/// Vertical space kept under the bars for labels
pub const BAR_LABEL_RESERVE: f64 = 28.0;
/// Characters kept from each label
pub const BAR_LABEL_CHARS: usize = 3;

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub format: ValueFormat,
    pub corner_radius: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: screen_chart_width(),
            height: 200.0,
            color: colors::PRIMARY.to_string(),
            format: ValueFormat::default(),
            corner_radius: 4.0,
        }
    }
}

impl BarChartConfig {
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

/// `max(10, (W - n*4) / n)`, never wider than the chart
pub fn bar_width(count: usize, width: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }

    let width = width.max(0.0);
    let n = count as f64;
    ((width - n * BAR_GAP) / n).max(MIN_BAR_WIDTH).min(width)
}

/// One laid-out bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub index: usize,
    pub rect: Rect,
    pub normalized: f64,
    pub opacity: f64,
    pub selected: bool,
    pub label: AxisLabel,
}

/// Bar chart geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarLayout {
    pub bars: Vec<Bar>,
    pub bar_width: f64,
    pub plot_height: f64,
    pub max_value: f64,
}

/// Lay out `series` as vertical bars
pub fn bar_layout(series: &Series, config: &BarChartConfig, selection: Selection) -> BarLayout {
    let dims = ChartDimensions::new(config.width, config.height);
    let plot_height = (dims.height - BAR_LABEL_RESERVE).max(0.0);

    if series.is_empty() {
        tracing::debug!("bar layout for empty series");
        return BarLayout {
            plot_height,
            max_value: 1.0,
            ..Default::default()
        };
    }

    let values = non_negative(&series.values());
    let max = max_value(&values);
    let width = bar_width(series.len(), dims.width);
    let column = dims.width / series.len() as f64;
    let max_x = (dims.width - width).max(0.0);
    let selection = selection.retain_valid(series.len());

    let height_scale = LinearScale::new()
        .domain(0.0, 1.0)
        .range(0.0, plot_height)
        .clamp(true);

    let bars = series
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (entry, value))| {
            let normalized = normalize(value, max);
            let height = height_scale
                .scale(normalized)
                .max(MIN_BAR_HEIGHT)
                .min(plot_height);
            let column_x = i as f64 * column;
            let x = (column_x + (column - width) / 2.0).clamp(0.0, max_x);
            let selected = selection.is_selected(i);

            Bar {
                index: i,
                rect: Rect::new(x, plot_height - height, width, height),
                normalized,
                opacity: if selected { 1.0 } else { 0.75 + normalized * 0.25 },
                selected,
                label: AxisLabel {
                    x: column_x + column / 2.0,
                    y: plot_height + 16.0,
                    text: entry.short_label(BAR_LABEL_CHARS),
                },
            }
        })
        .collect();

    BarLayout {
        bars,
        bar_width: width,
        plot_height,
        max_value: max,
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Bar chart card with tap-to-inspect tooltip
#[component]
pub fn BarChart(
    #[prop(into)] data: Signal<Series>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<BarChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let dims = ChartDimensions::new(config.width, config.height);
    let selection = crate::use_selection(data);

    let color = config.color.clone();
    let radius = config.corner_radius;
    let format = config.format.clone();

    let layout = Signal::derive(move || bar_layout(&data.get(), &config, selection.get()));
    let tooltip = move || data.with(|series| Tooltip::for_selection(series, selection.get(), &format));

    view! {
        <div class="chart-card bar-chart">
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
                class="bar-chart-svg"
                viewBox=dims.viewbox()
                style="width: 100%;"
            >
                {move || {
                    layout.get().bars.into_iter().map(|bar| {
                        let index = bar.index;
                        let color = color.clone();
                        view! {
                            <g class="bar" on:click=move |_| selection.update(|s| s.tap(index))>
                                <rect
                                    x=bar.rect.x
                                    y=bar.rect.y
                                    width=bar.rect.width
                                    height=bar.rect.height
                                    fill=color
                                    opacity=bar.opacity
                                    rx=radius
                                />
                                <text
                                    x=bar.label.x
                                    y=bar.label.y
                                    text-anchor="middle"
                                    fill=colors::TEXT_SECONDARY
                                    font-size="9"
                                >
                                    {bar.label.text}
                                </text>
                            </g>
                        }
                    }).collect_view()
                }}
            </svg>
        </div>
    }
}
