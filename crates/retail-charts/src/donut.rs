//! Donut chart
//!
//! Segments are laid out clockwise from 12 o'clock in input order, each
//! sweeping its share of the total. Every segment is an SVG arc path stroked
//! on a ring of radius `(size - stroke) / 2`.

use crate::{
    chartkit::{PathBuilder, Point, non_negative},
    colors, Selection, Tooltip,
};
use leptos::prelude::*;
use retail_core::{Series, ValueFormat, round_percent};

/// Angle of 12 o'clock in the SVG frame
pub const DONUT_START_ANGLE: f64 = -90.0;

/// Donut chart configuration
#[derive(Debug, Clone)]
pub struct DonutChartConfig {
    pub size: f64,
    pub stroke_width: f64,
    /// Extra stroke width on the selected segment
    pub selected_extra_width: f64,
    /// Opacity of the other segments while one is selected
    pub dimmed_opacity: f64,
    pub format: ValueFormat,
}

impl Default for DonutChartConfig {
    fn default() -> Self {
        Self {
            size: 140.0,
            stroke_width: 22.0,
            selected_extra_width: 6.0,
            dimmed_opacity: 0.35,
            format: ValueFormat::default(),
        }
    }
}

impl DonutChartConfig {
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn radius(&self) -> f64 {
        ((self.size - self.stroke_width) / 2.0).max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

/// Share of the total for each value; all zeros when the total is 0
pub fn donut_shares(values: &[f64]) -> Vec<f64> {
    shares_of(&non_negative(values))
}

/// `(start_angle, sweep_angle)` per value, in degrees
pub fn donut_angles(values: &[f64]) -> Vec<(f64, f64)> {
    angles_of(&donut_shares(values))
}

fn shares_of(clamped: &[f64]) -> Vec<f64> {
    let total: f64 = clamped.iter().sum();
    if total <= 0.0 {
        return vec![0.0; clamped.len()];
    }
    clamped.iter().map(|v| v / total).collect()
}

fn angles_of(shares: &[f64]) -> Vec<(f64, f64)> {
    let mut cumulative = 0.0;
    shares
        .iter()
        .map(|share| {
            let start = cumulative * 360.0 + DONUT_START_ANGLE;
            cumulative += share;
            (start, share * 360.0)
        })
        .collect()
}

/// SVG arc path for a ring segment; a full turn is drawn as two half arcs
pub fn arc_path(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> String {
    if sweep_angle <= 0.0 || radius <= 0.0 {
        return String::new();
    }

    let from = center.polar(radius, start_angle);

    if sweep_angle >= 360.0 - 1e-6 {
        let half = center.polar(radius, start_angle + 180.0);
        return PathBuilder::new()
            .move_to(from.x, from.y)
            .arc_to(radius, radius, 0.0, false, true, half.x, half.y)
            .arc_to(radius, radius, 0.0, false, true, from.x, from.y)
            .build();
    }

    let to = center.polar(radius, start_angle + sweep_angle);
    PathBuilder::new()
        .move_to(from.x, from.y)
        .arc_to(radius, radius, 0.0, sweep_angle > 180.0, true, to.x, to.y)
        .build()
}

/// One ring segment
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub index: usize,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: String,
    pub path: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub selected: bool,
}

/// Legend row next to the ring
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub index: usize,
    pub label: String,
    pub color: String,
    pub percent: i64,
    pub selected: bool,
}

/// Donut chart geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DonutLayout {
    pub segments: Vec<ArcSegment>,
    pub legend: Vec<LegendItem>,
    pub center: Point,
    pub radius: f64,
    pub total: f64,
}

/// Lay out `series` as a donut ring with legend
pub fn donut_layout(series: &Series, config: &DonutChartConfig, selection: Selection) -> DonutLayout {
    let values = non_negative(&series.values());
    let total: f64 = values.iter().sum();
    let shares = shares_of(&values);
    let angles = angles_of(&shares);
    let center = config.center();
    let radius = config.radius();
    let selection = selection.retain_valid(series.len());

    let mut segments = Vec::with_capacity(series.len());
    let mut legend = Vec::with_capacity(series.len());

    for (i, ((entry, share), (start, sweep))) in series.iter().zip(shares).zip(angles).enumerate() {
        let color = entry.color_or_palette(i);
        let selected = selection.is_selected(i);
        let opacity = if selection.is_active() && !selected {
            config.dimmed_opacity
        } else {
            1.0
        };
        let stroke_width = if selected {
            config.stroke_width + config.selected_extra_width
        } else {
            config.stroke_width
        };

        segments.push(ArcSegment {
            index: i,
            start_angle: start,
            sweep_angle: sweep,
            color: color.clone(),
            path: arc_path(center, radius, start, sweep),
            stroke_width,
            opacity,
            selected,
        });

        legend.push(LegendItem {
            index: i,
            label: entry.label.clone(),
            color,
            percent: round_percent(share),
            selected,
        });
    }

    DonutLayout {
        segments,
        legend,
        center,
        radius,
        total,
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Donut chart card with legend
#[component]
pub fn DonutChart(
    #[prop(into)] data: Signal<Series>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<DonutChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let size = config.size;
    let ring_width = config.stroke_width;
    let format = config.format.clone();
    let selection = crate::use_selection(data);

    let layout = Signal::derive(move || donut_layout(&data.get(), &config, selection.get()));
    let tooltip = move || data.with(|series| Tooltip::for_selection(series, selection.get(), &format));

    view! {
        <div class="chart-card donut-chart">
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

            <div class="donut-row">
                <svg
                    class="donut-svg"
                    viewBox=format!("0 0 {} {}", size, size)
                    width=size
                    height=size
                >
                    {move || {
                        let layout = layout.get();
                        let ring = view! {
                            <circle
                                cx=layout.center.x
                                cy=layout.center.y
                                r=layout.radius
                                fill="none"
                                stroke=colors::BORDER
                                stroke-width=ring_width
                            />
                        };

                        let segments = layout.segments.into_iter().map(|segment| {
                            let index = segment.index;
                            view! {
                                <path
                                    class="donut-segment"
                                    d=segment.path
                                    fill="none"
                                    stroke=segment.color
                                    stroke-width=segment.stroke_width
                                    opacity=segment.opacity
                                    on:click=move |_| selection.update(|s| s.tap(index))
                                />
                            }
                        }).collect_view();

                        view! { {ring} {segments} }
                    }}
                </svg>

                <ul class="donut-legend">
                    {move || {
                        layout.get().legend.into_iter().map(|item| {
                            let index = item.index;
                            let class = if item.selected { "legend-item selected" } else { "legend-item" };
                            view! {
                                <li class=class on:click=move |_| selection.update(|s| s.tap(index))>
                                    <span
                                        class="legend-dot"
                                        style=format!("background-color: {};", item.color)
                                    />
                                    <span class="legend-label">{item.label}</span>
                                    <span class="legend-value">{format!("{}%", item.percent)}</span>
                                </li>
                            }
                        }).collect_view()
                    }}
                </ul>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn categories() -> Series {
        Series::from_pairs([
            ("Boissons", 145_800_000.0),
            ("Produits Laitiers", 89_200_000.0),
            ("Fromages", 44_600_000.0),
        ])
    }

    #[test]
    fn test_sweeps_sum_to_full_turn() {
        let angles = donut_angles(&categories().values());
        let total: f64 = angles.iter().map(|(_, sweep)| sweep).sum();
        assert_relative_eq!(total, 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segments_are_contiguous_from_twelve() {
        let angles = donut_angles(&[1.0, 1.0, 2.0]);
        assert_eq!(angles[0], (-90.0, 90.0));
        assert_eq!(angles[1], (0.0, 90.0));
        assert_eq!(angles[2], (90.0, 180.0));
    }

    #[test]
    fn test_zero_total_has_no_sweep() {
        let layout = donut_layout(
            &Series::from_pairs([("a", 0.0), ("b", 0.0)]),
            &DonutChartConfig::default(),
            Selection::Unselected,
        );

        assert!(layout.segments.iter().all(|s| s.sweep_angle == 0.0));
        assert!(layout.segments.iter().all(|s| s.path.is_empty()));
        assert!(layout.legend.iter().all(|l| l.percent == 0));
    }

    #[test]
    fn test_negative_value_clamped() {
        let shares = donut_shares(&[-5.0, 5.0]);
        assert_eq!(shares, vec![0.0, 1.0]);
    }

    #[test]
    fn test_layout_warns_once_on_negative_values() {
        use std::sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        };
        use tracing_subscriber::{Layer, layer::Context, layer::SubscriberExt};

        struct WarnCounter(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if *event.metadata().level() == tracing::Level::WARN {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        let series = Series::from_pairs([("Retours", -5.0), ("Ventes", 10.0)]);

        let layout = tracing::subscriber::with_default(subscriber, || {
            donut_layout(&series, &DonutChartConfig::default(), Selection::Unselected)
        });

        assert_eq!(warnings.load(Ordering::SeqCst), 1);
        assert_eq!(layout.total, 10.0);
        assert_eq!(layout.segments[0].sweep_angle, 0.0);
        assert_eq!(layout.segments[1].sweep_angle, 360.0);
    }

    #[test]
    fn test_geometry_defaults() {
        let config = DonutChartConfig::default();
        assert_eq!(config.radius(), 59.0);
        assert_eq!(config.center(), Point::new(70.0, 70.0));
    }

    #[test]
    fn test_legend_percentages_and_colors() {
        let layout = donut_layout(&categories(), &DonutChartConfig::default(), Selection::Unselected);
        let percents: Vec<i64> = layout.legend.iter().map(|l| l.percent).collect();

        assert_eq!(percents, vec![52, 32, 16]);
        assert_eq!(layout.legend[0].color, colors::palette(0));
        assert_eq!(layout.legend[2].label, "Fromages");
    }

    #[test]
    fn test_selection_widens_and_dims() {
        let layout = donut_layout(&categories(), &DonutChartConfig::default(), Selection::Selected(1));

        assert_eq!(layout.segments[1].stroke_width, 28.0);
        assert_eq!(layout.segments[1].opacity, 1.0);
        assert_eq!(layout.segments[0].opacity, 0.35);
        assert_eq!(layout.segments[0].stroke_width, 22.0);

        let idle = donut_layout(&categories(), &DonutChartConfig::default(), Selection::Unselected);
        assert!(idle.segments.iter().all(|s| s.opacity == 1.0));
    }

    #[test]
    fn test_arc_path_small_and_large() {
        let center = Point::new(70.0, 70.0);

        let quarter = arc_path(center, 59.0, -90.0, 90.0);
        assert_eq!(quarter, "M70.00,11.00A59.00,59.00,0.00,0,1,129.00,70.00");

        let large = arc_path(center, 59.0, -90.0, 270.0);
        assert!(large.contains(",0.00,1,1,"));
    }

    #[test]
    fn test_full_circle_split_in_two() {
        let layout = donut_layout(
            &Series::from_pairs([("only", 42.0)]),
            &DonutChartConfig::default(),
            Selection::Unselected,
        );
        let path = &layout.segments[0].path;

        assert_eq!(path.matches('A').count(), 2);
        assert!(path.starts_with("M70.00,11.00"));
        assert!(path.contains("70.00,129.00"));
        assert_eq!(layout.legend[0].percent, 100);
    }
}
