//! Ranked horizontal bar chart
//!
//! Rows keep input order (callers pass pre-ranked data). The bar fill is the
//! entry's share of the largest value; tapping a row reveals its value.

use crate::{
    chartkit::{Rect, max_value, non_negative, normalize},
    colors, screen_chart_width, Selection, Tooltip,
};
use leptos::prelude::*;
use retail_core::{Series, ValueFormat};

/// Horizontal bar chart configuration
#[derive(Debug, Clone)]
pub struct HorizontalBarConfig {
    pub width: f64,
    pub row_height: f64,
    pub track_height: f64,
    /// Width of the rank column left of the bars
    pub rank_width: f64,
    /// Ranks up to this one are drawn in the accent color
    pub highlight_ranks: usize,
    /// Prefix stripped from labels (e.g. the chain name on store names)
    pub label_prefix: Option<String>,
    pub format: ValueFormat,
}

impl Default for HorizontalBarConfig {
    fn default() -> Self {
        Self {
            width: screen_chart_width(),
            row_height: 34.0,
            track_height: 8.0,
            rank_width: 30.0,
            highlight_ranks: 3,
            label_prefix: None,
            format: ValueFormat::default(),
        }
    }
}

impl HorizontalBarConfig {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = Some(prefix.into());
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }
}

/// One ranked row
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBarRow {
    pub index: usize,
    pub rank: usize,
    pub rank_highlighted: bool,
    pub label: String,
    /// Formatted value, only shown for the selected row
    pub value_text: Option<String>,
    pub track: Rect,
    pub fill: Rect,
    pub normalized: f64,
    pub color: String,
    pub opacity: f64,
    pub selected: bool,
}

/// Horizontal bar chart geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HorizontalBarLayout {
    pub rows: Vec<HorizontalBarRow>,
    pub height: f64,
    pub tooltip: Option<Tooltip>,
}

/// Lay out `series` as ranked horizontal bars
pub fn horizontal_bar_layout(
    series: &Series,
    config: &HorizontalBarConfig,
    selection: Selection,
) -> HorizontalBarLayout {
    let values = non_negative(&series.values());
    let max = max_value(&values);
    let track_width = (config.width - config.rank_width).max(0.0);
    let selection = selection.retain_valid(series.len());

    let rows = series
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (entry, value))| {
            let normalized = normalize(value, max);
            let selected = selection.is_selected(i);
            let top = i as f64 * config.row_height;
            let track_y = top + config.row_height - config.track_height - 4.0;

            let label = match &config.label_prefix {
                Some(prefix) => entry.label.strip_prefix(prefix.as_str()).unwrap_or(&entry.label),
                None => &entry.label,
            };

            HorizontalBarRow {
                index: i,
                rank: i + 1,
                rank_highlighted: i < config.highlight_ranks,
                label: label.to_string(),
                value_text: selected.then(|| config.format.format(entry.value)),
                track: Rect::new(config.rank_width, track_y, track_width, config.track_height),
                fill: Rect::new(
                    config.rank_width,
                    track_y,
                    normalized * track_width,
                    config.track_height,
                ),
                normalized,
                color: entry.color_or_palette(i),
                opacity: if selected { 1.0 } else { 0.75 },
                selected,
            }
        })
        .collect();

    HorizontalBarLayout {
        rows,
        height: series.len() as f64 * config.row_height,
        tooltip: Tooltip::for_selection(series, selection, &config.format),
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Ranked horizontal bar chart card
#[component]
pub fn HorizontalBarChart(
    #[prop(into)] data: Signal<Series>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<HorizontalBarConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let width = config.width;
    let track_radius = config.track_height / 2.0;
    let selection = crate::use_selection(data);

    let layout =
        Signal::derive(move || horizontal_bar_layout(&data.get(), &config, selection.get()));

    view! {
        <div class="chart-card horizontal-bar-chart">
            <h3 class="chart-title">{title}</h3>

            {move || {
                layout.get().tooltip.map(|t| {
                    view! {
                        <div class="chart-tooltip">
                            <span class="tooltip-label">{t.label.clone()}</span>
                            <span class="tooltip-value">{t.detail()}</span>
                        </div>
                    }
                })
            }}

            <svg
                class="horizontal-bar-svg"
                viewBox=move || format!("0 0 {} {}", width, layout.get().height)
                style="width: 100%;"
            >
                {move || {
                    layout.get().rows.into_iter().map(|row| {
                        let index = row.index;
                        let rank_color = if row.rank_highlighted {
                            colors::SECONDARY
                        } else {
                            colors::TEXT_LIGHT
                        };
                        let row_class = if row.selected { "hbar-row selected" } else { "hbar-row" };
                        let label_y = row.track.y - 6.0;

                        view! {
                            <g class=row_class on:click=move |_| selection.update(|s| s.tap(index))>
                                <text
                                    x=row.track.x / 2.0
                                    y=row.track.y + row.track.height
                                    text-anchor="middle"
                                    fill=rank_color
                                    font-size="12"
                                >
                                    {row.rank}
                                </text>
                                <text
                                    x=row.track.x
                                    y=label_y
                                    fill=colors::TEXT
                                    font-size="12"
                                >
                                    {row.label}
                                </text>
                                {row.value_text.map(|value| {
                                    view! {
                                        <text
                                            x=row.track.right()
                                            y=label_y
                                            text-anchor="end"
                                            fill=row.color.clone()
                                            font-size="10"
                                        >
                                            {value}
                                        </text>
                                    }
                                })}
                                <rect
                                    x=row.track.x
                                    y=row.track.y
                                    width=row.track.width
                                    height=row.track.height
                                    fill=colors::BORDER
                                    rx=track_radius
                                />
                                <rect
                                    x=row.fill.x
                                    y=row.fill.y
                                    width=row.fill.width
                                    height=row.fill.height
                                    fill=row.color.clone()
                                    opacity=row.opacity
                                    rx=track_radius
                                />
                            </g>
                        }
                    }).collect_view()
                }}
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stores() -> Series {
        Series::from_pairs([
            ("Sigalli Libreville Centre", 68_500_000.0),
            ("Sigalli Port-Gentil", 42_300_000.0),
            ("Sigalli Oloumi", 38_700_000.0),
            ("Sigalli Ntoum", 3_100_000.0),
        ])
    }

    fn config() -> HorizontalBarConfig {
        HorizontalBarConfig::default()
            .with_width(330.0)
            .with_label_prefix("Sigalli ")
    }

    #[test]
    fn test_fill_relative_to_max() {
        let layout = horizontal_bar_layout(&stores(), &config(), Selection::Unselected);

        assert_eq!(layout.rows.len(), 4);
        assert_relative_eq!(layout.rows[0].fill.width, 300.0);
        assert_relative_eq!(layout.rows[1].normalized, 42_300_000.0 / 68_500_000.0);
        assert!(layout.rows.iter().all(|r| r.fill.width <= r.track.width));
        assert_eq!(layout.height, 4.0 * 34.0);
    }

    #[test]
    fn test_ranks_and_labels() {
        let layout = horizontal_bar_layout(&stores(), &config(), Selection::Unselected);

        assert_eq!(layout.rows[0].rank, 1);
        assert_eq!(layout.rows[0].label, "Libreville Centre");
        assert!(layout.rows[2].rank_highlighted);
        assert!(!layout.rows[3].rank_highlighted);
    }

    #[test]
    fn test_palette_fallback_and_explicit_color() {
        let series = Series::from(vec![
            retail_core::SeriesEntry::new("a", 1.0).with_color("#123456"),
            retail_core::SeriesEntry::new("b", 2.0),
        ]);
        let layout = horizontal_bar_layout(&series, &config(), Selection::Unselected);

        assert_eq!(layout.rows[0].color, "#123456");
        assert_eq!(layout.rows[1].color, colors::palette(1));
    }

    #[test]
    fn test_selected_row_shows_value_and_tooltip() {
        let layout = horizontal_bar_layout(&stores(), &config(), Selection::Selected(1));
        let row = &layout.rows[1];

        assert!(row.selected);
        assert_eq!(row.opacity, 1.0);
        assert_eq!(row.value_text.as_deref(), Some("42.3M FCFA"));
        assert!(layout.rows[0].value_text.is_none());
        assert_eq!(layout.rows[0].opacity, 0.75);

        let tooltip = layout.tooltip.unwrap();
        assert_eq!(tooltip.label, "Sigalli Port-Gentil");
        assert_eq!(tooltip.detail(), "42.3M FCFA (28%)");
    }

    #[test]
    fn test_stale_selection_ignored() {
        let layout = horizontal_bar_layout(&stores(), &config(), Selection::Selected(10));
        assert!(layout.tooltip.is_none());
        assert!(layout.rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn test_all_zero_series() {
        let series = Series::from_pairs([("a", 0.0), ("b", 0.0)]);
        let layout = horizontal_bar_layout(&series, &config(), Selection::Selected(0));

        assert!(layout.rows.iter().all(|r| r.fill.width == 0.0));
        assert_eq!(layout.tooltip.map(|t| t.percent), Some(0));
    }
}
