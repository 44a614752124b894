//! Per-chart tap selection and tooltip text
//!
//! Every chart instance owns one [`Selection`]; it is never shared between
//! charts and disappears with the component.

use leptos::prelude::*;
use retail_core::{Series, ValueFormat, round_percent};
use serde::{Deserialize, Serialize};

/// Selection FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(usize),
}

impl Selection {
    /// Next state after tapping `index`
    ///
    /// Tapping the selected entry clears the selection; tapping any other
    /// entry selects it directly.
    pub fn toggle(self, index: usize) -> Self {
        match self {
            Self::Selected(current) if current == index => Self::Unselected,
            _ => Self::Selected(index),
        }
    }

    /// In-place [`Selection::toggle`]
    pub fn tap(&mut self, index: usize) {
        let next = self.toggle(index);
        tracing::trace!(from = ?*self, to = ?next, "chart selection");
        *self = next;
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Selected(index) => Some(*index),
            Self::Unselected => None,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        matches!(self, Self::Selected(current) if *current == index)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Drop a selection that no longer indexes data of length `len`
    pub fn retain_valid(self, len: usize) -> Self {
        match self {
            Self::Selected(index) if index >= len => Self::Unselected,
            other => other,
        }
    }
}

/// Tooltip content for the selected entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub label: String,
    pub value_text: String,
    /// Whole-percent share of the series total
    pub percent: i64,
}

impl Tooltip {
    /// Tooltip for the current selection, if it points into `series`
    pub fn for_selection(series: &Series, selection: Selection, format: &ValueFormat) -> Option<Self> {
        let index = selection.retain_valid(series.len()).index()?;
        let entry = series.get(index)?;

        Some(Self {
            index,
            label: entry.label.clone(),
            value_text: format.format(entry.value),
            percent: round_percent(series.share(index)),
        })
    }

    /// `"1.5M FCFA (52%)"`
    pub fn detail(&self) -> String {
        format!("{} ({}%)", self.value_text, self.percent)
    }
}

/// Component-local selection signal, reset whenever the data shrinks below it
pub fn use_selection(data: Signal<Series>) -> RwSignal<Selection> {
    let selection = RwSignal::new(Selection::default());

    Effect::new(move |_| {
        let len = data.with(Series::len);
        let current = selection.get_untracked();
        let valid = current.retain_valid(len);
        if valid != current {
            tracing::debug!(len, "selection cleared after data change");
            selection.set(valid);
        }
    });

    selection
}
