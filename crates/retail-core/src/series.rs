//! Ordered, labeled numeric series feeding one chart

use crate::colors;
use serde::{Deserialize, Serialize};

// ============================================================================
// SERIES ENTRY
// ============================================================================

/// One labeled data point; an optional color overrides the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SeriesEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// First `max_chars` characters of the label (axis abbreviations)
    pub fn short_label(&self, max_chars: usize) -> String {
        self.label.chars().take(max_chars).collect()
    }

    /// Explicit color, or the palette color for this entry's position
    pub fn color_or_palette(&self, index: usize) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| colors::palette(index).to_string())
    }
}

impl<L: Into<String>> From<(L, f64)> for SeriesEntry {
    fn from((label, value): (L, f64)) -> Self {
        Self::new(label, value)
    }
}

// ============================================================================
// SERIES
// ============================================================================

/// Ordered sequence of entries; order drives x-axis and donut stacking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(pub Vec<SeriesEntry>);

impl Series {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a series from `(label, value)` pairs
    pub fn from_pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        pairs.into_iter().map(SeriesEntry::from).collect()
    }

    /// Parse a JSON array of `{label, value, color?}` objects
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let series: Series = serde_json::from_str(json)?;
        tracing::debug!(entries = series.len(), "parsed series");
        Ok(series)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn push(&mut self, entry: SeriesEntry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SeriesEntry> {
        self.0.get(index)
    }

    pub fn entries(&self) -> &[SeriesEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesEntry> {
        self.0.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|e| e.value).collect()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.0.iter().map(|e| e.value).sum()
    }

    /// First `n` entries, keeping input order
    pub fn top(&self, n: usize) -> Series {
        Self(self.0.iter().take(n).cloned().collect())
    }

    /// Fill missing colors from the palette, starting at `offset`
    pub fn with_palette(mut self, offset: usize) -> Self {
        for (i, entry) in self.0.iter_mut().enumerate() {
            if entry.color.is_none() {
                entry.color = Some(colors::palette(i + offset).to_string());
            }
        }
        self
    }

    /// Strip a common prefix from every label (e.g. a chain name)
    pub fn strip_label_prefix(mut self, prefix: &str) -> Self {
        for entry in &mut self.0 {
            if let Some(rest) = entry.label.strip_prefix(prefix) {
                entry.label = rest.to_string();
            }
        }
        self
    }
}

impl From<Vec<SeriesEntry>> for Series {
    fn from(entries: Vec<SeriesEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<SeriesEntry> for Series {
    fn from_iter<T: IntoIterator<Item = SeriesEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesEntry;
    type IntoIter = std::slice::Iter<'a, SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Series {
    type Item = SeriesEntry;
    type IntoIter = std::vec::IntoIter<SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_series() -> Series {
        Series::from_pairs([
            ("Boissons", 145_800_000.0),
            ("Produits Laitiers", 89_200_000.0),
            ("Fromages", 44_600_000.0),
        ])
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let series = category_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(0).map(|e| e.label.as_str()), Some("Boissons"));
        assert_eq!(series.get(2).map(|e| e.label.as_str()), Some("Fromages"));
        assert_eq!(series.total(), 279_600_000.0);
    }

    #[test]
    fn test_json_round_trip_omits_missing_color() {
        let json = r##"[{"label":"Jul","value":12500000},{"label":"Aug","value":14200000,"color":"#ff7426"}]"##;
        let series = Series::from_json(json).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(0).and_then(|e| e.color.clone()), None);
        assert_eq!(series.get(1).and_then(|e| e.color.clone()), Some("#ff7426".to_string()));

        let out = series.to_json().unwrap();
        assert!(out.starts_with(r#"[{"label":"Jul","value":12500000.0},"#));
        assert!(out.contains(r##""color":"#ff7426""##));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(Series::from_json(r#"[{"label":"Jul"}]"#).is_err());
        assert!(Series::from_json("not json").is_err());
    }

    #[test]
    fn test_top_and_palette_offset() {
        let stores = Series::from_pairs([
            ("Sigalli Libreville Centre", 68_500_000.0),
            ("Sigalli Port-Gentil", 42_300_000.0),
            ("Sigalli Oloumi", 38_700_000.0),
        ]);

        let top = stores.top(2).with_palette(3).strip_label_prefix("Sigalli ");
        assert_eq!(top.len(), 2);
        assert_eq!(top.get(0).map(|e| e.label.as_str()), Some("Libreville Centre"));
        assert_eq!(top.get(0).and_then(|e| e.color.as_deref()), Some("#007AFF"));
        assert_eq!(top.get(1).and_then(|e| e.color.as_deref()), Some("#FF3B30"));
    }

    #[test]
    fn test_short_label_is_char_aware() {
        let entry = SeriesEntry::new("Écrémé", 1.0);
        assert_eq!(entry.short_label(3), "Écr");
        assert_eq!(SeriesEntry::new("Jo", 1.0).short_label(3), "Jo");
    }

    #[test]
    fn test_color_or_palette() {
        let explicit = SeriesEntry::new("A", 1.0).with_color("#000000");
        assert_eq!(explicit.color_or_palette(4), "#000000");
        assert_eq!(SeriesEntry::new("B", 1.0).color_or_palette(1), colors::SECONDARY);
    }
}
