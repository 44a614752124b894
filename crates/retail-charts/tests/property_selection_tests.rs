use retail_charts::{Selection, Series, Tooltip, ValueFormat};
use proptest::prelude::*;

proptest! {
    #[test]
    fn taps_keep_selection_consistent(taps in prop::collection::vec(0usize..8, 0..64)) {
        let mut selection = Selection::default();

        for tap in taps {
            let before = selection;
            selection.tap(tap);

            if before == Selection::Selected(tap) {
                prop_assert_eq!(selection, Selection::Unselected);
            } else {
                prop_assert_eq!(selection, Selection::Selected(tap));
            }
        }
    }

    #[test]
    fn retained_selection_always_indexes_data(index in 0usize..64, len in 0usize..64) {
        let retained = Selection::Selected(index).retain_valid(len);

        match retained.index() {
            Some(i) => prop_assert!(i < len),
            None => prop_assert!(index >= len),
        }
    }

    #[test]
    fn tooltip_only_for_valid_selection(
        values in prop::collection::vec(-1e6f64..1e9, 0..16),
        index in 0usize..20
    ) {
        let series = Series::from_pairs(values.iter().map(|v| ("x", *v)));
        let tooltip = Tooltip::for_selection(&series, Selection::Selected(index), &ValueFormat::default());

        prop_assert_eq!(tooltip.is_some(), index < values.len());
        if let Some(tooltip) = tooltip {
            prop_assert!((0..=100).contains(&tooltip.percent));
        }
    }
}
