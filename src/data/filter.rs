use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoryValue, FilterColumn, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column → set of allowed values.
///
/// * column absent → no constraint on that column
/// * empty set → nothing allowed, the view is empty
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<CategoryValue>>;

/// Initialise a [`FilterState`] with all observed values selected.
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .map(|(col, vals)| (*col, vals.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// The records passing the current selection, in dataset order.
/// Never mutated; a new view replaces the old one on every change.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a SalaryRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn from_rows(rows: Vec<&'a SalaryRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalaryRecord> + '_ {
        self.rows.iter().copied()
    }
}

/// Apply the selection to the dataset: AND across columns, OR within a
/// column's allowed set.
pub fn filter<'a>(dataset: &'a SalaryDataset, selections: &FilterState) -> FilteredView<'a> {
    // Columns with every observed value selected impose no constraint.
    let active: Vec<(FilterColumn, &BTreeSet<CategoryValue>)> = selections
        .iter()
        .filter(|(col, selected)| {
            selected.is_empty()
                || dataset
                    .unique_values
                    .get(*col)
                    .map_or(true, |all| !all.is_subset(selected))
        })
        .map(|(col, selected)| (*col, selected))
        .collect();

    if active.iter().any(|(_, selected)| selected.is_empty()) {
        return FilteredView::default();
    }

    let rows = dataset
        .records
        .iter()
        .filter(|rec| active.iter().all(|(col, selected)| rec.matches(*col, selected)))
        .collect();

    FilteredView::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, three_rows};

    fn dataset() -> SalaryDataset {
        SalaryDataset::from_records(three_rows())
    }

    #[test]
    fn full_default_selection_reproduces_dataset() {
        let ds = dataset();
        let view = filter(&ds, &init_filter_state(&ds));
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.records).all(|(a, b)| a == b));
    }

    #[test]
    fn omitted_column_is_a_no_op() {
        let ds = dataset();
        let view = filter(&ds, &FilterState::new());
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn year_filter_keeps_matching_rows_in_order() {
        let ds = dataset();
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::Year, BTreeSet::from([CategoryValue::Integer(2023)]));

        let view = filter(&ds, &sel);
        let seniorities: Vec<&str> = view.iter().map(|r| r.seniority.as_str()).collect();
        assert_eq!(seniorities, vec!["Senior", "Junior"]);
    }

    #[test]
    fn columns_combine_with_and() {
        let ds = dataset();
        let mut sel = FilterState::new();
        sel.insert(FilterColumn::Year, BTreeSet::from([CategoryValue::Integer(2023)]));
        sel.insert(FilterColumn::Seniority, BTreeSet::from(["Senior".into()]));

        let view = filter(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view.iter().next().map(|r| r.salary), Some(100.0));
    }

    #[test]
    fn empty_allowed_set_yields_empty_view() {
        let ds = dataset();
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::ContractType, BTreeSet::new());
        assert!(filter(&ds, &sel).is_empty());
    }

    #[test]
    fn unknown_value_yields_empty_view() {
        let ds = dataset();
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::Seniority, BTreeSet::from(["Executive".into()]));
        assert!(filter(&ds, &sel).is_empty());
    }

    #[test]
    fn empty_dataset_filters_to_empty_view() {
        let ds = SalaryDataset::default();
        let sel = init_filter_state(&ds);
        assert!(filter(&ds, &sel).is_empty());
    }

    #[test]
    fn every_selection_subset_respects_bounds() {
        let ds = SalaryDataset::from_records(vec![
            record(2022, "Junior", "A", 1.0),
            record(2023, "Mid", "B", 2.0),
            record(2024, "Senior", "C", 3.0),
            record(2024, "Junior", "D", 4.0),
        ]);
        let years: Vec<CategoryValue> =
            ds.unique_values[&FilterColumn::Year].iter().cloned().collect();

        for mask in 0u32..(1 << years.len()) {
            let allowed: BTreeSet<CategoryValue> = years
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, v)| v.clone())
                .collect();
            let mut sel = init_filter_state(&ds);
            sel.insert(FilterColumn::Year, allowed.clone());

            let view = filter(&ds, &sel);
            assert!(view.len() <= ds.len());
            assert!(view
                .iter()
                .all(|r| allowed.contains(&r.value_of(FilterColumn::Year))));
            let expected = ds
                .records
                .iter()
                .filter(|r| allowed.contains(&r.value_of(FilterColumn::Year)))
                .count();
            assert_eq!(view.len(), expected);
        }
    }
}
