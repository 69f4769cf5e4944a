//! Summary statistics over a [`FilteredView`].
//!
//! Every function here is pure and tolerates an empty view by returning a
//! defined default (zero, empty, or `None`).

use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Arithmetic mean of `salary`; 0 when the view is empty.
pub fn mean_salary(view: &FilteredView<'_>) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    view.iter().map(|r| r.salary).sum::<f64>() / view.len() as f64
}

/// Maximum `salary`; 0 when the view is empty.
pub fn max_salary(view: &FilteredView<'_>) -> f64 {
    view.iter()
        .map(|r| r.salary)
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))))
        .unwrap_or(0.0)
}

pub fn record_count(view: &FilteredView<'_>) -> usize {
    view.len()
}

/// Most frequent seniority. Ties go to the lexicographically smallest
/// value; `None` when the view is empty.
pub fn most_common_seniority(view: &FilteredView<'_>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in view.iter() {
        *counts.entry(rec.seniority.as_str()).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    // BTreeMap iterates in ascending key order, so a strict `>` keeps the
    // smallest key among equal counts.
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

// ---------------------------------------------------------------------------
// Chart-ready summaries
// ---------------------------------------------------------------------------

/// Mean salary per role, for the top-roles bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMean {
    pub role: String,
    pub mean_salary: f64,
}

/// The `n` roles with the highest mean salary, returned in ascending order
/// of mean so that a horizontal bar chart drawn bottom-up puts the largest
/// on top. Groups keep first-encountered order for ties.
pub fn top_roles_by_mean_salary(view: &FilteredView<'_>, n: usize) -> Vec<RoleMean> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();

    for rec in view.iter() {
        let slot = *index.entry(rec.role.as_str()).or_insert_with(|| {
            groups.push((rec.role.as_str(), 0.0, 0));
            groups.len() - 1
        });
        groups[slot].1 += rec.salary;
        groups[slot].2 += 1;
    }

    let mut means: Vec<RoleMean> = groups
        .into_iter()
        .map(|(role, sum, count)| RoleMean {
            role: role.to_string(),
            mean_salary: sum / count as f64,
        })
        .collect();

    // Stable sort: equal means stay in first-encountered order.
    means.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    means.truncate(n);
    means.reverse();
    means
}

/// Equal-width binning of `usd` over the view's range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `(left, right, count)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = self.start + i as f64 * self.bin_width;
            (left, left + self.bin_width, count)
        })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Partition the `usd` range into `bins` equal-width intervals and count
/// records per interval. The last interval is closed on the right.
/// When every value is equal the result has a single bin.
pub fn salary_usd_histogram(view: &FilteredView<'_>, bins: usize) -> Histogram {
    if view.is_empty() || bins == 0 {
        return Histogram::default();
    }

    let (min, max) = view.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.usd), hi.max(r.usd))
    });
    let range = max - min;

    // A single distinct value gets one unit-wide bin centred on it.
    if range <= 0.0 {
        return Histogram {
            start: min - 0.5,
            bin_width: 1.0,
            counts: vec![view.len()],
        };
    }

    let bin_width = range / bins as f64;
    let mut counts = vec![0; bins];
    for rec in view.iter() {
        let idx = (((rec.usd - min) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram {
        start: min,
        bin_width,
        counts,
    }
}

/// Number of records per remote-work category, most frequent first.
/// Equal counts keep first-encountered order.
pub fn remote_work_proportions(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for rec in view.iter() {
        match index.get(rec.remote.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(rec.remote.as_str(), counts.len());
                counts.push((rec.remote.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mean `usd` per residence country for records whose role equals `role`,
/// sorted by country code.
pub fn mean_usd_by_country_for_role(view: &FilteredView<'_>, role: &str) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in view.iter().filter(|r| r.role == role) {
        let entry = groups.entry(rec.residence_iso3.as_str()).or_default();
        entry.0 += rec.usd;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(country, (sum, count))| (country.to_string(), sum / count as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything the page renders for one selection
// ---------------------------------------------------------------------------

/// Owned result of one recomputation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    pub most_common_seniority: Option<String>,
    pub top_roles: Vec<RoleMean>,
    pub usd_histogram: Histogram,
    pub remote_work: Vec<(String, usize)>,
    pub country_means: Vec<(String, f64)>,
}

/// Knobs for [`DashboardSummary::compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryParams {
    pub top_roles: usize,
    pub histogram_bins: usize,
    pub country_role: String,
}

impl DashboardSummary {
    pub fn compute(view: &FilteredView<'_>, params: &SummaryParams) -> Self {
        Self {
            mean_salary: mean_salary(view),
            max_salary: max_salary(view),
            record_count: record_count(view),
            most_common_seniority: most_common_seniority(view),
            top_roles: top_roles_by_mean_salary(view, params.top_roles),
            usd_histogram: salary_usd_histogram(view, params.histogram_bins),
            remote_work: remote_work_proportions(view),
            country_means: mean_usd_by_country_for_role(view, &params.country_role),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::filter::{filter, init_filter_state};
    use crate::data::model::fixtures::{record, three_rows};
    use crate::data::model::{CategoryValue, FilterColumn, SalaryDataset, SalaryRecord};

    fn view_of(records: &[SalaryRecord]) -> FilteredView<'_> {
        FilteredView::from_rows(records.iter().collect())
    }

    fn params() -> SummaryParams {
        SummaryParams {
            top_roles: 10,
            histogram_bins: 30,
            country_role: "Data Scientist".to_string(),
        }
    }

    #[test]
    fn worked_example_year_2023() {
        let ds = SalaryDataset::from_records(three_rows());
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::Year, BTreeSet::from([CategoryValue::Integer(2023)]));
        let view = filter(&ds, &sel);

        assert_eq!(record_count(&view), 2);
        assert_eq!(mean_salary(&view), 75.0);
        assert_eq!(max_salary(&view), 100.0);
        // Senior and Junior both appear once; the smaller string wins.
        assert_eq!(most_common_seniority(&view).as_deref(), Some("Junior"));
    }

    #[test]
    fn empty_view_reports_defaults() {
        let ds = SalaryDataset::from_records(three_rows());
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::Seniority, BTreeSet::from(["Principal".into()]));
        let view = filter(&ds, &sel);

        let summary = DashboardSummary::compute(&view, &params());
        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.mean_salary, 0.0);
        assert_eq!(summary.max_salary, 0.0);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.most_common_seniority, None);
    }

    #[test]
    fn max_salary_handles_negative_only_values() {
        let rows = vec![record(2024, "Mid", "X", -5.0), record(2024, "Mid", "Y", -2.0)];
        assert_eq!(max_salary(&view_of(&rows)), -2.0);
    }

    #[test]
    fn mode_prefers_higher_count_over_order() {
        let rows = vec![
            record(2024, "Junior", "A", 1.0),
            record(2024, "Senior", "A", 1.0),
            record(2024, "Senior", "A", 1.0),
        ];
        assert_eq!(most_common_seniority(&view_of(&rows)).as_deref(), Some("Senior"));
    }

    #[test]
    fn top_roles_are_bounded_ascending_and_unique() {
        let rows: Vec<SalaryRecord> = (0..25)
            .flat_map(|i| {
                let role = format!("Role {i:02}");
                vec![
                    record(2024, "Mid", &role, 1000.0 * i as f64),
                    record(2024, "Mid", &role, 1000.0 * i as f64 + 500.0),
                ]
            })
            .collect();

        let top = top_roles_by_mean_salary(&view_of(&rows), 10);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].mean_salary <= w[1].mean_salary));
        let distinct: BTreeSet<&str> = top.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(distinct.len(), top.len());
        assert_eq!(top.last().map(|r| r.role.as_str()), Some("Role 24"));
        assert_eq!(top.last().map(|r| r.mean_salary), Some(24_250.0));
    }

    #[test]
    fn top_roles_ties_keep_first_encountered_group() {
        let rows = vec![
            record(2024, "Mid", "Zeta", 10.0),
            record(2024, "Mid", "Alpha", 10.0),
            record(2024, "Mid", "Beta", 5.0),
        ];
        let top = top_roles_by_mean_salary(&view_of(&rows), 1);
        assert_eq!(
            top,
            vec![RoleMean {
                role: "Zeta".to_string(),
                mean_salary: 10.0
            }]
        );
    }

    #[test]
    fn top_roles_with_fewer_groups_than_n_returns_every_group() {
        let rows = vec![
            record(2024, "Mid", "Data Engineer", 90.0),
            record(2024, "Mid", "Data Analyst", 50.0),
            record(2024, "Mid", "Data Scientist", 120.0),
            record(2024, "Mid", "Data Analyst", 70.0),
        ];
        let top = top_roles_by_mean_salary(&view_of(&rows), 10);
        let roles: Vec<(&str, f64)> = top.iter().map(|r| (r.role.as_str(), r.mean_salary)).collect();
        assert_eq!(
            roles,
            vec![
                ("Data Analyst", 60.0),
                ("Data Engineer", 90.0),
                ("Data Scientist", 120.0),
            ]
        );
    }

    #[test]
    fn histogram_counts_sum_to_row_count() {
        let rows: Vec<SalaryRecord> = (0..97)
            .map(|i| record(2024, "Mid", "X", (i * i) as f64 * 13.5))
            .collect();
        let hist = salary_usd_histogram(&view_of(&rows), 30);

        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.total(), rows.len());
        // The maximum falls into the closed last bin.
        assert!(hist.counts[29] >= 1);
        let (_, right, _) = hist.bins().last().unwrap_or_default();
        assert!((right - 96.0 * 96.0 * 13.5).abs() < 1e-6);
    }

    #[test]
    fn histogram_with_single_value_uses_one_bin() {
        let rows = vec![record(2024, "Mid", "X", 42.0), record(2024, "Mid", "Y", 42.0)];
        let hist = salary_usd_histogram(&view_of(&rows), 30);
        assert_eq!(hist.counts, vec![2]);
        let (left, right, _) = hist.bins().next().unwrap_or_default();
        assert!(left < 42.0 && 42.0 < right);
        assert_eq!((left + right) / 2.0, 42.0);
    }

    #[test]
    fn histogram_with_zero_bins_is_empty() {
        let rows = three_rows();
        assert!(salary_usd_histogram(&view_of(&rows), 0).is_empty());
    }

    #[test]
    fn remote_work_counts_sorted_by_frequency() {
        let mut rows = three_rows();
        rows[0].remote = "On-site".to_string();
        rows.push(record(2024, "Mid", "X", 1.0));

        let counts = remote_work_proportions(&view_of(&rows));
        assert_eq!(
            counts,
            vec![("Remote".to_string(), 3), ("On-site".to_string(), 1)]
        );
    }

    #[test]
    fn remote_work_ties_keep_first_seen_order() {
        let mut rows = vec![
            record(2024, "Mid", "A", 1.0),
            record(2024, "Mid", "B", 1.0),
            record(2024, "Mid", "C", 1.0),
        ];
        rows[0].remote = "Hybrid".to_string();
        rows[2].remote = "On-site".to_string();

        let counts = remote_work_proportions(&view_of(&rows));
        assert_eq!(
            counts,
            vec![
                ("Hybrid".to_string(), 1),
                ("Remote".to_string(), 1),
                ("On-site".to_string(), 1),
            ]
        );
    }

    #[test]
    fn summary_of_worked_example_fills_every_field() {
        let ds = SalaryDataset::from_records(three_rows());
        let mut sel = init_filter_state(&ds);
        sel.insert(FilterColumn::Year, BTreeSet::from([CategoryValue::Integer(2023)]));
        let view = filter(&ds, &sel);

        let mut counts = vec![0; 30];
        counts[0] = 1;
        counts[29] = 1;
        let expected = DashboardSummary {
            mean_salary: 75.0,
            max_salary: 100.0,
            record_count: 2,
            most_common_seniority: Some("Junior".to_string()),
            top_roles: vec![
                RoleMean {
                    role: "Data Analyst".to_string(),
                    mean_salary: 50.0,
                },
                RoleMean {
                    role: "Data Scientist".to_string(),
                    mean_salary: 100.0,
                },
            ],
            usd_histogram: Histogram {
                start: 50.0,
                bin_width: 50.0 / 30.0,
                counts,
            },
            remote_work: vec![("Remote".to_string(), 2)],
            country_means: vec![("USA".to_string(), 100.0)],
        };
        assert_eq!(DashboardSummary::compute(&view, &params()), expected);
    }

    #[test]
    fn country_means_only_include_requested_role() {
        let mut rows = three_rows();
        rows[2].residence_iso3 = "BRA".to_string();
        rows.push(SalaryRecord {
            usd: 300.0,
            ..record(2024, "Senior", "Data Scientist", 0.0)
        });

        let means = mean_usd_by_country_for_role(&view_of(&rows), "Data Scientist");
        assert_eq!(
            means,
            vec![("BRA".to_string(), 200.0), ("USA".to_string(), 200.0)]
        );
        assert!(mean_usd_by_country_for_role(&view_of(&rows), "Nobody").is_empty());
    }
}
