use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// CategoryValue – a single cell in a filterable column
// ---------------------------------------------------------------------------

/// A value of one of the four filterable columns.
///
/// `year` is integral, the other three are text. Derived `Ord` sorts
/// integers before text, which keeps filter widgets in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Integer(i) => write!(f, "{i}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CategoryValue {
    fn from(v: i64) -> Self {
        CategoryValue::Integer(v)
    }
}

impl From<&str> for CategoryValue {
    fn from(v: &str) -> Self {
        CategoryValue::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// FilterColumn – the columns the sidebar can filter on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::ContractType,
        FilterColumn::CompanySize,
    ];

    /// Human-readable label used by the filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::ContractType => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single salary observation. Field names on the wire follow the source
/// dataset; the English names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano", alias = "year")]
    pub year: i64,
    #[serde(rename = "senioridade", alias = "seniority")]
    pub seniority: String,
    #[serde(rename = "contrato", alias = "contract_type")]
    pub contract_type: String,
    #[serde(rename = "tamanho_empresa", alias = "company_size")]
    pub company_size: String,
    #[serde(rename = "cargo", alias = "role")]
    pub role: String,
    #[serde(rename = "salario", alias = "salary")]
    pub salary: f64,
    #[serde(rename = "usd", alias = "salary_usd")]
    pub usd: f64,
    #[serde(rename = "remoto", alias = "remote_ratio")]
    pub remote: String,
    #[serde(rename = "residencia_iso3", alias = "residence_iso3")]
    pub residence_iso3: String,
}

impl SalaryRecord {
    /// The record's value in a filterable column.
    pub fn value_of(&self, column: FilterColumn) -> CategoryValue {
        match column {
            FilterColumn::Year => CategoryValue::Integer(self.year),
            FilterColumn::Seniority => CategoryValue::Text(self.seniority.clone()),
            FilterColumn::ContractType => CategoryValue::Text(self.contract_type.clone()),
            FilterColumn::CompanySize => CategoryValue::Text(self.company_size.clone()),
        }
    }

    /// Membership test without allocating a `CategoryValue` for text columns.
    pub fn matches(&self, column: FilterColumn, allowed: &BTreeSet<CategoryValue>) -> bool {
        let text = match column {
            FilterColumn::Year => return allowed.contains(&CategoryValue::Integer(self.year)),
            FilterColumn::Seniority => &self.seniority,
            FilterColumn::ContractType => &self.contract_type,
            FilterColumn::CompanySize => &self.company_size,
        };
        allowed
            .iter()
            .any(|v| matches!(v, CategoryValue::Text(s) if s == text))
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed dataset with the distinct values of each filter column.
/// Immutable once built; the session only ever reads from it.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of observed values.
    pub unique_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>>,
}

impl SalaryDataset {
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for rec in &records {
            for col in FilterColumn::ALL {
                unique_values
                    .entry(col)
                    .or_default()
                    .insert(rec.value_of(col));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::SalaryRecord;

    /// Build a record with sensible defaults for the columns a test ignores.
    pub fn record(year: i64, seniority: &str, role: &str, salary: f64) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: seniority.to_string(),
            contract_type: "Full-time".to_string(),
            company_size: "Medium".to_string(),
            role: role.to_string(),
            salary,
            usd: salary,
            remote: "Remote".to_string(),
            residence_iso3: "USA".to_string(),
        }
    }

    /// The three-row dataset from the worked example.
    pub fn three_rows() -> Vec<SalaryRecord> {
        vec![
            record(2023, "Senior", "Data Scientist", 100.0),
            record(2023, "Junior", "Data Analyst", 50.0),
            record(2024, "Senior", "Data Scientist", 200.0),
        ]
    }
}
