//! Configuration and constants for the dashboard.

use std::time::Duration;

use crate::data::aggregate::SummaryParams;
use crate::data::source::DataSource;

/// The dataset the dashboard opens on startup.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Timeout for fetching the remote CSV.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
pub const DEFAULT_TOP_ROLES: usize = 10;

/// Role whose per-country mean salary is mapped.
pub const DEFAULT_COUNTRY_ROLE: &str = "Data Scientist";

// Window geometry
pub const WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 500.0];

/// Startup configuration of one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub histogram_bins: usize,
    pub top_roles: usize,
    pub country_role: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(DEFAULT_DATA_URL.to_string()),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            top_roles: DEFAULT_TOP_ROLES,
            country_role: DEFAULT_COUNTRY_ROLE.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn summary_params(&self) -> SummaryParams {
        SummaryParams {
            top_roles: self.top_roles,
            histogram_bins: self.histogram_bins,
            country_role: self.country_role.clone(),
        }
    }
}
