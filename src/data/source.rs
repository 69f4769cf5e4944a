use std::fmt;
use std::path::PathBuf;

use log::{debug, info};
use reqwest::blocking::Client;

use super::error::LoadError;
use super::loader;
use super::model::SalaryDataset;
use crate::config::HTTP_TIMEOUT;

/// Where the session's dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// CSV served over HTTP(S).
    Url(String),
    /// Local file; format picked by extension.
    Path(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl DataSource {
    /// Fetch and parse the dataset. Called once per session (and on Reload).
    pub fn load(&self) -> Result<SalaryDataset, LoadError> {
        let dataset = match self {
            DataSource::Url(url) => fetch_csv(url)?,
            DataSource::Path(path) => loader::load_file(path)?,
        };
        info!("Loaded {} salary records from {self}", dataset.len());
        Ok(dataset)
    }
}

fn fetch_csv(url: &str) -> Result<SalaryDataset, LoadError> {
    debug!("GET {url}");
    let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes()?;
    debug!("Fetched {} bytes", body.len());
    loader::load_csv_reader(body.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_url_or_path() {
        let url = DataSource::Url("https://example.org/data.csv".to_string());
        assert_eq!(url.to_string(), "https://example.org/data.csv");

        let path = DataSource::Path(PathBuf::from("data/salaries.csv"));
        assert_eq!(path.to_string(), "data/salaries.csv");
    }

    #[test]
    fn missing_local_file_is_an_io_error() {
        let source = DataSource::Path(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(source.load(), Err(LoadError::Io(_))));
    }
}
