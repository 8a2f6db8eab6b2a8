use std::num::IntErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Hard ceiling on how many reports hacktivity search will page through.
pub const MAX_REPORTS: usize = 3000;

/// Number of reports fetched when `-n` is not given.
pub const DEFAULT_REPORTS: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Vulnerability name must not be empty.")]
    EmptyCategory,

    #[error("Number of reports must be greater than 0.")]
    CountTooSmall,

    #[error("HackerOne API max is {max} reports. Please choose {max} or less.", max = MAX_REPORTS)]
    CountTooLarge,
}

/// Validated search request, built once from command-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    category: String,
    max_count: usize,
    output: Option<PathBuf>,
}

impl FetchRequest {
    /// Joins the category words and checks the requested count.
    pub fn new(
        words: &[String],
        count: i64,
        output: Option<PathBuf>,
    ) -> Result<Self, RequestError> {
        let category = words.join(" ");
        if category.trim().is_empty() {
            return Err(RequestError::EmptyCategory);
        }
        if count <= 0 {
            return Err(RequestError::CountTooSmall);
        }
        let max_count = usize::try_from(count).map_err(|_| RequestError::CountTooLarge)?;
        if max_count > MAX_REPORTS {
            return Err(RequestError::CountTooLarge);
        }

        Ok(Self {
            category,
            max_count,
            output,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Explicit `-o` path, or `<category with underscores>.csv`.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => default_output_path(&self.category),
        }
    }

    /// Records are echoed to the terminal only when no output file was named.
    pub fn echo_to_terminal(&self) -> bool {
        self.output.is_none()
    }
}

/// Parses `-n` without a width limit: integers past `i64` saturate so that
/// range validation still reports them as too large or too small.
pub fn parse_count(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(format!("invalid integer '{}'", raw)),
        },
    }
}

pub fn default_output_path(category: &str) -> PathBuf {
    PathBuf::from(format!("{}.csv", category.replace(' ', "_")))
}
