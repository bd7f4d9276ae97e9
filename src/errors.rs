use color_eyre::Section;
use color_eyre::eyre::{Report, eyre};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading repository documents from disk.
#[derive(Debug, Error)]
pub(crate) enum FeedError {
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// This error is used to collect multiple eyre Reports into one
#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct StrError(pub(crate) String);

/// Combine multiple results into either a success vector or aggregated error report
///
/// * `results` - Vector of results to combine
///
/// # Errors
///
/// Returns aggregated error report containing all individual errors if any results were Err
pub(crate) fn join_errors<T>(results: Vec<Result<T, Report>>) -> Result<Vec<T>, Report> {
    let (values, errors) = split_results(results);

    if errors.is_empty() {
        Ok(values)
    } else {
        let combined = errors
            .into_iter()
            .fold(eyre!("Encountered multiple errors"), |report, e| {
                report.with_error(|| StrError(format!("{:?}", e)))
            });
        Err(combined)
    }
}

fn split_results<T>(results: Vec<Result<T, Report>>) -> (Vec<T>, Vec<Report>) {
    let mut values = Vec::with_capacity(results.len());
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) => errors.push(err),
        }
    }

    (values, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_errors_all_ok() {
        let results: Vec<Result<u8, Report>> = vec![Ok(1), Ok(2)];
        assert_eq!(join_errors(results).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_join_errors_collects_failures() {
        let results: Vec<Result<u8, Report>> =
            vec![Ok(1), Err(eyre!("first feed")), Err(eyre!("second feed"))];
        let report = join_errors(results).unwrap_err();
        assert_eq!(report.to_string(), "Encountered multiple errors");
    }

    #[test]
    fn test_split_results() {
        let results: Vec<Result<u8, Report>> =
            vec![Ok(1), Err(eyre!("first feed")), Ok(2), Err(eyre!("second feed"))];
        let (values, errors) = split_results(results);

        assert_eq!(values, vec![1, 2]);
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["first feed", "second feed"]);
    }
}
