use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

impl OperationResult {
    pub fn success(path: PathBuf) -> Self {
        Self {
            path,
            success: true,
            error: None,
        }
    }

    pub fn failure(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub filename: String,
    pub success: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl OperationSummary {
    pub fn from_results(results: &[OperationResult]) -> Self {
        let succeeded = results.iter().filter(|result| result.success).count();

        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}
