use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc::Sender,
};

use rayon::prelude::*;

use crate::core::metadata::MetadataEngine;
use crate::models::{OperationResult, ProgressEvent, Tags};

pub struct BulkWriter;

impl BulkWriter {
    /// Writes the same tags to every file. Results come back in input order;
    /// progress events arrive in completion order.
    pub fn write_all(
        engine: &MetadataEngine,
        paths: &[PathBuf],
        tags: &Tags,
        progress_tx: Sender<ProgressEvent>,
    ) -> Vec<OperationResult> {
        let total = paths.len();
        let progress_counter = AtomicUsize::new(0);

        paths
            .par_iter()
            .map_with(progress_tx, |progress_tx, path| {
                let result = match engine.write(path, tags) {
                    Ok(()) => OperationResult::success(path.clone()),
                    Err(err) => OperationResult::failure(path.clone(), err.to_string()),
                };

                let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                let _ = progress_tx.send(ProgressEvent {
                    current,
                    total,
                    filename: file_name(path),
                    success: result.success,
                });

                result
            })
            .collect()
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|value| value.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
