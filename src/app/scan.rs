// OkoView - app/scan.rs
//
// Scan lifecycle management. Builds the catalog index on a background
// thread, sending progress messages to the UI thread via an mpsc channel.
//
// Architecture:
//   - `ScanManager` lives on the UI thread; `run_scan` runs on a background thread.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the scan between files.
//   - The finished index travels back in `ScanProgress::Completed`; the UI
//     thread commits it to its own `LogCatalog`, so the catalog is never shared.

use crate::app::catalog::{self, IndexOutcome};
use crate::core::model::ScanProgress;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

// =============================================================================
// ScanManager
// =============================================================================

/// Manages a scan operation on a background thread.
pub struct ScanManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<ScanProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl ScanManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start scanning `root`.
    ///
    /// Spawns a background thread immediately; progress is sent over the channel.
    /// If a scan is already running it is cancelled first and its messages are
    /// discarded.
    pub fn start_scan(&mut self, root: PathBuf) {
        self.cancel_scan();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        tracing::info!(root = %root.display(), "Scan started");

        std::thread::spawn(move || {
            run_scan(root, tx, cancel);
        });
    }

    /// Request cancellation of the running scan.
    /// The background thread sends `ScanProgress::Cancelled` and exits.
    pub fn cancel_scan(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<ScanProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for ScanManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background scan
// =============================================================================

/// Build the index for `root`, reporting through `tx`.
///
/// Send failures mean the UI dropped the receiver (window closed or a newer
/// scan started); they are ignored and the thread simply finishes.
fn run_scan(root: PathBuf, tx: mpsc::Sender<ScanProgress>, cancel: Arc<AtomicBool>) {
    let mut listed = false;

    let result = catalog::build_index(
        &root,
        |tick| {
            if !listed {
                listed = true;
                let _ = tx.send(ScanProgress::Listed {
                    total_files: tick.total,
                });
            }
            let _ = tx.send(ScanProgress::FileProcessed {
                path: tick.path.to_path_buf(),
                processed: tick.processed,
                total: tick.total,
            });
        },
        &cancel,
    );

    let msg = match result {
        Ok(IndexOutcome::Built(index)) => {
            for skipped in &index.skipped {
                let _ = tx.send(ScanProgress::FileSkipped {
                    path: skipped.path.clone(),
                    reason: skipped.error.to_string(),
                });
            }
            ScanProgress::Completed { index }
        }
        Ok(IndexOutcome::Cancelled { processed, total }) => {
            ScanProgress::Cancelled { processed, total }
        }
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "Scan failed");
            ScanProgress::Failed {
                error: e.to_string(),
            }
        }
    };
    let _ = tx.send(msg);
}
