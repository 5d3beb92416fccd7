use indicatif::{ProgressBar, ProgressStyle};
use pdbkit::workflows::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Drives a terminal spinner from workflow progress events.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Starting...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::Fetching { url } => {
                    pb_guard.set_message(format!("Fetching {}", url));
                }
                Progress::Writing { path } => {
                    pb_guard.set_message(format!("Writing {}", path.display()));
                }
                Progress::ExtractingChain { chain_id } => {
                    pb_guard.set_message(format!("Extracting chain {}", chain_id));
                }
                Progress::Superseded { old_id, new_id } => {
                    pb_guard.println(format!("  {} has been superseded by {}", old_id, new_id));
                }
            }
        })
    }

    /// Stops the spinner, leaving `message` in its place.
    pub fn finish(&self, message: &str) {
        if let Ok(pb) = self.pb.lock() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn clear(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn callback_updates_spinner_message() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::Fetching {
            url: "https://files.rcsb.org/download/1ABC.pdb".to_string(),
        });
        assert_eq!(
            handler.pb.lock().unwrap().message(),
            "Fetching https://files.rcsb.org/download/1ABC.pdb"
        );

        callback(Progress::Writing {
            path: PathBuf::from("out/1ABC.pdb"),
        });
        assert_eq!(handler.pb.lock().unwrap().message(), "Writing out/1ABC.pdb");

        callback(Progress::ExtractingChain { chain_id: 'B' });
        assert_eq!(handler.pb.lock().unwrap().message(), "Extracting chain B");

        handler.finish("✓ Done");
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::ExtractingChain { chain_id: 'C' });
        })
        .join()
        .unwrap();

        handler.clear();
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "Extracting chain C");
    }
}
