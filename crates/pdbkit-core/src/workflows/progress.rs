use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Progress {
    Fetching { url: String },
    Writing { path: PathBuf },
    ExtractingChain { chain_id: char },
    Superseded { old_id: String, new_id: String },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::ExtractingChain { chain_id: 'A' });
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::Fetching { url } = event {
                seen.lock().unwrap().push(url);
            }
        }));

        reporter.report(Progress::Fetching {
            url: "https://example.org/1ABC".to_string(),
        });
        reporter.report(Progress::ExtractingChain { chain_id: 'B' });
        drop(reporter);

        assert_eq!(seen.into_inner().unwrap(), vec!["https://example.org/1ABC"]);
    }
}
