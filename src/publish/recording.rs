use crate::cigar_tree::CigarTree;
use crate::publish::{Acknowledgement, PublishError, Publisher};
use serde_json::Value;
use std::sync::Mutex;
use tracing::info;

/// A submission seen by a [RecordingPublisher].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub family_id: String,
    /// Document as it would have been sent
    pub document: Value,
}

/// [Publisher] that keeps every submission in memory and answers with a
/// fixed acknowledgement.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    acknowledgement: Acknowledgement,
    submissions: Mutex<Vec<Submission>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every submission with `acknowledgement`.
    pub fn with_acknowledgement(mut self, acknowledgement: Value) -> Self {
        self.acknowledgement = Some(acknowledgement);
        self
    }

    /// Submissions so far, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions().is_empty()
    }
}

impl Publisher for RecordingPublisher {
    fn submit(&self, family_id: &str, tree: &CigarTree) -> Result<Acknowledgement, PublishError> {
        let document = serde_json::to_value(tree)?;
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(Submission {
                family_id: family_id.to_string(),
                document,
            });
        }
        info!(family_id, "recorded cigar tree");
        Ok(self.acknowledgement.clone())
    }
}
