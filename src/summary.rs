//! Totals reported at the end of a run.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// What a generation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Templates discovered and processed.
    pub templates: usize,
    /// Outputs claimed by a successfully specialized instantiation.
    pub generated: usize,
    /// Outputs written in this run.
    pub updated: usize,
    /// Orphaned outputs removed.
    pub deleted: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl RunSummary {
    /// Outputs claimed but left untouched because they were up to date.
    pub fn kept(&self) -> usize {
        self.generated.saturating_sub(self.updated)
    }

    /// Render as a single JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn as_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} template(s), {} file(s) generated, {} updated, {} deleted in {:.2?}",
            self.templates, self.generated, self.updated, self.deleted, self.elapsed
        )
    }
}
