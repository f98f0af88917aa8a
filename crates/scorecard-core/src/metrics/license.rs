//! License permissiveness scorer.

use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;

/// License families accepted for open distribution. Matching is by
/// substring over the lowercased resolved license, so "apache" covers
/// "Apache License 2.0" and "apache-2.0" alike.
const OPEN_SOURCE_LICENSES: [&str; 8] = [
    "mit",
    "apache",
    "bsd",
    "gpl",
    "lgpl",
    "cc0",
    "unlicense",
    "public domain",
];

/// Binary score: 1.0 for a recognized open-source license, 0.0 otherwise
/// (including the `"Unknown"` fetch default).
pub struct License;

#[async_trait]
impl Metric for License {
    fn name(&self) -> MetricName {
        MetricName::License
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let license = fetcher.license().await.to_lowercase();
        let open = OPEN_SOURCE_LICENSES
            .iter()
            .any(|allowed| license.contains(allowed));
        MetricValue::Scalar(if open { 1.0 } else { 0.0 })
    }
}
