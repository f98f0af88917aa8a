//! Dataset quality scorer.
//!
//! Three independent components summed: documentation depth (word count),
//! community adoption (download count), and documentation structure
//! (presence of the sections a usable dataset card carries).

use crate::fetcher::{text, ArtifactFetcher, ArtifactKind};
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;

const STRUCTURE_KEYWORDS: [&str; 6] =
    ["license", "download", "split", "train", "test", "validation"];

/// Word count at which the card counts as thoroughly documented.
const THOROUGH_WORDS: usize = 820;

pub struct DatasetQuality;

pub(crate) fn score_components(readme: &str, downloads: u64) -> f64 {
    let mut score = 0.0;

    if text::word_count(readme) >= THOROUGH_WORDS {
        score += 0.3;
    }

    if downloads >= 100_000 {
        score += 0.2;
    } else if downloads >= 50_000 {
        score += 0.15;
    }

    let lowered = readme.to_lowercase();
    if STRUCTURE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        score += 0.5;
    }

    score
}

#[async_trait]
impl Metric for DatasetQuality {
    fn name(&self) -> MetricName {
        MetricName::DatasetQuality
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let readme = fetcher.readme(ArtifactKind::Dataset).await;
        let downloads = fetcher.dataset_downloads().await;
        MetricValue::Scalar(score_components(&readme, downloads))
    }
}
