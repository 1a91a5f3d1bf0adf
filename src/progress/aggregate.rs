//! Per-student, per-chapter time aggregation
//!
//! Walks the progress tree (student → chapter label → attempt → record) once,
//! bucketing attempt durations by canonical chapter key. Malformed input never
//! fails the walk: unusable durations add zero and labels without a chapter
//! number are skipped.

use super::chapter::{normalize_chapter_key, ChapterKey};
use super::seconds::{read_seconds, SecondsReading};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Time totals for one student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentTotals {
    chapters: BTreeMap<ChapterKey, f64>,
    total_seconds: f64,
}

impl StudentTotals {
    /// Add a chapter subtotal to its bucket and to the grand total
    ///
    /// A subtotal that is not finite, or that would push the bucket or the
    /// grand total past `f64::MAX`, contributes 0 and `false` is returned. The
    /// bucket is still created so the chapter shows as seen.
    pub fn add(&mut self, chapter: ChapterKey, seconds: f64) -> bool {
        let bucket = self.chapters.entry(chapter).or_insert(0.0);
        let new_bucket = *bucket + seconds;
        let new_total = self.total_seconds + seconds;
        if !(new_bucket.is_finite() && new_total.is_finite()) {
            return false;
        }
        *bucket = new_bucket;
        self.total_seconds = new_total;
        true
    }

    /// Seconds spent in a chapter, 0 when the chapter was never seen
    pub fn chapter_seconds(&self, chapter: ChapterKey) -> f64 {
        self.chapters.get(&chapter).copied().unwrap_or(0.0)
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Populated chapter buckets in chapter order
    pub fn chapters(&self) -> impl Iterator<Item = (ChapterKey, f64)> + '_ {
        self.chapters.iter().map(|(key, secs)| (*key, *secs))
    }

    /// Populated buckets that have no column in the report
    pub fn unreported_chapters(&self) -> impl Iterator<Item = (ChapterKey, f64)> + '_ {
        self.chapters().filter(|(key, _)| !key.is_reported())
    }
}

/// Counters describing what the aggregation saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub students: usize,
    pub chapters_counted: usize,
    pub chapters_skipped: usize,
    pub attempts: usize,
    pub missing_values: usize,
    pub invalid_values: usize,
    /// Chapter subtotals dropped because the sum left the `f64` range
    pub overflowed_chapters: usize,
}

/// Aggregated totals for every student, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReport {
    students: Vec<(String, StudentTotals)>,
    stats: AggregateStats,
}

impl ProgressReport {
    pub fn students(&self) -> &[(String, StudentTotals)] {
        &self.students
    }

    pub fn student(&self, student_id: &str) -> Option<&StudentTotals> {
        self.students
            .iter()
            .find(|(id, _)| id == student_id)
            .map(|(_, totals)| totals)
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Pure: Aggregate time spent per student per chapter
///
/// Every student in the tree gets a row, even if none of its chapter labels
/// could be normalized.
pub fn aggregate_time_spent(progress: &Value) -> ProgressReport {
    let mut report = ProgressReport::default();

    for (student_id, chapters) in entries(progress) {
        let mut totals = StudentTotals::default();

        for (label, attempts) in entries(chapters) {
            let Some(chapter) = normalize_chapter_key(&label) else {
                debug!(
                    "Skipping chapter label {:?} for student {}: no chapter number",
                    label, student_id
                );
                report.stats.chapters_skipped += 1;
                continue;
            };

            let mut chapter_total = 0.0;
            for (attempt_id, attempt) in entries(attempts) {
                let reading = read_seconds(attempt);
                match reading {
                    SecondsReading::Valid(_) => {}
                    SecondsReading::Missing => report.stats.missing_values += 1,
                    SecondsReading::Invalid => {
                        trace!(
                            "Ignoring invalid time for {}/{}/{}",
                            student_id,
                            label,
                            attempt_id
                        );
                        report.stats.invalid_values += 1;
                    }
                }
                report.stats.attempts += 1;
                chapter_total += reading.contribution();
            }

            if !totals.add(chapter, chapter_total) {
                warn!(
                    "Dropping {} total for student {}: seconds exceed the representable range",
                    chapter, student_id
                );
                report.stats.overflowed_chapters += 1;
            }
            report.stats.chapters_counted += 1;
        }

        report.stats.students += 1;
        report.students.push((student_id.into_owned(), totals));
    }

    report
}

/// Key/value view of one level of the tree
///
/// The realtime database stores objects with small integer keys as arrays,
/// leaving `null` in the gaps. Arrays are read back as index-keyed maps,
/// `null` elements included, so `[null, x]` walks like `{"0": null, "1": x}`.
/// Scalars have no children.
fn entries(value: &Value) -> Vec<(Cow<'_, str>, &Value)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| (Cow::Borrowed(key.as_str()), child))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, child)| (Cow::Owned(index.to_string()), child))
            .collect(),
        _ => Vec::new(),
    }
}
