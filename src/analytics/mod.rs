//! Module computing the summary statistics of a processed batch.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::{Money, Record, Stage};


/// Number of entries kept per categorical ranking.
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub kind: &'static str,
    pub total_count: usize,
    pub total_value: Money,
    pub average_value: Money,
    /// Mean of the signed score, for kinds which carry one
    pub average_secondary_score: Option<f64>,
    /// One entry per stage, in lifecycle order, including empty ones
    pub status_counts: Vec<StageCount>,
    pub rankings: Vec<Ranking>,
    pub patterns: Vec<PatternCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub status: &'static str,
    pub count: usize,
}

/// Most frequent values of one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub field: &'static str,
    pub top: Vec<RankEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternCount {
    pub name: &'static str,
    pub count: usize,
}

impl BatchSummary {
    pub fn count_for(&self, stage: Stage) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.stage == stage)
            .map_or(0, |entry| entry.count)
    }

    pub fn ranking(&self, field: &str) -> Option<&Ranking> {
        self.rankings.iter().find(|ranking| ranking.field == field)
    }

    pub fn pattern(&self, name: &str) -> usize {
        self.patterns
            .iter()
            .find(|pattern| pattern.name == name)
            .map_or(0, |pattern| pattern.count)
    }
}

/// Summarizes the processed records of a batch. Pure: calling it twice on the same
/// records gives the same summary. An empty slice yields zero totals.
///
/// The total saturates at [`Decimal::MAX`] instead of overflowing.
pub fn aggregate<R: Record>(records: &[R]) -> BatchSummary {
    let total_count = records.len();
    let total_value = records
        .iter()
        .map(Record::value)
        .fold(Decimal::ZERO, Money::saturating_add);
    let average_value = if total_count == 0 {
        Decimal::ZERO
    } else {
        (total_value / Decimal::from(total_count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    let secondary: Vec<f64> = records.iter().filter_map(Record::secondary_score).collect();
    let average_secondary_score =
        (!secondary.is_empty()).then(|| secondary.iter().sum::<f64>() / secondary.len() as f64);

    let status_counts = Stage::ALL
        .into_iter()
        .map(|stage| StageCount {
            stage,
            status: R::stage_label(stage),
            count: records.iter().filter(|r| r.stage() == stage).count(),
        })
        .collect();

    let rankings = R::GROUPINGS
        .iter()
        .map(|grouping| Ranking {
            field: grouping.name,
            top: top_values(records.iter().map(grouping.key), TOP_N),
        })
        .collect();

    let patterns = R::PATTERNS
        .iter()
        .map(|pattern| PatternCount {
            name: pattern.name,
            count: records.iter().filter(|r| (pattern.matches)(r)).count(),
        })
        .collect();

    BatchSummary {
        kind: R::KIND,
        total_count,
        total_value,
        average_value,
        average_secondary_score,
        status_counts,
        rankings,
        patterns,
    }
}

/// Counts the values, then keeps the `n` most frequent ones. Ties keep the order in
/// which the values were first seen.
fn top_values<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<RankEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<RankEntry> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push(RankEntry {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort: equal counts stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}s | total {:.2} | avg {:.2}",
            self.total_count, self.kind, self.total_value, self.average_value
        )?;
        if let Some(score) = self.average_secondary_score {
            write!(f, " | avg score {score:.2}")?;
        }

        let statuses: Vec<String> = self
            .status_counts
            .iter()
            .filter(|entry| entry.count > 0)
            .map(|entry| format!("{}: {}", entry.status, entry.count))
            .collect();
        write!(f, " | status [{}]", statuses.join(", "))?;

        for ranking in &self.rankings {
            let top: Vec<String> = ranking
                .top
                .iter()
                .map(|entry| format!("{}: {}", entry.value, entry.count))
                .collect();
            write!(f, " | top {} [{}]", ranking.field, top.join(", "))?;
        }
        Ok(())
    }
}
