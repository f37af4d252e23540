//! Dashboard metrics
//!
//! Pure functions over one snapshot's tables. Nothing here mutates its input;
//! every result is a new value. Missing cells always count as zero.

use crate::core::models::sdg::NONE_KEY;
use crate::core::models::tables::saturating_sum;
use crate::core::models::{CountsTable, OverallDistribution, Snapshot, TopicDistribution, UnitRecord};
use std::fmt;
use std::str::FromStr;

/// Percentage of `part` in `whole`, 0 when `whole` is 0
#[allow(clippy::cast_precision_loss)]
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Share of mentions mapped to any SDG, in percent
///
/// `100 * (sum of non-NONE counts) / (sum of all counts)`; 0 for an empty or
/// all-zero distribution.
#[must_use]
pub fn alignment_rate(overall: &OverallDistribution) -> f64 {
    percent(overall.sdg_total(), overall.total())
}

/// Sum of every count column of a unit, `NONE` included
#[must_use]
pub fn unit_total(unit: &UnitRecord) -> u64 {
    unit.none_count
        .unwrap_or(0)
        .saturating_add(unit_sdg_total(unit))
}

/// Sum of the SDG columns of a unit
#[must_use]
pub fn unit_sdg_total(unit: &UnitRecord) -> u64 {
    saturating_sum(unit.sdg_counts.values().copied())
}

/// Number of distinct SDGs with at least one item
#[must_use]
pub fn unit_diversity(unit: &UnitRecord) -> usize {
    unit.sdg_counts.values().filter(|count| **count > 0).count()
}

/// Share of a unit's items mapped to any SDG, in percent
#[must_use]
pub fn unit_alignment_rate(unit: &UnitRecord) -> f64 {
    percent(unit_sdg_total(unit), unit_total(unit))
}

/// Share of all units that have at least one item on the topic SDG
///
/// `total_units` is the size of the counts table, not of the topic table.
#[must_use]
pub fn topic_engagement_rate(topic: &TopicDistribution, total_units: usize) -> f64 {
    percent(engaged_units(topic) as u64, total_units as u64)
}

fn engaged_units(topic: &TopicDistribution) -> usize {
    topic.entries.iter().filter(|entry| entry.count > 0).count()
}

/// Headline figures shown above every view
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSummary {
    /// Units in the counts table
    pub total_units: usize,
    /// All mentions in the overall distribution
    pub total_mentions: u64,
    /// Mentions mapped to some SDG
    pub sdg_mentions: u64,
    /// Unmapped mentions
    pub none_mentions: u64,
    /// `sdg_mentions / total_mentions` in percent
    pub alignment_rate: f64,
}

/// Compute the headline figures of a snapshot
#[must_use]
pub fn summarize(snapshot: &Snapshot) -> SnapshotSummary {
    SnapshotSummary {
        total_units: snapshot.counts.len(),
        total_mentions: snapshot.overall.total(),
        sdg_mentions: snapshot.overall.sdg_total(),
        none_mentions: snapshot.overall.none_count(),
        alignment_rate: alignment_rate(&snapshot.overall),
    }
}

/// The `n` items with the largest key, largest first
///
/// The sort is stable, so items with equal keys keep their input order.
/// Never returns more than `min(n, items.len())` items.
#[must_use]
pub fn top_n<T: Clone>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.into_iter().take(n).cloned().collect()
}

/// An overall-distribution entry with its share of aligned mentions
#[derive(Debug, Clone, PartialEq)]
pub struct SdgShare {
    /// SDG code
    pub sdg: String,
    /// Total mentions
    pub count: u64,
    /// `count / aligned mentions` in percent
    pub share_of_aligned: f64,
}

/// The `n` most mentioned SDGs, `NONE` excluded
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn top_sdgs(overall: &OverallDistribution, n: usize) -> Vec<SdgShare> {
    let aligned = overall.sdg_total();
    let shares: Vec<SdgShare> = overall
        .entries
        .iter()
        .filter(|entry| entry.sdg != NONE_KEY)
        .map(|entry| SdgShare {
            sdg: entry.sdg.clone(),
            count: entry.count,
            share_of_aligned: percent(entry.count, aligned),
        })
        .collect();
    top_n(&shares, n, |share| share.count as f64)
}

/// Metric a unit ranking can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    /// Unit alignment rate
    AlignmentRate,
    /// Items mapped to any SDG
    SdgTotal,
    /// Distinct SDGs covered
    Diversity,
    /// All items, `NONE` included
    Total,
}

impl RankMetric {
    /// Value of this metric for one ranking row
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, row: &UnitRanking) -> f64 {
        match self {
            Self::AlignmentRate => row.alignment_rate,
            Self::SdgTotal => row.sdg_total as f64,
            Self::Diversity => row.diversity as f64,
            Self::Total => row.total as f64,
        }
    }
}

impl FromStr for RankMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "alignment" | "alignment-rate" | "對應率" => Ok(Self::AlignmentRate),
            "sdg-total" | "sdg" | "sdg項目數" => Ok(Self::SdgTotal),
            "diversity" | "sdg多樣性" => Ok(Self::Diversity),
            "total" | "項目總數" => Ok(Self::Total),
            _ => Err(format!(
                "Unknown ranking metric: '{s}' (expected alignment, sdg-total, diversity or total)"
            )),
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlignmentRate => write!(f, "alignment"),
            Self::SdgTotal => write!(f, "sdg-total"),
            Self::Diversity => write!(f, "diversity"),
            Self::Total => write!(f, "total"),
        }
    }
}

/// Per-unit figures used by the ranking view
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRanking {
    /// Unit name
    pub unit_name: String,
    /// All items, `NONE` included
    pub total: u64,
    /// Items mapped to any SDG
    pub sdg_total: u64,
    /// `sdg_total / total` in percent
    pub alignment_rate: f64,
    /// Distinct SDGs covered
    pub diversity: usize,
}

impl UnitRanking {
    /// Compute the ranking figures of one unit
    #[must_use]
    pub fn of(unit: &UnitRecord) -> Self {
        Self {
            unit_name: unit.unit_name.clone(),
            total: unit_total(unit),
            sdg_total: unit_sdg_total(unit),
            alignment_rate: unit_alignment_rate(unit),
            diversity: unit_diversity(unit),
        }
    }
}

/// Ranking figures for every unit, in table order
#[must_use]
pub fn rank_units(table: &CountsTable) -> Vec<UnitRanking> {
    table.rows.iter().map(UnitRanking::of).collect()
}

/// The `n` best units by `metric`
#[must_use]
pub fn top_units(table: &CountsTable, metric: RankMetric, n: usize) -> Vec<UnitRanking> {
    top_n(&rank_units(table), n, |row| metric.value(row))
}

/// One SDG's weight within a unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSdg {
    /// SDG code
    pub sdg: String,
    /// Items of the unit on this SDG
    pub count: u64,
    /// `count / unit total` in percent
    pub share_of_total: f64,
}

/// Everything the unit analysis view shows for one unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitProfile {
    /// Ranking figures of the unit
    pub figures: UnitRanking,
    /// Unmapped items
    pub none_count: u64,
    /// SDGs with a positive count, largest first
    pub sdgs: Vec<UnitSdg>,
}

impl UnitProfile {
    /// The leading `n` SDGs of the unit
    #[must_use]
    pub fn top(&self, n: usize) -> &[UnitSdg] {
        &self.sdgs[..n.min(self.sdgs.len())]
    }
}

/// Build the profile of one unit, `None` when the unit is unknown
#[must_use]
pub fn unit_profile(table: &CountsTable, unit_name: &str) -> Option<UnitProfile> {
    let unit = table.unit(unit_name)?;
    let figures = UnitRanking::of(unit);
    let positive: Vec<UnitSdg> = table
        .sdg_columns()
        .into_iter()
        .map(|code| (code, unit.count(code)))
        .filter(|(_, count)| *count > 0)
        .map(|(code, count)| UnitSdg {
            sdg: code.to_string(),
            count,
            share_of_total: percent(count, figures.total),
        })
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let sdgs = top_n(&positive, positive.len(), |entry| entry.count as f64);

    Some(UnitProfile {
        none_count: unit.count(NONE_KEY),
        figures,
        sdgs,
    })
}

/// One (unit, SDG) cell of the comparison view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    /// Unit name
    pub unit_name: String,
    /// SDG code
    pub sdg: String,
    /// Items of the unit on this SDG (always > 0)
    pub count: u64,
}

/// Long-format comparison of the selected SDGs across units
///
/// Units with no positive count among `selected` are dropped, as are zero
/// cells. Rows are grouped by SDG in selection order, then by unit in table
/// order.
#[must_use]
pub fn compare_sdgs(table: &CountsTable, selected: &[&str]) -> Vec<ComparisonRow> {
    let engaged: Vec<&UnitRecord> = table
        .rows
        .iter()
        .filter(|unit| selected.iter().any(|code| unit.count(code) > 0))
        .collect();

    selected
        .iter()
        .flat_map(|code| {
            engaged.iter().filter_map(move |unit| {
                let count = unit.count(code);
                (count > 0).then(|| ComparisonRow {
                    unit_name: unit.unit_name.clone(),
                    sdg: (*code).to_string(),
                    count,
                })
            })
        })
        .collect()
}

/// Figures of the climate-action view
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    /// Items on the topic SDG across all listed units
    pub total_items: u64,
    /// Units with at least one topic item
    pub engaged_units: usize,
    /// Units in the counts table
    pub total_units: usize,
    /// `engaged_units / total_units` in percent
    pub engagement_rate: f64,
    /// Up to five units with the most topic items
    pub leaders: Vec<(String, u64)>,
}

/// Summarize the topic distribution against the unit count
#[must_use]
pub fn topic_summary(topic: &TopicDistribution, total_units: usize) -> TopicSummary {
    let entries: Vec<(String, u64)> = topic
        .entries
        .iter()
        .map(|entry| (entry.unit_name.clone(), entry.count))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let leaders = top_n(&entries, 5, |(_, count)| *count as f64);

    TopicSummary {
        total_items: topic.total(),
        engaged_units: engaged_units(topic),
        total_units,
        engagement_rate: topic_engagement_rate(topic, total_units),
        leaders,
    }
}

/// Pairwise Pearson correlation between SDG columns
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// SDG columns, in counts-table column order
    pub columns: Vec<String>,
    /// Row-major coefficients; `values[i][j]` correlates `columns[i]` with `columns[j]`
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient for a pair of SDG codes; NaN when undefined
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|column| column == a)?;
        let j = self.columns.iter().position(|column| column == b)?;
        Some(self.values[i][j])
    }
}

/// Correlate every pair of SDG columns over all units
///
/// Missing cells count as 0. A pair involving a constant column (including
/// any pair when there are fewer than two units) is NaN.
#[must_use]
pub fn correlation_matrix(table: &CountsTable) -> CorrelationMatrix {
    let columns: Vec<String> = table
        .sdg_columns()
        .into_iter()
        .map(str::to_string)
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|code| table.rows.iter().map(|unit| unit.count(code) as f64).collect())
        .collect();

    let values = series
        .iter()
        .map(|x| series.iter().map(|y| pearson(x, y)).collect())
        .collect();

    CorrelationMatrix { columns, values }
}

#[allow(clippy::cast_precision_loss)]
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
