use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScorePoint {
    pub date: String,
    pub score: u8,
    pub class_average: u8,
}

impl ScorePoint {
    pub fn new(date: impl Into<String>, score: u8, class_average: u8) -> Self {
        Self {
            date: date.into(),
            score,
            class_average,
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub mean: u8,
    pub trend: Trend,
}

// Half-to-half swings within this many points count as stable.
const TREND_MARGIN: f64 = 5.0;

fn mean_score(points: &[ScorePoint]) -> f64 {
    points.iter().map(|p| p.score as f64).sum::<f64>() / points.len() as f64
}

pub fn estimate(points: &[ScorePoint]) -> PerformanceSummary {
    if points.is_empty() {
        return PerformanceSummary {
            mean: 0,
            trend: Trend::Stable,
        };
    }

    let mean = mean_score(points).round() as u8;
    if points.len() < 2 {
        return PerformanceSummary {
            mean,
            trend: Trend::Stable,
        };
    }

    // With an odd count the extra point lands in the second half.
    let (first, second) = points.split_at(points.len() / 2);
    let first_avg = mean_score(first);
    let second_avg = mean_score(second);

    let trend = if second_avg - first_avg > TREND_MARGIN {
        Trend::Improving
    } else if first_avg - second_avg > TREND_MARGIN {
        Trend::Declining
    } else {
        Trend::Stable
    };

    PerformanceSummary { mean, trend }
}

/// Series for the "your score vs class average" line chart.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub scores: Vec<u8>,
    pub class_average: Vec<u8>,
}

pub fn chart_data(points: &[ScorePoint]) -> ChartData {
    ChartData {
        labels: points.iter().map(|p| p.date.clone()).collect(),
        scores: points.iter().map(|p| p.score).collect(),
        class_average: points.iter().map(|p| p.class_average).collect(),
    }
}
