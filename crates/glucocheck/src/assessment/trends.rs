use chrono::{Datelike, Local, TimeZone};
use serde::Serialize;

use super::domain::Area;
use super::history::HistoryEntry;

/// Slope magnitude below which a series counts as flat.
const SLOPE_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    #[serde(rename = "positive")]
    Improving,
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "negative")]
    Worsening,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > SLOPE_THRESHOLD {
            Self::Improving
        } else if slope < -SLOPE_THRESHOLD {
            Self::Worsening
        } else {
            Self::Stable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Mejorando",
            Self::Stable => "Estable",
            Self::Worsening => "Empeorando",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaTrend {
    pub area: Area,
    pub scores: Vec<u8>,
    pub trend: TrendDirection,
    pub latest_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub dates: Vec<String>,
    pub overall_scores: Vec<u8>,
    pub overall_trend: TrendDirection,
    pub areas: Vec<AreaTrend>,
    pub strength_areas: Vec<Area>,
    pub improvement_areas: Vec<Area>,
}

impl TrendReport {
    pub fn area(&self, area: Area) -> Option<&AreaTrend> {
        self.areas.iter().find(|trend| trend.area == area)
    }
}

/// Fits a trend over the history. At least two entries are needed.
///
/// Date labels are day/month on the local calendar.
pub fn analyze_trends(history: &[HistoryEntry]) -> Option<TrendReport> {
    analyze_trends_in(history, &Local)
}

/// [`analyze_trends`] with date labels taken in `zone`.
pub fn analyze_trends_in<Tz: TimeZone>(
    history: &[HistoryEntry],
    zone: &Tz,
) -> Option<TrendReport> {
    if history.len() < 2 {
        return None;
    }

    let dates = history
        .iter()
        .map(|entry| {
            let local = entry.recorded_at.with_timezone(zone);
            format!("{}/{}", local.day(), local.month())
        })
        .collect();

    let overall_scores: Vec<u8> = history
        .iter()
        .map(|entry| entry.scores.overall_or_default())
        .collect();
    let overall_trend = classify(&overall_scores);

    let areas: Vec<AreaTrend> = Area::ordered()
        .into_iter()
        .map(|area| {
            let scores: Vec<u8> = history
                .iter()
                .map(|entry| entry.scores.area_or_default(area))
                .collect();
            let latest_score = scores.last().copied().unwrap_or_default();
            AreaTrend {
                area,
                trend: classify(&scores),
                scores,
                latest_score,
            }
        })
        .collect();

    let (strength_areas, improvement_areas) = rank_areas(&areas);

    Some(TrendReport {
        dates,
        overall_scores,
        overall_trend,
        areas,
        strength_areas,
        improvement_areas,
    })
}

/// Ordinary least-squares slope of the scores against their index.
pub fn regression_slope(scores: &[u8]) -> f64 {
    let n = scores.len();
    if n < 2 {
        return 0.0;
    }

    let count = n as f64;
    let mean_x = (0..n).map(|i| i as f64).sum::<f64>() / count;
    let mean_y = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / count;

    let (numerator, denominator) =
        scores
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(num, den), (i, &score)| {
                let dx = i as f64 - mean_x;
                (num + dx * (f64::from(score) - mean_y), den + dx * dx)
            });

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn classify(scores: &[u8]) -> TrendDirection {
    TrendDirection::from_slope(regression_slope(scores))
}

/// Top two areas by latest score, and bottom two weakest first. Ties keep area order.
fn rank_areas(areas: &[AreaTrend]) -> (Vec<Area>, Vec<Area>) {
    let mut ranked: Vec<(Area, u8)> = areas
        .iter()
        .map(|trend| (trend.area, trend.latest_score))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let strengths = ranked.iter().take(2).map(|(area, _)| *area).collect();
    let improvements = ranked.iter().rev().take(2).map(|(area, _)| *area).collect();
    (strengths, improvements)
}
