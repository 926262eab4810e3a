//! Derived views over a snapshot of weight entries.
//!
//! Everything here is a pure function of its arguments. Functions that need
//! the current time come in pairs: `foo` reads the local clock and `foo_at`
//! takes the reference instant explicitly.

use crate::metrics::{format_short_date, week_start};
use crate::models::{
    AxisBounds, ChartPoint, ChartSeries, Goal, GoalDirection, Period, ProgressStats, User,
    WeeklyProgress, WeightChange, WeightEntry,
};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Padding above and below the plotted weights, in pounds.
const CHART_PADDING: f64 = 10.0;

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Whole days covered by `delta`, rounded up.
fn ceil_days(delta: Duration) -> i64 {
    (delta.num_milliseconds() as f64 / MILLIS_PER_DAY).ceil() as i64
}

pub fn filter_by_period(entries: &[WeightEntry], period: Period) -> Vec<WeightEntry> {
    filter_by_period_at(now_local(), entries, period)
}

/// Keeps entries dated on or after `now - period`, preserving input order.
pub fn filter_by_period_at(
    now: NaiveDateTime,
    entries: &[WeightEntry],
    period: Period,
) -> Vec<WeightEntry> {
    let start = now - Duration::days(period.days());
    entries
        .iter()
        .filter(|entry| entry.date >= start)
        .cloned()
        .collect()
}

/// Groups every entry by the Sunday opening its week and averages each group.
///
/// Weeks with no entries are absent from the result, which is ascending by
/// week.
pub fn weekly_aggregates(entries: &[WeightEntry]) -> Vec<WeeklyProgress> {
    let mut weeks: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let bucket = weeks.entry(week_start(entry.date).date()).or_default();
        bucket.0 += entry.weight;
        bucket.1 += 1;
    }

    weeks
        .into_iter()
        .map(|(week, (sum, count))| WeeklyProgress {
            week,
            average_weight: sum / count as f64,
            entries: count,
        })
        .collect()
}

/// Trend between the earliest and latest entry.
///
/// Returns `None` with fewer than two entries; that is "not enough data",
/// not a zero change. Entries sharing one instant report a zero daily rate.
pub fn progress_stats(entries: &[WeightEntry]) -> Option<ProgressStats> {
    if entries.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);
    let first = sorted.first()?;
    let last = sorted.last()?;

    let total_change = last.weight - first.weight;
    let time_span_days = ceil_days(last.date - first.date);
    let avg_change_per_day = if time_span_days == 0 {
        0.0
    } else {
        total_change / time_span_days as f64
    };

    Some(ProgressStats {
        total_change,
        time_span_days,
        avg_change_per_day,
        count: entries.len(),
    })
}

pub fn progress_stats_for_period(entries: &[WeightEntry], period: Period) -> Option<ProgressStats> {
    progress_stats_for_period_at(now_local(), entries, period)
}

pub fn progress_stats_for_period_at(
    now: NaiveDateTime,
    entries: &[WeightEntry],
    period: Period,
) -> Option<ProgressStats> {
    progress_stats(&filter_by_period_at(now, entries, period))
}

/// Percentage of the way from `start_weight` to `target_weight`, capped at 100.
///
/// A goal whose target equals its start is already met.
pub fn goal_progress_from(start_weight: f64, target_weight: f64, current_weight: f64) -> f64 {
    if start_weight == target_weight {
        return 100.0;
    }

    let total = (start_weight - target_weight).abs();
    let covered = (start_weight - current_weight).abs();
    (covered / total * 100.0).min(100.0)
}

/// Progress measured from the weight recorded when the goal was created.
pub fn goal_progress(goal: &Goal, current_weight: f64) -> f64 {
    goal_progress_from(goal.start_weight, goal.target_weight, current_weight)
}

pub fn is_goal_complete(goal: &Goal, current_weight: f64) -> bool {
    match goal.direction {
        GoalDirection::Loss => current_weight <= goal.target_weight,
        GoalDirection::Gain => current_weight >= goal.target_weight,
    }
}

pub fn days_until(target_date: NaiveDate) -> i64 {
    days_until_at(now_local(), target_date)
}

/// Days from `now` to midnight of `target_date`, rounded up. Negative when
/// the date has passed.
pub fn days_until_at(now: NaiveDateTime, target_date: NaiveDate) -> i64 {
    ceil_days(target_date.and_time(NaiveTime::MIN) - now)
}

/// Change between the two most recent entries.
pub fn weight_change(entries: &[WeightEntry]) -> Option<WeightChange> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    let (latest, previous) = match sorted.as_slice() {
        [latest, previous, ..] => (latest, previous),
        _ => return None,
    };

    let change = latest.weight - previous.weight;
    Some(WeightChange {
        change: change.abs(),
        is_positive: change <= 0.0,
    })
}

pub fn this_week_entries(entries: &[WeightEntry]) -> Vec<WeightEntry> {
    this_week_entries_at(now_local(), entries)
}

/// Entries logged since midnight of the Sunday that opens the current week.
pub fn this_week_entries_at(now: NaiveDateTime, entries: &[WeightEntry]) -> Vec<WeightEntry> {
    let start = week_start(now).date().and_time(NaiveTime::MIN);
    entries
        .iter()
        .filter(|entry| entry.date >= start)
        .cloned()
        .collect()
}

pub fn remaining_to_target(current_weight: f64, target_weight: f64) -> f64 {
    (current_weight - target_weight).abs()
}

/// Oldest-first plot data with an optional flat target line.
///
/// The axis spans the weights and the target, padded by ten pounds and
/// floored at zero.
pub fn chart_series(entries: &[WeightEntry], target_weight: Option<f64>) -> ChartSeries {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);

    let points: Vec<ChartPoint> = sorted
        .iter()
        .map(|entry| ChartPoint {
            label: format_short_date(entry.date.date()),
            date: entry.date,
            weight: entry.weight,
        })
        .collect();

    let target_weight = target_weight.filter(|target| *target > 0.0);
    let bounds = if points.is_empty() {
        None
    } else {
        let weights = points.iter().map(|point| point.weight).chain(target_weight);
        let (low, high) = weights.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| {
            (lo.min(w), hi.max(w))
        });
        Some(AxisBounds {
            min: (low - CHART_PADDING).max(0.0),
            max: high + CHART_PADDING,
        })
    };

    ChartSeries {
        points,
        target_weight,
        bounds,
    }
}

/// Short sentences describing the trend and the distance to the user's
/// target. Empty when there is not enough data for a trend.
pub fn progress_insights(stats: Option<&ProgressStats>, user: &User) -> Vec<String> {
    let Some(stats) = stats else {
        return Vec::new();
    };

    let trend = if stats.total_change <= 0.0 {
        format!(
            "You're on track! You've lost {:.1} lbs over the last {} days.",
            stats.total_change.abs(),
            stats.time_span_days
        )
    } else {
        format!(
            "You've gained {:.1} lbs over the last {} days. Consider reviewing your goals.",
            stats.total_change, stats.time_span_days
        )
    };

    let target = if user.current_weight > user.target_weight {
        format!(
            "You're {:.1} lbs away from your target weight of {} lbs.",
            user.current_weight - user.target_weight,
            user.target_weight
        )
    } else {
        "Congratulations! You've reached your target weight goal.".to_string()
    };

    vec![trend, target]
}
