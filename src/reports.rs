use crate::analytics::{
    chart_series, days_until_at, filter_by_period_at, goal_progress, is_goal_complete,
    progress_insights, progress_stats, remaining_to_target, this_week_entries_at, weekly_aggregates,
    weight_change,
};
use crate::calendar::month_view;
use crate::errors::TrackerError;
use crate::metrics::{calculate_bmi, categorize_bmi, format_date};
use crate::models::{
    BmiReading, DashboardSummary, Goal, GoalView, GoalsOverview, Period, ProgressReport,
};
use crate::repository::TrackerRepository;
use chrono::{Datelike, Local, NaiveDateTime};

/// Weekly aggregates shown alongside a report.
const WEEK_COUNT: usize = 8;

/// Entries listed under "recent" on the dashboard.
const RECENT_COUNT: usize = 5;

pub fn build_report(
    repo: &impl TrackerRepository,
    user_id: &str,
    period: Period,
) -> Result<ProgressReport, TrackerError> {
    build_report_at(Local::now().naive_local(), repo, user_id, period)
}

pub fn build_report_at(
    now: NaiveDateTime,
    repo: &impl TrackerRepository,
    user_id: &str,
    period: Period,
) -> Result<ProgressReport, TrackerError> {
    let user = repo.user(user_id)?;
    let entries = repo.entries(user_id);
    let filtered = filter_by_period_at(now, &entries, period);

    let stats = progress_stats(&filtered);
    let weekly = weekly_aggregates(&entries);
    let weekly = weekly[weekly.len().saturating_sub(WEEK_COUNT)..].to_vec();
    let chart = chart_series(&filtered, Some(user.target_weight));
    let insights = progress_insights(stats.as_ref(), &user);

    Ok(ProgressReport {
        period,
        entries: filtered,
        stats,
        weekly,
        chart,
        insights,
    })
}

pub fn goal_view_at(now: NaiveDateTime, goal: Goal, current_weight: f64) -> GoalView {
    GoalView {
        progress: goal_progress(&goal, current_weight),
        completed: is_goal_complete(&goal, current_weight),
        days_left: days_until_at(now, goal.target_date),
        deadline: format_date(goal.target_date),
        remaining: remaining_to_target(current_weight, goal.target_weight),
        goal,
    }
}

/// Splits goals into active ones and finished ones.
///
/// A goal counts as finished when it is inactive or already met, so an
/// active, met goal shows up in both lists.
pub fn goals_overview_at(
    now: NaiveDateTime,
    repo: &impl TrackerRepository,
    user_id: &str,
) -> Result<GoalsOverview, TrackerError> {
    let user = repo.user(user_id)?;
    let views: Vec<GoalView> = repo
        .goals(user_id)
        .into_iter()
        .map(|goal| goal_view_at(now, goal, user.current_weight))
        .collect();

    let active = views.iter().filter(|view| view.goal.is_active).cloned().collect();
    let completed = views
        .into_iter()
        .filter(|view| !view.goal.is_active || view.completed)
        .collect();

    Ok(GoalsOverview { active, completed })
}

pub fn dashboard_at(
    now: NaiveDateTime,
    repo: &impl TrackerRepository,
    user_id: &str,
) -> Result<DashboardSummary, TrackerError> {
    let user = repo.user(user_id)?;
    let entries = repo.entries(user_id);

    let bmi = calculate_bmi(user.current_weight, user.height)?;
    let calendar = month_view(now.year(), now.month(), &entries)?;

    Ok(DashboardSummary {
        bmi: BmiReading {
            value: bmi,
            category: categorize_bmi(bmi),
        },
        weight_change: weight_change(&entries),
        remaining_to_target: remaining_to_target(user.current_weight, user.target_weight),
        this_week: this_week_entries_at(now, &entries),
        recent_entries: entries.iter().take(RECENT_COUNT).cloned().collect(),
        calendar,
        user,
    })
}
