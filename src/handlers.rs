use crate::calendar::month_view;
use crate::errors::{AppError, TrackerError};
use crate::models::{
    CalendarMonth, CalendarQuery, ContentCategory, DashboardSummary, GoalRequest, GoalView,
    GoalsOverview, IndexQuery, MotivationQuery, MotivationResponse, MotivationalContent,
    NewEntry, NewUser,
    Preferences, ProfileUpdate, ProgressReport, ReportQuery, TrackerData, User, WeightEntry,
};
use crate::motivation::{daily_content_at, filter_by_category, random_content};
use crate::reports::{build_report_at, dashboard_at, goal_view_at, goals_overview_at};
use crate::repository::TrackerRepository;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::{render_dashboard, render_welcome};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Datelike, Local, NaiveDateTime};
use tracing::{error, info};

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Applies one change to a copy of the document, writes the copy out and
/// only then swaps it in. A failed change or write leaves memory untouched.
async fn apply_change<T>(
    state: &AppState,
    change: impl FnOnce(&mut TrackerData) -> Result<T, TrackerError>,
) -> Result<T, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let value = change(&mut next)?;

    if let Err(err) = persist_data(&state.data_path, &next).await {
        error!("failed to persist {}: {}", state.data_path.display(), err.message);
        return Err(err);
    }

    *data = next;
    Ok(value)
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let now = now();
    let (quote, tip) = daily_content_at(now.date());
    let data = state.data.lock().await;

    match query.user {
        Some(user_id) => {
            let summary = dashboard_at(now, &*data, &user_id)?;
            Ok(Html(render_dashboard(&summary, &quote, &tip)))
        }
        None => Ok(Html(render_welcome(&quote))),
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = apply_change(&state, |data| data.create_user(now(), payload)).await?;
    info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.user(&user_id)?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<User>, AppError> {
    let user = apply_change(&state, |data| data.update_profile(&user_id, payload)).await?;
    info!(user_id = %user.id, "profile updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    apply_change(&state, |data| data.delete_user(&user_id)).await?;
    info!(user_id = %user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<WeightEntry>>, AppError> {
    let data = state.data.lock().await;
    data.user(&user_id)?;
    Ok(Json(data.entries(&user_id)))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<NewEntry>,
) -> Result<(StatusCode, Json<WeightEntry>), AppError> {
    let entry = apply_change(&state, |data| data.add_entry(now(), &user_id, payload)).await?;
    info!(user_id = %user_id, weight = entry.weight, "entry logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_goals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<GoalsOverview>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(goals_overview_at(now(), &*data, &user_id)?))
}

pub async fn add_goal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<GoalRequest>,
) -> Result<(StatusCode, Json<GoalView>), AppError> {
    let now = now();
    let view = apply_change(&state, |data| {
        let goal = data.add_goal(now, &user_id, payload)?;
        let current = data.user(&user_id)?.current_weight;
        Ok(goal_view_at(now, goal, current))
    })
    .await?;
    info!(user_id = %user_id, goal_id = %view.goal.id, "goal created");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path((user_id, goal_id)): Path<(String, String)>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<GoalView>, AppError> {
    let now = now();
    let view = apply_change(&state, |data| {
        let goal = data.update_goal(&user_id, &goal_id, payload)?;
        let current = data.user(&user_id)?.current_weight;
        Ok(goal_view_at(now, goal, current))
    })
    .await?;
    info!(user_id = %user_id, goal_id = %goal_id, "goal updated");
    Ok(Json(view))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path((user_id, goal_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    apply_change(&state, |data| data.delete_goal(&user_id, &goal_id)).await?;
    info!(user_id = %user_id, goal_id = %goal_id, "goal deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_goal(
    State(state): State<AppState>,
    Path((user_id, goal_id)): Path<(String, String)>,
) -> Result<Json<GoalView>, AppError> {
    let now = now();
    let view = apply_change(&state, |data| {
        let goal = data.toggle_goal(&user_id, &goal_id)?;
        let current = data.user(&user_id)?.current_weight;
        Ok(goal_view_at(now, goal, current))
    })
    .await?;
    info!(goal_id = %goal_id, active = view.goal.is_active, "goal toggled");
    Ok(Json(view))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ProgressReport>, AppError> {
    let data = state.data.lock().await;
    let period = query.period.unwrap_or_default();
    Ok(Json(build_report_at(now(), &*data, &user_id, period)?))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardSummary>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(dashboard_at(now(), &*data, &user_id)?))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let today = now().date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let data = state.data.lock().await;
    data.user(&user_id)?;
    Ok(Json(month_view(year, month, &data.entries(&user_id))?))
}

pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Preferences>, AppError> {
    let data = state.data.lock().await;
    data.user(&user_id)?;
    Ok(Json(data.preferences(&user_id)))
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    let preferences =
        apply_change(&state, |data| data.set_preferences(&user_id, payload)).await?;
    info!(user_id = %user_id, "preferences saved");
    Ok(Json(preferences))
}

/// `all` and a blank value both mean no filter.
fn category_filter(query: &MotivationQuery) -> Result<Option<ContentCategory>, AppError> {
    match query.category.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(name) => name
            .parse::<ContentCategory>()
            .map(Some)
            .map_err(AppError::bad_request),
    }
}

pub async fn get_motivation(
    Query(query): Query<MotivationQuery>,
) -> Result<Json<MotivationResponse>, AppError> {
    let category = category_filter(&query)?;

    let (daily_quote, daily_tip) = daily_content_at(now().date());
    Ok(Json(MotivationResponse {
        daily_quote,
        daily_tip,
        content: filter_by_category(category),
    }))
}

pub async fn get_random_motivation(
    Query(query): Query<MotivationQuery>,
) -> Result<Json<MotivationalContent>, AppError> {
    let category = category_filter(&query)?;
    random_content(&mut rand::thread_rng(), category)
        .map(Json)
        .ok_or_else(|| AppError::not_found("no content in that category"))
}
