use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/users", post(handlers::create_user))
        .route(
            "/api/users/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/users/:user_id/entries",
            get(handlers::list_entries).post(handlers::add_entry),
        )
        .route(
            "/api/users/:user_id/goals",
            get(handlers::list_goals).post(handlers::add_goal),
        )
        .route(
            "/api/users/:user_id/goals/:goal_id",
            put(handlers::update_goal).delete(handlers::delete_goal),
        )
        .route(
            "/api/users/:user_id/goals/:goal_id/toggle",
            post(handlers::toggle_goal),
        )
        .route("/api/users/:user_id/report", get(handlers::get_report))
        .route("/api/users/:user_id/dashboard", get(handlers::get_dashboard))
        .route("/api/users/:user_id/calendar", get(handlers::get_calendar))
        .route(
            "/api/users/:user_id/preferences",
            get(handlers::get_preferences).put(handlers::put_preferences),
        )
        .route("/api/motivation", get(handlers::get_motivation))
        .route("/api/motivation/random", get(handlers::get_random_motivation))
        .with_state(state)
}
