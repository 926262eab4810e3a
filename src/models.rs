use crate::metrics::BmiCategory;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Inches.
    pub height: f64,
    /// Pounds; follows the most recently logged entry.
    pub current_weight: f64,
    pub target_weight: f64,
    pub date_joined: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub id: String,
    pub user_id: String,
    pub weight: f64,
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    /// Ounces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

/// Which way the weight has to move for a goal to be met.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Loss,
    Gain,
}

impl GoalDirection {
    /// A target at or below the starting weight is a loss goal.
    pub fn between(start_weight: f64, target_weight: f64) -> Self {
        if target_weight <= start_weight {
            GoalDirection::Loss
        } else {
            GoalDirection::Gain
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_weight: f64,
    pub target_date: NaiveDate,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    /// The user's current weight when the goal was created.
    pub start_weight: f64,
    pub direction: GoalDirection,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Quote,
    Tip,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Nutrition,
    Exercise,
    Mindset,
    General,
}

impl FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nutrition" => Ok(ContentCategory::Nutrition),
            "exercise" => Ok(ContentCategory::Exercise),
            "mindset" => Ok(ContentCategory::Mindset),
            "general" => Ok(ContentCategory::General),
            other => Err(format!("unknown content category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MotivationalContent {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub content: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'static str>,
    pub category: ContentCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub units: Units,
    pub notifications: bool,
    pub weekly_reminders: bool,
    pub share_progress: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            units: Units::Imperial,
            notifications: true,
            weekly_reminders: true,
            share_progress: false,
        }
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerData {
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub entries: Vec<WeightEntry>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub preferences: BTreeMap<String, Preferences>,
}

/// Rolling lookback window used to filter entries for trend display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn all() -> &'static [Period] {
        &[Period::Week, Period::Month, Period::Quarter, Period::Year]
    }

    pub fn days(self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
            Period::Year => 365,
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "quarter" => Ok(Period::Quarter),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    /// Sunday that opens the week.
    pub week: NaiveDate,
    pub average_weight: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Negative means weight was lost.
    pub total_change: f64,
    pub time_span_days: i64,
    pub avg_change_per_day: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightChange {
    pub change: f64,
    /// Loss or no change.
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub date: NaiveDateTime,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub target_weight: Option<f64>,
    pub bounds: Option<AxisBounds>,
}

/// One cell of a month grid. Leading cells before the 1st are empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CalendarSlot {
    Empty,
    #[serde(rename_all = "camelCase")]
    Day { date: NaiveDate, has_entry: bool },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub slots: Vec<CalendarSlot>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: f64,
    pub completed: bool,
    pub days_left: i64,
    pub deadline: String,
    pub remaining: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GoalsOverview {
    pub active: Vec<GoalView>,
    pub completed: Vec<GoalView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressReport {
    pub period: Period,
    pub entries: Vec<WeightEntry>,
    pub stats: Option<ProgressStats>,
    pub weekly: Vec<WeeklyProgress>,
    pub chart: ChartSeries,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user: User,
    pub bmi: BmiReading,
    pub weight_change: Option<WeightChange>,
    pub remaining_to_target: f64,
    pub this_week: Vec<WeightEntry>,
    pub recent_entries: Vec<WeightEntry>,
    pub calendar: CalendarMonth,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationResponse {
    pub daily_quote: MotivationalContent,
    pub daily_tip: MotivationalContent,
    pub content: Vec<MotivationalContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub height: f64,
    pub current_weight: f64,
    pub target_weight: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub weight: f64,
    /// Defaults to the time the entry is recorded.
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub exercise: Option<String>,
    #[serde(default)]
    pub water_intake: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for both creating and editing a goal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub title: String,
    pub target_weight: f64,
    pub target_date: NaiveDate,
    #[serde(rename = "type", default)]
    pub goal_type: GoalType,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportQuery {
    pub period: Option<Period>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MotivationQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    pub user: Option<String>,
}
