//! Per-user access to the tracker document.
//!
//! Report builders only see the read side through [`TrackerRepository`];
//! the mutations below are what the HTTP handlers call before persisting.

use crate::errors::TrackerError;
use crate::metrics::{validate_height, validate_weight};
use crate::models::{
    Goal, GoalDirection, GoalRequest, NewEntry, NewUser, Preferences, ProfileUpdate, TrackerData,
    User, WeightEntry,
};
use chrono::{Datelike, NaiveDateTime};
use uuid::Uuid;

/// Read-only view of one user's data.
pub trait TrackerRepository {
    fn user(&self, user_id: &str) -> Result<User, TrackerError>;

    /// Newest first.
    fn entries(&self, user_id: &str) -> Vec<WeightEntry>;

    fn goals(&self, user_id: &str) -> Vec<Goal>;

    fn preferences(&self, user_id: &str) -> Preferences;
}

impl TrackerRepository for TrackerData {
    fn user(&self, user_id: &str) -> Result<User, TrackerError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| TrackerError::UserNotFound(user_id.to_string()))
    }

    fn entries(&self, user_id: &str) -> Vec<WeightEntry> {
        let mut entries: Vec<WeightEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    fn goals(&self, user_id: &str) -> Vec<Goal> {
        self.goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .cloned()
            .collect()
    }

    fn preferences(&self, user_id: &str) -> Preferences {
        self.preferences.get(user_id).cloned().unwrap_or_default()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn non_blank(field: &str, value: &str) -> Result<String, TrackerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Accepts `something@domain.tld`.
fn valid_email(value: &str) -> Result<String, TrackerError> {
    let email = non_blank("email", value)?;
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if !well_formed {
        return Err(TrackerError::Validation("email is invalid".to_string()));
    }
    Ok(email)
}

/// Years an entry may be dated in.
const ENTRY_YEARS: std::ops::RangeInclusive<i32> = 1900..=2200;

fn entry_date(date: NaiveDateTime) -> Result<NaiveDateTime, TrackerError> {
    if ENTRY_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(TrackerError::Validation(format!(
            "entry date {date} is outside {}..={}",
            ENTRY_YEARS.start(),
            ENTRY_YEARS.end()
        )))
    }
}

/// Blank optional text is stored as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl TrackerData {
    fn user_mut(&mut self, user_id: &str) -> Result<&mut User, TrackerError> {
        self.users
            .get_mut(user_id)
            .ok_or_else(|| TrackerError::UserNotFound(user_id.to_string()))
    }

    fn goal_mut(&mut self, user_id: &str, goal_id: &str) -> Result<&mut Goal, TrackerError> {
        self.goals
            .iter_mut()
            .find(|goal| goal.id == goal_id && goal.user_id == user_id)
            .ok_or_else(|| TrackerError::GoalNotFound(goal_id.to_string()))
    }

    fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.users
            .values()
            .any(|user| user.email.eq_ignore_ascii_case(email) && Some(user.id.as_str()) != except)
    }

    pub fn create_user(&mut self, now: NaiveDateTime, new: NewUser) -> Result<User, TrackerError> {
        let name = non_blank("name", &new.name)?;
        let email = valid_email(&new.email)?;
        if self.email_taken(&email, None) {
            return Err(TrackerError::Validation(format!(
                "email already registered: {email}"
            )));
        }

        let user = User {
            id: new_id(),
            email,
            name,
            avatar: optional_text(new.avatar),
            height: validate_height(new.height)?,
            current_weight: validate_weight(new.current_weight)?,
            target_weight: validate_weight(new.target_weight)?,
            date_joined: now,
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub fn update_profile(
        &mut self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, TrackerError> {
        let email = update.email.as_deref().map(valid_email).transpose()?;
        if let Some(email) = &email {
            if self.email_taken(email, Some(user_id)) {
                return Err(TrackerError::Validation(format!(
                    "email already registered: {email}"
                )));
            }
        }
        let name = update.name.as_deref().map(|n| non_blank("name", n)).transpose()?;
        let height = update.height.map(validate_height).transpose()?;
        let current_weight = update.current_weight.map(validate_weight).transpose()?;
        let target_weight = update.target_weight.map(validate_weight).transpose()?;

        let user = self.user_mut(user_id)?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if update.avatar.is_some() {
            user.avatar = optional_text(update.avatar);
        }
        if let Some(height) = height {
            user.height = height;
        }
        if let Some(weight) = current_weight {
            user.current_weight = weight;
        }
        if let Some(weight) = target_weight {
            user.target_weight = weight;
        }
        Ok(user.clone())
    }

    /// Removes the user along with every entry, goal and preference they own.
    pub fn delete_user(&mut self, user_id: &str) -> Result<User, TrackerError> {
        let user = self
            .users
            .remove(user_id)
            .ok_or_else(|| TrackerError::UserNotFound(user_id.to_string()))?;
        self.entries.retain(|entry| entry.user_id != user_id);
        self.goals.retain(|goal| goal.user_id != user_id);
        self.preferences.remove(user_id);
        Ok(user)
    }

    /// Appends an entry and makes its weight the user's current weight.
    pub fn add_entry(
        &mut self,
        now: NaiveDateTime,
        user_id: &str,
        new: NewEntry,
    ) -> Result<WeightEntry, TrackerError> {
        let weight = validate_weight(new.weight)?;
        let date = entry_date(new.date.unwrap_or(now))?;
        let user = self.user_mut(user_id)?;
        user.current_weight = weight;

        let entry = WeightEntry {
            id: new_id(),
            user_id: user_id.to_string(),
            weight,
            date,
            calories: new.calories,
            exercise: optional_text(new.exercise),
            water_intake: new.water_intake,
            notes: optional_text(new.notes),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Creates an active goal, snapshotting the user's weight as its start.
    pub fn add_goal(
        &mut self,
        now: NaiveDateTime,
        user_id: &str,
        request: GoalRequest,
    ) -> Result<Goal, TrackerError> {
        let title = non_blank("title", &request.title)?;
        let target_weight = validate_weight(request.target_weight)?;
        let start_weight = self.user(user_id)?.current_weight;

        let goal = Goal {
            id: new_id(),
            user_id: user_id.to_string(),
            title,
            target_weight,
            target_date: request.target_date,
            goal_type: request.goal_type,
            is_active: true,
            created_at: now,
            start_weight,
            direction: GoalDirection::between(start_weight, target_weight),
        };
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Edits the descriptive fields and target. The start weight stays as
    /// recorded at creation; direction follows the new target relative to it.
    pub fn update_goal(
        &mut self,
        user_id: &str,
        goal_id: &str,
        request: GoalRequest,
    ) -> Result<Goal, TrackerError> {
        let title = non_blank("title", &request.title)?;
        let target_weight = validate_weight(request.target_weight)?;

        let goal = self.goal_mut(user_id, goal_id)?;
        goal.title = title;
        goal.target_weight = target_weight;
        goal.direction = GoalDirection::between(goal.start_weight, target_weight);
        goal.target_date = request.target_date;
        goal.goal_type = request.goal_type;
        Ok(goal.clone())
    }

    pub fn delete_goal(&mut self, user_id: &str, goal_id: &str) -> Result<Goal, TrackerError> {
        let index = self
            .goals
            .iter()
            .position(|goal| goal.id == goal_id && goal.user_id == user_id)
            .ok_or_else(|| TrackerError::GoalNotFound(goal_id.to_string()))?;
        Ok(self.goals.remove(index))
    }

    pub fn toggle_goal(&mut self, user_id: &str, goal_id: &str) -> Result<Goal, TrackerError> {
        let goal = self.goal_mut(user_id, goal_id)?;
        goal.is_active = !goal.is_active;
        Ok(goal.clone())
    }

    pub fn set_preferences(
        &mut self,
        user_id: &str,
        preferences: Preferences,
    ) -> Result<Preferences, TrackerError> {
        self.user(user_id)?;
        self.preferences
            .insert(user_id.to_string(), preferences.clone());
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{goal_progress, is_goal_complete};
    use crate::models::{GoalType, Units};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn signup(data: &mut TrackerData, email: &str) -> User {
        data.create_user(
            at(2026, 1, 1),
            NewUser {
                email: email.to_string(),
                name: "Sam".to_string(),
                avatar: None,
                height: 68.0,
                current_weight: 200.0,
                target_weight: 170.0,
            },
        )
        .unwrap()
    }

    fn weigh_in(data: &mut TrackerData, user_id: &str, date: NaiveDateTime, weight: f64) -> WeightEntry {
        data.add_entry(
            at(2026, 6, 1),
            user_id,
            NewEntry {
                weight,
                date: Some(date),
                ..NewEntry::default()
            },
        )
        .unwrap()
    }

    fn goal_request(target_weight: f64) -> GoalRequest {
        GoalRequest {
            title: "Summer".to_string(),
            target_weight,
            target_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            goal_type: GoalType::Monthly,
        }
    }

    #[test]
    fn create_user_validates_input() {
        let mut data = TrackerData::default();
        let bad_height = data.create_user(
            at(2026, 1, 1),
            NewUser {
                email: "sam@example.com".to_string(),
                name: "Sam".to_string(),
                avatar: None,
                height: 0.0,
                current_weight: 200.0,
                target_weight: 170.0,
            },
        );
        assert!(matches!(bad_height, Err(TrackerError::Metric(_))));

        let bad_email = data.create_user(
            at(2026, 1, 1),
            NewUser {
                email: "not-an-email".to_string(),
                name: "Sam".to_string(),
                avatar: None,
                height: 68.0,
                current_weight: 200.0,
                target_weight: 170.0,
            },
        );
        assert!(matches!(bad_email, Err(TrackerError::Validation(_))));
        assert!(data.users.is_empty());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut data = TrackerData::default();
        signup(&mut data, "sam@example.com");
        let again = data.create_user(
            at(2026, 1, 2),
            NewUser {
                email: "SAM@example.com".to_string(),
                name: "Other".to_string(),
                avatar: None,
                height: 60.0,
                current_weight: 150.0,
                target_weight: 140.0,
            },
        );
        assert!(matches!(again, Err(TrackerError::Validation(_))));
    }

    #[test]
    fn entries_are_scoped_to_user_and_newest_first() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let alex = signup(&mut data, "alex@example.com");

        weigh_in(&mut data, &sam.id, at(2026, 3, 1), 199.0);
        weigh_in(&mut data, &sam.id, at(2026, 3, 5), 197.0);
        weigh_in(&mut data, &alex.id, at(2026, 3, 3), 150.0);

        let entries = data.entries(&sam.id);
        let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![197.0, 199.0]);
        assert_eq!(data.entries(&alex.id).len(), 1);
    }

    #[test]
    fn adding_entry_moves_current_weight() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        weigh_in(&mut data, &sam.id, at(2026, 3, 1), 195.5);
        assert_eq!(data.user(&sam.id).unwrap().current_weight, 195.5);
    }

    #[test]
    fn entry_rejects_non_positive_weight_and_unknown_user() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");

        let zero = data.add_entry(
            at(2026, 3, 1),
            &sam.id,
            NewEntry {
                weight: 0.0,
                ..NewEntry::default()
            },
        );
        assert!(matches!(zero, Err(TrackerError::Metric(_))));

        let ghost = data.add_entry(
            at(2026, 3, 1),
            "ghost",
            NewEntry {
                weight: 150.0,
                ..NewEntry::default()
            },
        );
        assert!(matches!(ghost, Err(TrackerError::UserNotFound(_))));
        assert!(data.entries.is_empty());
    }

    #[test]
    fn entry_dates_outside_calendar_range_are_rejected() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let ancient = NaiveDate::from_ymd_opt(-262_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let rejected = data.add_entry(
            at(2026, 3, 1),
            &sam.id,
            NewEntry {
                weight: 180.0,
                date: Some(ancient),
                ..NewEntry::default()
            },
        );
        assert!(matches!(rejected, Err(TrackerError::Validation(_))));
        assert!(data.entries.is_empty());
        assert_eq!(data.user(&sam.id).unwrap().current_weight, 200.0);
    }

    #[test]
    fn goal_snapshots_start_weight_and_direction() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let goal = data.add_goal(at(2026, 2, 1), &sam.id, goal_request(180.0)).unwrap();
        assert_eq!(goal.start_weight, 200.0);
        assert_eq!(goal.direction, GoalDirection::Loss);
        assert!(goal.is_active);

        weigh_in(&mut data, &sam.id, at(2026, 3, 1), 175.0);
        let edited = data
            .update_goal(&sam.id, &goal.id, goal_request(185.0))
            .unwrap();
        assert_eq!(edited.start_weight, 200.0);
        assert_eq!(edited.direction, GoalDirection::Loss);
        assert_eq!(edited.target_weight, 185.0);
    }

    #[test]
    fn retargeting_past_start_weight_flips_direction() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let goal = data.add_goal(at(2026, 2, 1), &sam.id, goal_request(180.0)).unwrap();
        weigh_in(&mut data, &sam.id, at(2026, 3, 1), 175.0);

        let edited = data
            .update_goal(&sam.id, &goal.id, goal_request(220.0))
            .unwrap();
        assert_eq!(edited.start_weight, 200.0);
        assert_eq!(edited.direction, GoalDirection::Gain);
        assert!(!is_goal_complete(&edited, 200.0));
        assert!(!is_goal_complete(&edited, 190.0));
        assert!(is_goal_complete(&edited, 221.0));
        assert_eq!(goal_progress(&edited, 210.0), 50.0);
    }

    #[test]
    fn toggle_and_delete_goal() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let goal = data.add_goal(at(2026, 2, 1), &sam.id, goal_request(180.0)).unwrap();

        assert!(!data.toggle_goal(&sam.id, &goal.id).unwrap().is_active);
        assert!(data.toggle_goal(&sam.id, &goal.id).unwrap().is_active);

        data.delete_goal(&sam.id, &goal.id).unwrap();
        assert!(matches!(
            data.delete_goal(&sam.id, &goal.id),
            Err(TrackerError::GoalNotFound(_))
        ));
    }

    #[test]
    fn goals_of_other_users_are_not_reachable() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let alex = signup(&mut data, "alex@example.com");
        let goal = data.add_goal(at(2026, 2, 1), &sam.id, goal_request(180.0)).unwrap();

        assert!(matches!(
            data.toggle_goal(&alex.id, &goal.id),
            Err(TrackerError::GoalNotFound(_))
        ));
        assert!(data.goals(&alex.id).is_empty());
    }

    #[test]
    fn profile_update_changes_only_given_fields() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let updated = data
            .update_profile(
                &sam.id,
                ProfileUpdate {
                    name: Some("Samantha".to_string()),
                    target_weight: Some(165.0),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Samantha");
        assert_eq!(updated.target_weight, 165.0);
        assert_eq!(updated.height, 68.0);
        assert_eq!(updated.email, "sam@example.com");

        let bad = data.update_profile(
            &sam.id,
            ProfileUpdate {
                height: Some(-3.0),
                ..ProfileUpdate::default()
            },
        );
        assert!(bad.is_err());
        assert_eq!(data.user(&sam.id).unwrap().height, 68.0);
    }

    #[test]
    fn preferences_default_until_set() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        assert_eq!(data.preferences(&sam.id), Preferences::default());

        let metric = Preferences {
            units: Units::Metric,
            ..Preferences::default()
        };
        data.set_preferences(&sam.id, metric.clone()).unwrap();
        assert_eq!(data.preferences(&sam.id), metric);
        assert!(data.set_preferences("ghost", metric).is_err());
    }

    #[test]
    fn deleting_user_cascades() {
        let mut data = TrackerData::default();
        let sam = signup(&mut data, "sam@example.com");
        let alex = signup(&mut data, "alex@example.com");
        weigh_in(&mut data, &sam.id, at(2026, 3, 1), 199.0);
        weigh_in(&mut data, &alex.id, at(2026, 3, 1), 150.0);
        data.add_goal(at(2026, 2, 1), &sam.id, goal_request(180.0)).unwrap();
        data.set_preferences(&sam.id, Preferences::default()).unwrap();

        data.delete_user(&sam.id).unwrap();

        assert!(data.user(&sam.id).is_err());
        assert!(data.entries(&sam.id).is_empty());
        assert!(data.goals.is_empty());
        assert!(data.preferences.is_empty());
        assert_eq!(data.entries(&alex.id).len(), 1);
    }
}
