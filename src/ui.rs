use crate::calendar::COLUMNS;
use crate::metrics::{format_date, format_weight};
use crate::models::{CalendarSlot, DashboardSummary, MotivationalContent, WeightEntry};
use chrono::Datelike;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_quote(quote: &MotivationalContent) -> String {
    let author = quote
        .author
        .map(|author| format!("<cite>{}</cite>", escape_html(author)))
        .unwrap_or_default();
    format!(
        "<blockquote>{}{author}</blockquote>",
        escape_html(quote.content)
    )
}

fn render_entry(entry: &WeightEntry) -> String {
    let mut details = Vec::new();
    if let Some(calories) = entry.calories {
        details.push(format!("{calories} kcal"));
    }
    if let Some(water) = entry.water_intake {
        details.push(format!("{water} oz water"));
    }
    if let Some(exercise) = &entry.exercise {
        details.push(escape_html(exercise));
    }

    format!(
        "<li><span class=\"when\">{}</span><span class=\"weight\">{}</span><span class=\"meta\">{}</span></li>",
        format_date(entry.date.date()),
        format_weight(entry.weight),
        details.join(" · ")
    )
}

fn render_calendar(slots: &[CalendarSlot]) -> String {
    let mut cells = String::new();
    for slot in slots {
        match slot {
            CalendarSlot::Empty => cells.push_str("<div class=\"day empty\"></div>"),
            CalendarSlot::Day { date, has_entry } => {
                let class = if *has_entry { "day logged" } else { "day" };
                cells.push_str(&format!("<div class=\"{class}\">{}</div>", date.day()));
            }
        }
    }
    cells
}

pub fn render_dashboard(
    summary: &DashboardSummary,
    quote: &MotivationalContent,
    tip: &MotivationalContent,
) -> String {
    let change = match summary.weight_change {
        Some(change) if change.is_positive => format!("-{}", format_weight(change.change)),
        Some(change) => format!("+{}", format_weight(change.change)),
        None => "n/a".to_string(),
    };

    let week = if summary.this_week.is_empty() {
        "<li class=\"empty\">No entries this week yet.</li>".to_string()
    } else {
        summary.this_week.iter().map(render_entry).collect()
    };

    DASHBOARD_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{NAME}}", &escape_html(&summary.user.name))
        .replace("{{CURRENT}}", &format_weight(summary.user.current_weight))
        .replace("{{TARGET}}", &format_weight(summary.user.target_weight))
        .replace("{{TO_GO}}", &format_weight(summary.remaining_to_target))
        .replace("{{BMI}}", &format!("{:.1}", summary.bmi.value))
        .replace("{{BMI_CATEGORY}}", summary.bmi.category.label())
        .replace("{{CHANGE}}", &change)
        .replace("{{WEEK}}", &week)
        .replace("{{MONTH}}", &summary.calendar.title)
        .replace("{{COLUMNS}}", &COLUMNS.to_string())
        .replace("{{CALENDAR}}", &render_calendar(&summary.calendar.slots))
        .replace("{{QUOTE}}", &render_quote(quote))
        .replace("{{TIP}}", &escape_html(tip.content))
}

pub fn render_welcome(quote: &MotivationalContent) -> String {
    WELCOME_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{QUOTE}}", &render_quote(quote))
}

const STYLE: &str = r#"
    :root {
      --bg-1: #eef5f0;
      --bg-2: #bfe0cf;
      --ink: #23302a;
      --accent: #2f9e6b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1ea 60%, #f4f9f6 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      margin: 0;
      font-family: "Georgia", serif;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a83;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    ul.entries {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    ul.entries li {
      display: flex;
      gap: 16px;
      background: white;
      border-radius: 12px;
      padding: 10px 14px;
    }

    ul.entries .weight {
      font-weight: 600;
      color: var(--accent);
    }

    ul.entries .meta {
      color: #7d8a83;
    }

    .calendar {
      display: grid;
      gap: 6px;
    }

    .day {
      background: white;
      border-radius: 10px;
      padding: 8px 0;
      text-align: center;
    }

    .day.empty {
      background: transparent;
    }

    .day.logged {
      background: var(--accent);
      color: white;
      font-weight: 600;
    }

    blockquote {
      margin: 0;
      font-style: italic;
    }

    blockquote cite {
      display: block;
      margin-top: 6px;
      font-style: normal;
      color: #7d8a83;
    }
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weight Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Welcome back, {{NAME}}</h1>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Current</span>
        <span class="value">{{CURRENT}}</span>
      </div>
      <div class="stat">
        <span class="label">Target</span>
        <span class="value">{{TARGET}}</span>
        <span>{{TO_GO}} to go</span>
      </div>
      <div class="stat">
        <span class="label">BMI</span>
        <span class="value">{{BMI}}</span>
        <span>{{BMI_CATEGORY}}</span>
      </div>
      <div class="stat">
        <span class="label">Last change</span>
        <span class="value">{{CHANGE}}</span>
      </div>
    </section>

    <section>
      <h2>This week</h2>
      <ul class="entries">{{WEEK}}</ul>
    </section>

    <section>
      <h2>{{MONTH}}</h2>
      <div class="calendar" style="grid-template-columns: repeat({{COLUMNS}}, 1fr);">
        <div>Sun</div><div>Mon</div><div>Tue</div><div>Wed</div><div>Thu</div><div>Fri</div><div>Sat</div>
        {{CALENDAR}}
      </div>
    </section>

    <section class="panel">
      <div class="stat">
        <span class="label">Quote of the day</span>
        {{QUOTE}}
      </div>
      <div class="stat">
        <span class="label">Tip of the day</span>
        <span>{{TIP}}</span>
      </div>
    </section>
  </main>
</body>
</html>
"#;

const WELCOME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weight Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Weight Tracker</h1>
      <p>Create an account with <code>POST /api/users</code>, then open <code>/?user=&lt;id&gt;</code>.</p>
    </header>
    <section class="stat">
      {{QUOTE}}
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BmiCategory;
    use crate::models::{BmiReading, CalendarMonth, ContentCategory, ContentKind, User};
    use chrono::NaiveDate;

    fn quote() -> MotivationalContent {
        MotivationalContent {
            id: "q",
            kind: ContentKind::Quote,
            content: "Keep going.",
            author: Some("Someone"),
            category: ContentCategory::General,
        }
    }

    fn summary(name: &str) -> DashboardSummary {
        let joined = NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        DashboardSummary {
            user: User {
                id: "u1".to_string(),
                email: "sam@example.com".to_string(),
                name: name.to_string(),
                avatar: None,
                height: 68.0,
                current_weight: 150.0,
                target_weight: 140.0,
                date_joined: joined,
            },
            bmi: BmiReading {
                value: 22.8,
                category: BmiCategory::Normal,
            },
            weight_change: None,
            remaining_to_target: 10.0,
            this_week: Vec::new(),
            recent_entries: Vec::new(),
            calendar: CalendarMonth {
                year: 2026,
                month: 4,
                title: "April 2026".to_string(),
                slots: vec![
                    CalendarSlot::Empty,
                    CalendarSlot::Day {
                        date: joined.date(),
                        has_entry: true,
                    },
                ],
            },
        }
    }

    #[test]
    fn dashboard_fills_every_placeholder() {
        let html = render_dashboard(&summary("Sam"), &quote(), &quote());
        assert!(!html.contains("{{"));
        assert!(html.contains("150.0 lbs"));
        assert!(html.contains("22.8"));
        assert!(html.contains("April 2026"));
        assert!(html.contains("day logged"));
        assert!(html.contains("No entries this week yet."));
    }

    #[test]
    fn dashboard_escapes_user_text() {
        let html = render_dashboard(&summary("<script>"), &quote(), &quote());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn welcome_page_shows_quote() {
        let html = render_welcome(&quote());
        assert!(html.contains("Keep going."));
        assert!(html.contains("<cite>Someone</cite>"));
    }
}
