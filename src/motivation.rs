use crate::models::{ContentCategory, ContentKind, MotivationalContent};
use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

const fn quote(
    id: &'static str,
    content: &'static str,
    author: &'static str,
    category: ContentCategory,
) -> MotivationalContent {
    MotivationalContent {
        id,
        kind: ContentKind::Quote,
        content,
        author: Some(author),
        category,
    }
}

const fn tip(id: &'static str, content: &'static str, category: ContentCategory) -> MotivationalContent {
    MotivationalContent {
        id,
        kind: ContentKind::Tip,
        content,
        author: None,
        category,
    }
}

pub const QUOTES: [MotivationalContent; 5] = [
    quote(
        "1",
        "The groundwork for all happiness is good health.",
        "Leigh Hunt",
        ContentCategory::General,
    ),
    quote(
        "2",
        "Take care of your body. It's the only place you have to live.",
        "Jim Rohn",
        ContentCategory::General,
    ),
    quote(
        "3",
        "Health is not about the weight you lose, but about the life you gain.",
        "Dr. Josh Axe",
        ContentCategory::Mindset,
    ),
    quote(
        "4",
        "Every workout is progress, no matter how small.",
        "Unknown",
        ContentCategory::Exercise,
    ),
    quote(
        "5",
        "You don't have to be great to get started, but you have to get started to be great.",
        "Les Brown",
        ContentCategory::Mindset,
    ),
];

pub const TIPS: [MotivationalContent; 8] = [
    tip(
        "6",
        "Drink a glass of water before every meal to help control portion sizes and stay hydrated.",
        ContentCategory::Nutrition,
    ),
    tip(
        "7",
        "Take the stairs instead of the elevator. Small changes in daily activity add up over time.",
        ContentCategory::Exercise,
    ),
    tip(
        "8",
        "Practice mindful eating by chewing slowly and paying attention to hunger cues.",
        ContentCategory::Mindset,
    ),
    tip(
        "9",
        "Plan your meals in advance to avoid impulsive food choices and maintain consistent nutrition.",
        ContentCategory::Nutrition,
    ),
    tip(
        "10",
        "Aim for 7-9 hours of quality sleep each night. Poor sleep can affect hunger hormones and weight management.",
        ContentCategory::General,
    ),
    tip(
        "11",
        "Find an exercise buddy or join a fitness community for accountability and motivation.",
        ContentCategory::Exercise,
    ),
    tip(
        "12",
        "Focus on progress, not perfection. Celebrate small victories along your journey.",
        ContentCategory::Mindset,
    ),
    tip(
        "13",
        "Keep healthy snacks visible and easily accessible while storing less healthy options out of sight.",
        ContentCategory::Nutrition,
    ),
];

pub fn daily_content() -> (MotivationalContent, MotivationalContent) {
    daily_content_at(Local::now().date_naive())
}

/// Quote and tip of the day, rotating through the catalog by day of year.
pub fn daily_content_at(date: NaiveDate) -> (MotivationalContent, MotivationalContent) {
    let day = date.ordinal() as usize;
    (QUOTES[day % QUOTES.len()], TIPS[day % TIPS.len()])
}

/// Quotes then tips, restricted to `category` when one is given.
pub fn filter_by_category(category: Option<ContentCategory>) -> Vec<MotivationalContent> {
    QUOTES
        .iter()
        .chain(TIPS.iter())
        .filter(|item| category.is_none_or(|wanted| item.category == wanted))
        .copied()
        .collect()
}

/// A single item drawn from the catalog, within `category` when one is given.
pub fn random_content(
    rng: &mut impl Rng,
    category: Option<ContentCategory>,
) -> Option<MotivationalContent> {
    filter_by_category(category).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn daily_content_rotates_by_day_of_year() {
        let jan_1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let (quote, tip) = daily_content_at(jan_1);
        assert_eq!(quote.id, "2");
        assert_eq!(tip.id, "7");

        let jan_5 = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let (quote, _) = daily_content_at(jan_5);
        assert_eq!(quote.id, "1");
    }

    #[test]
    fn daily_content_comes_from_catalog() {
        let (quote, tip) = daily_content();
        assert!(QUOTES.contains(&quote));
        assert!(TIPS.contains(&tip));
    }

    #[test]
    fn all_content_when_no_category() {
        let all = filter_by_category(None);
        assert_eq!(all.len(), QUOTES.len() + TIPS.len());
        assert_eq!(all[0].kind, ContentKind::Quote);
        assert_eq!(all[all.len() - 1].kind, ContentKind::Tip);
    }

    #[test]
    fn category_filter_keeps_only_matching() {
        let nutrition = filter_by_category(Some(ContentCategory::Nutrition));
        assert_eq!(nutrition.len(), 3);
        assert!(nutrition
            .iter()
            .all(|item| item.category == ContentCategory::Nutrition));
    }

    #[test]
    fn random_content_stays_within_category() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let item = random_content(&mut rng, Some(ContentCategory::Exercise)).unwrap();
            assert_eq!(item.category, ContentCategory::Exercise);
        }
        let any = random_content(&mut rng, None).unwrap();
        assert!(QUOTES.contains(&any) || TIPS.contains(&any));
    }

    #[test]
    fn random_content_reaches_every_item_eventually() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(random_content(&mut rng, None).unwrap().id);
        }
        assert_eq!(seen.len(), QUOTES.len() + TIPS.len());
    }

    #[test]
    fn only_quotes_carry_authors() {
        assert!(QUOTES.iter().all(|q| q.author.is_some()));
        assert!(TIPS.iter().all(|t| t.author.is_none()));
    }
}
