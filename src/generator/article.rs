use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::{Article, Stage};
use crate::generator::{Generate, record_id};

const AUTHORS: [&str; 10] = [
    "Sarah Johnson",
    "Michael Chen",
    "Emily Rodriguez",
    "David Kim",
    "Jessica Taylor",
    "Robert Anderson",
    "Lisa Zhang",
    "James Wilson",
    "Maria Garcia",
    "Alex Thompson",
];

const SOURCES: [&str; 10] = [
    "TechDaily",
    "Global News",
    "Business Wire",
    "Science Today",
    "Sports Central",
    "Health Herald",
    "Finance Focus",
    "Travel Times",
    "Culture Corner",
    "Politics Plus",
];

const CATEGORIES: [&str; 10] = [
    "Technology",
    "Business",
    "Science",
    "Sports",
    "Health",
    "Finance",
    "Travel",
    "Culture",
    "Politics",
    "Entertainment",
];

const TITLES: [&str; 10] = [
    "Breaking: Major Discovery in Renewable Energy Technology",
    "Global Markets Show Strong Recovery Amid Economic Uncertainty",
    "Scientists Announce Breakthrough in AI Research",
    "Championship Finals Draw Record-Breaking Viewership",
    "New Health Study Reveals Surprising Benefits of Exercise",
    "Tech Giant Announces Revolutionary Product Launch",
    "International Trade Agreements Reshape Global Economy",
    "Climate Change Research Shows Promising Solutions",
    "Sports Stars Unite for Charitable Cause",
    "Cultural Festival Celebrates Diversity and Innovation",
];

const SNIPPETS: [&str; 10] = [
    "In a groundbreaking development that could reshape the industry...",
    "Experts from around the world gathered to discuss the implications...",
    "The latest findings suggest significant potential for future growth...",
    "This unprecedented event has captured global attention...",
    "Researchers have been working tirelessly to understand the impact...",
    "The announcement comes at a critical time for the sector...",
    "Industry leaders expressed optimism about the developments...",
    "The study, conducted over several months, reveals important insights...",
    "This milestone represents years of dedicated effort and innovation...",
    "The collaboration between experts has yielded remarkable results...",
];

// Indexed by category, wrapping around
const TAG_SETS: [[&str; 5]; 5] = [
    ["innovation", "ai", "software", "hardware", "startup"],
    ["market", "economy", "investment", "growth", "profit"],
    ["research", "discovery", "experiment", "breakthrough", "study"],
    ["championship", "team", "victory", "competition", "athlete"],
    ["wellness", "medicine", "fitness", "nutrition", "mental-health"],
];

fn pick<G: Rng>(rng: &mut G, values: &[&str]) -> String {
    values[rng.gen_range(0..values.len())].to_string()
}

impl Generate for Article {
    const MIN_PER_FIRING: usize = 3;
    const MAX_PER_FIRING: usize = 8;

    fn generate<G: Rng>(rng: &mut G, now: DateTime<Utc>) -> Self {
        let category = rng.gen_range(0..CATEGORIES.len());
        let sentiment = (rng.gen_range(-1.0..1.0_f64) * 100.0).round() / 100.0;

        Article {
            article_id: record_id("NEWS", now),
            title: pick(rng, &TITLES),
            content: pick(rng, &SNIPPETS),
            author: pick(rng, &AUTHORS),
            source: pick(rng, &SOURCES),
            category: CATEGORIES[category].to_string(),
            published_date: now,
            view_count: rng.gen_range(100..10_000),
            sentiment_score: sentiment,
            stage: Stage::Intermediate,
            tags: TAG_SETS[category % TAG_SETS.len()]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
