//! Module defining the news article record kind

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Grouping, Highlight, Money, Pattern, Record, ScoreInputs, ScoreWeights, Stage, require,
};

/// Articles with more views than this are viral and get featured.
pub const VIRAL_VIEWS: i32 = 5000;
/// Articles whose absolute sentiment exceeds this get featured.
pub const FEATURE_SENTIMENT: f64 = 0.7;
/// Absolute sentiment above which an article gets a log line of its own.
pub const STRONG_SENTIMENT: f64 = 0.8;
/// Articles with more tags than this count as well tagged.
pub const WELL_TAGGED: usize = 3;

/// A published news article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub article_id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub source: String,
    pub category: String,
    pub published_date: DateTime<Utc>,
    pub view_count: i32,
    pub sentiment_score: f64,
    pub stage: Stage,
    pub tags: Vec<String>,
}

fn category(article: &Article) -> &str {
    &article.category
}

fn source(article: &Article) -> &str {
    &article.source
}

fn is_viral(article: &Article) -> bool {
    article.view_count > VIRAL_VIEWS
}

fn has_feature_sentiment(article: &Article) -> bool {
    article.sentiment_score.abs() > FEATURE_SENTIMENT
}

fn is_well_tagged(article: &Article) -> bool {
    article.tags.len() > WELL_TAGGED
}

impl Record for Article {
    const KIND: &'static str = "article";

    const STAGE_LABELS: [&'static str; 4] = ["Draft", "Published", "Featured", "Archived"];

    const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
        primary: 10.0,
        secondary: 20.0,
        auxiliary: 2.0,
    };

    const GROUPINGS: &'static [Grouping<Self>] = &[
        Grouping {
            name: "category",
            key: category,
        },
        Grouping {
            name: "source",
            key: source,
        },
    ];

    const PATTERNS: &'static [Pattern<Self>] = &[
        Pattern {
            name: "viral",
            matches: is_viral,
        },
        Pattern {
            name: "strong_sentiment",
            matches: has_feature_sentiment,
        },
        Pattern {
            name: "well_tagged",
            matches: is_well_tagged,
        },
    ];

    fn id(&self) -> &str {
        &self.article_id
    }

    fn subject(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        require(&mut violations, &self.article_id, "ArticleId");
        require(&mut violations, &self.title, "Title");
        require(&mut violations, &self.author, "Author");
        require(&mut violations, &self.content, "Content");
        require(&mut violations, &self.source, "Source");
        require(&mut violations, &self.category, "Category");
        if self.view_count < 0 {
            violations.push("ViewCount cannot be negative".to_string());
        }
        violations
    }

    fn promotes(&self) -> bool {
        is_viral(self) || has_feature_sentiment(self)
    }

    fn value(&self) -> Money {
        Decimal::from(self.view_count)
    }

    fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            primary_count: f64::from(self.view_count),
            secondary_score: self.sentiment_score,
            auxiliary_len: self.tags.len(),
        }
    }

    fn secondary_score(&self) -> Option<f64> {
        Some(self.sentiment_score)
    }

    fn highlights(&self) -> Vec<Highlight> {
        let mut highlights = Vec::new();
        if is_viral(self) {
            highlights.push(Highlight::new(
                "viral",
                format!("{} views", self.view_count),
            ));
        }
        if self.sentiment_score.abs() > STRONG_SENTIMENT {
            let tone = if self.sentiment_score > 0.0 {
                "very positive"
            } else {
                "very negative"
            };
            highlights.push(Highlight::new(
                "strong_sentiment",
                format!("{tone} ({:.2})", self.sentiment_score),
            ));
        }
        if is_well_tagged(self) {
            highlights.push(Highlight::new(
                "well_tagged",
                format!("{} tags", self.tags.len()),
            ));
        }
        highlights
    }
}
