use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::Article;
use crate::error::Error;
use crate::input::{Decode, RawStatus, lenient_timestamp, resolve_stage};

// Intermediate type mirroring the (lowercased) message fields
#[derive(Deserialize)]
struct RawArticle {
    #[serde(rename = "articleid")]
    article_id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    source: Option<String>,
    category: Option<String>,
    #[serde(rename = "publisheddate", default, deserialize_with = "lenient_timestamp")]
    published_date: Option<DateTime<Utc>>,
    #[serde(rename = "viewcount")]
    view_count: Option<i32>,
    #[serde(rename = "sentimentscore")]
    sentiment_score: Option<f64>,
    status: Option<RawStatus>,
    tags: Option<Vec<String>>,
}

impl TryFrom<RawArticle> for Article {
    type Error = Error;

    fn try_from(raw: RawArticle) -> Result<Self, Self::Error> {
        Ok(Article {
            stage: resolve_stage::<Article>(raw.status)?,
            article_id: raw.article_id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            author: raw.author.unwrap_or_default(),
            source: raw.source.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            published_date: raw.published_date.unwrap_or_default(),
            view_count: raw.view_count.unwrap_or_default(),
            sentiment_score: raw.sentiment_score.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
        })
    }
}

impl Decode for Article {
    fn decode_fields(fields: Value) -> Result<Self, Error> {
        let raw: RawArticle = serde_json::from_value(fields)?;
        Article::try_from(raw)
    }
}
