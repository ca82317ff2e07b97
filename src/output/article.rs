use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Error;
use crate::domain::Article;
use crate::output::{Encode, OutboundMessage, encode_with, routing_key};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleMessage<'a> {
    article_id: &'a str,
    title: &'a str,
    content: &'a str,
    author: &'a str,
    source: &'a str,
    category: &'a str,
    published_date: DateTime<Utc>,
    view_count: i32,
    sentiment_score: f64,
    status: usize,
    tags: &'a [String],
}

impl Encode for Article {
    fn encode(&self) -> Result<OutboundMessage, Error> {
        let wire = ArticleMessage {
            article_id: &self.article_id,
            title: &self.title,
            content: &self.content,
            author: &self.author,
            source: &self.source,
            category: &self.category,
            published_date: self.published_date,
            view_count: self.view_count,
            sentiment_score: self.sentiment_score,
            status: self.stage.ordinal(),
            tags: &self.tags,
        };
        encode_with(
            &wire,
            [
                ("articleType", "newArticle".to_string()),
                ("authorId", routing_key(&self.author)),
                ("totalValue", format!("{}.00", self.view_count)),
            ],
        )
    }
}
