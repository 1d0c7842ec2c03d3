use blog_common::date_time::UtcDateTime;
use blog_request::{
    filter::{
        Filter,
        error::{FilterError, FilterResult},
    },
    query::page::{DEFAULT_PAGE, PageQuery},
};
use serde::Deserialize;

use crate::blog::repository::fields;

/// Optional search criteria for blogs. Present criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogSearchQuery {
    /// Substring that both the author's first and last name must contain.
    pub author: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Substring of the tags joined with `,`.
    pub tags: Option<String>,
    /// Inclusive lower bound on creation time, `YYYY-MM-DD` or RFC 3339.
    pub created_date: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl BlogSearchQuery {
    /// Rejects criteria that are present but blank.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyValue`] naming the first blank criterion.
    pub fn validate(&self) -> FilterResult<()> {
        let criteria = [
            ("author", &self.author),
            ("title", &self.title),
            ("content", &self.content),
            ("tags", &self.tags),
            ("created_date", &self.created_date),
        ];
        for (field, value) in criteria {
            if value.as_deref().is_some_and(|value| value.trim().is_empty()) {
                return Err(FilterError::EmptyValue {
                    field: field.into(),
                });
            }
        }
        Ok(())
    }

    /// Builds the store filter for these criteria.
    ///
    /// # Errors
    ///
    /// Returns an error if a criterion is blank or the creation date does not parse.
    pub fn to_filter(&self, case_insensitive: bool) -> FilterResult<Filter> {
        self.validate()?;

        let mut filter = Filter::new().case_insensitive(case_insensitive);
        if let Some(author) = &self.author {
            filter = filter
                .contains(fields::AUTHOR_FIRST_NAME, author.as_str())
                .contains(fields::AUTHOR_LAST_NAME, author.as_str());
        }
        if let Some(title) = &self.title {
            filter = filter.contains(fields::TITLE, title.as_str());
        }
        if let Some(content) = &self.content {
            filter = filter.contains(fields::CONTENT, content.as_str());
        }
        if let Some(tags) = &self.tags {
            filter = filter.contains(fields::TAGS, tags.as_str());
        }
        if let Some(created_date) = &self.created_date {
            let created_after = UtcDateTime::parse_date_or_rfc3339(created_date).map_err(|_| {
                FilterError::InvalidDate {
                    field: "created_date".into(),
                    value: created_date.clone(),
                }
            })?;
            filter = filter.at_least(fields::CREATED_AT, created_after);
        }
        Ok(filter)
    }

    pub fn page_query(&self, default_page_size: u32) -> PageQuery {
        PageQuery::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.page_size.unwrap_or(default_page_size),
        )
    }
}
