use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

pub mod front_matter;
pub mod content_index;

/// A validated post, as handed to the series aggregator and the views.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub date: NaiveDateTime,
    pub permalink: String,
    pub series: Option<SeriesRef>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// Membership of a post in a series. Index starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRef {
    pub name: String,
    pub index: u32,
}

impl Post {
    pub fn series_name(&self) -> Option<&str> {
        self.series.as_ref().map(|s| s.name.as_str())
    }

    pub fn series_index(&self) -> Option<u32> {
        self.series.as_ref().map(|s| s.index)
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "permalink={}, date={}, title={}", self.permalink, self.date, self.title)?;
        if let Some(ref series) = self.series {
            write!(f, ", series={}#{}", series.name, series.index)?;
        }
        Ok(())
    }
}
