use std::fmt;
use std::io;
use std::io::ErrorKind;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use spdlog::warn;

use crate::content::{Post, SeriesRef};
use crate::text_utils::parse_date_time;

/// Front matter of a content file, as extracted by the content loader.
///
/// Example (TOML):
/// ```toml
/// title = "Widgets, part 2"
/// date = "2024-01-02T10:00:00Z"
/// permalink = "/posts/widgets-2/"
/// series = ["Widgets"]
/// series_index = 2
/// tags = ["rust", "widgets"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: FrontMatterDate,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub series: Option<SeriesField>,
    #[serde(default)]
    pub series_index: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Date as written in the front matter, before validation.
///
/// TOML front matter usually has bare datetimes (`date = 2024-01-02T10:00:00Z`),
/// JSON only has strings. Both end up as text for `parse_date_time`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatterDate(pub String);

impl<'de> Deserialize<'de> for FrontMatterDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FrontMatterDateVisitor)
    }
}

struct FrontMatterDateVisitor;

impl<'de> Visitor<'de> for FrontMatterDateVisitor {
    type Value = FrontMatterDate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a date string or a TOML datetime")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
    {
        Ok(FrontMatterDate(v.to_string()))
    }

    // toml hands its datetimes over as a single entry map
    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
    {
        let value = toml::value::Datetime::deserialize(MapAccessDeserializer::new(map))?;
        Ok(FrontMatterDate(value.to_string()))
    }
}

/// `series` may be written as a single name or as a list of names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeriesField {
    One(String),
    Many(Vec<String>),
}

impl SeriesField {
    fn names(&self) -> Vec<&str> {
        let names: Vec<&str> = match self {
            SeriesField::One(name) => vec![name.as_str()],
            SeriesField::Many(names) => names.iter().map(|n| n.as_str()).collect(),
        };
        names.into_iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

impl TryFrom<FrontMatter> for Post {
    type Error = io::Error;

    fn try_from(fm: FrontMatter) -> Result<Self, Self::Error> {
        let permalink = fm.permalink.trim().to_string();
        if permalink.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidData, format!("Missing permalink - title={}", fm.title)));
        }

        let title = fm.title.trim().to_string();
        if title.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidData, format!("Missing title - permalink={}", permalink)));
        }

        let date = match parse_date_time(&fm.date.0) {
            Ok(d) => d,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("{} - permalink={}", e, permalink))),
        };

        let series = extract_series(&permalink, fm.series.as_ref(), fm.series_index);
        let tags = extract_tags(fm.tags);
        let description = fm.description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Post {
            title,
            date,
            permalink,
            series,
            tags,
            description,
        })
    }
}

// Inconsistent series metadata drops the membership, never the post
fn extract_series(permalink: &str, field: Option<&SeriesField>, index: Option<i64>) -> Option<SeriesRef> {
    let names = field.map(|f| f.names()).unwrap_or_default();

    let name = match names.as_slice() {
        [] => {
            if index.is_some() {
                warn!("Series index without series name, ignoring index - permalink={}", permalink);
            }
            return None;
        }
        [name] => *name,
        [name, ..] => {
            warn!("Post declares {} series, using {} - permalink={}", names.len(), name, permalink);
            *name
        }
    };

    let index = match index {
        None => {
            warn!("Series {} without series_index, post left out of the series - permalink={}", name, permalink);
            return None;
        }
        Some(i) if i < 1 || i > u32::MAX as i64 => {
            warn!("Invalid series_index {} for series {} - permalink={}", i, name, permalink);
            return None;
        }
        Some(i) => i as u32,
    };

    Some(SeriesRef {
        name: name.to_string(),
        index,
    })
}

fn extract_tags(tags: Vec<String>) -> Vec<String> {
    let mut res: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !res.iter().any(|t| t == tag) {
            res.push(tag.to_string());
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::*;

    fn front_matter() -> FrontMatter {
        FrontMatter {
            title: "Widgets, part 2".to_string(),
            date: FrontMatterDate("2024-01-02 10:00:00".to_string()),
            permalink: "/posts/widgets-2/".to_string(),
            series: Some(SeriesField::Many(vec!["Widgets".to_string()])),
            series_index: Some(2),
            tags: vec!["rust".to_string(), "widgets".to_string()],
            description: Some("Second part".to_string()),
            draft: false,
        }
    }

    #[test]
    fn test_valid_post() {
        let post = Post::try_from(front_matter()).unwrap();
        let expected = Post {
            title: "Widgets, part 2".to_string(),
            date: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ),
            permalink: "/posts/widgets-2/".to_string(),
            series: Some(SeriesRef { name: "Widgets".to_string(), index: 2 }),
            tags: vec!["rust".to_string(), "widgets".to_string()],
            description: Some("Second part".to_string()),
        };
        assert_eq!(post, expected);
    }

    #[test]
    fn test_required_fields() {
        let fm = FrontMatter { title: " ".to_string(), ..front_matter() };
        assert_eq!(Post::try_from(fm).unwrap_err().kind(), ErrorKind::InvalidData);

        let fm = FrontMatter { permalink: "".to_string(), ..front_matter() };
        assert!(Post::try_from(fm).is_err());

        let fm = FrontMatter { date: FrontMatterDate("not a date".to_string()), ..front_matter() };
        let err = Post::try_from(fm).unwrap_err();
        assert!(err.to_string().contains("/posts/widgets-2/"));
    }

    #[test]
    fn test_series_single_name() {
        let fm = FrontMatter { series: Some(SeriesField::One(" Widgets ".to_string())), ..front_matter() };
        let post = Post::try_from(fm).unwrap();
        assert_eq!(post.series_name(), Some("Widgets"));
        assert_eq!(post.series_index(), Some(2));
    }

    #[test]
    fn test_series_index_without_name() {
        let fm = FrontMatter { series: None, ..front_matter() };
        let post = Post::try_from(fm).unwrap();
        assert_eq!(post.series, None);

        let fm = FrontMatter { series: Some(SeriesField::Many(vec!["".to_string()])), ..front_matter() };
        assert_eq!(Post::try_from(fm).unwrap().series, None);
    }

    #[test]
    fn test_series_name_without_index() {
        let fm = FrontMatter { series_index: None, ..front_matter() };
        assert_eq!(Post::try_from(fm).unwrap().series, None);

        let fm = FrontMatter { series_index: Some(0), ..front_matter() };
        assert_eq!(Post::try_from(fm).unwrap().series, None);

        let fm = FrontMatter { series_index: Some(-3), ..front_matter() };
        assert_eq!(Post::try_from(fm).unwrap().series, None);
    }

    #[test]
    fn test_many_series_uses_first() {
        let fm = FrontMatter {
            series: Some(SeriesField::Many(vec!["Widgets".to_string(), "Gadgets".to_string()])),
            ..front_matter()
        };
        assert_eq!(Post::try_from(fm).unwrap().series_name(), Some("Widgets"));
    }

    #[test]
    fn test_tags_and_description_cleanup() {
        let fm = FrontMatter {
            tags: vec!["rust".to_string(), " ".to_string(), "rust".to_string(), " web ".to_string()],
            description: Some("   ".to_string()),
            ..front_matter()
        };
        let post = Post::try_from(fm).unwrap();
        assert_eq!(post.tags, ["rust", "web"]);
        assert_eq!(post.description, None);
    }

    #[test]
    fn test_bare_toml_dates() {
        #[derive(Deserialize)]
        struct Dates {
            with_time: FrontMatterDate,
            date_only: FrontMatterDate,
            local: FrontMatterDate,
            quoted: FrontMatterDate,
        }

        let src = r#"
with_time = 2024-01-02T10:00:00Z
date_only = 2024-01-02
local = 2024-01-02T10:00:00
quoted = "2024-01-02 10:00"
"#;
        let dates: Dates = toml::from_str(src).unwrap();
        let expected = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        assert_eq!(parse_date_time(&dates.with_time.0), Ok(expected));
        assert_eq!(parse_date_time(&dates.local.0), Ok(expected));
        assert_eq!(parse_date_time(&dates.quoted.0), Ok(expected));
        assert_eq!(parse_date_time(&dates.date_only.0).unwrap().date(), expected.date());
    }

    #[test]
    fn test_json_date() {
        let fm: FrontMatter = serde_json::from_str(r#"{"title": "A", "date": "2024-01-02", "permalink": "/a/"}"#).unwrap();
        assert_eq!(fm.date, FrontMatterDate("2024-01-02".to_string()));

        let err = serde_json::from_str::<FrontMatter>(r#"{"title": "A", "date": 20240102, "permalink": "/a/"}"#);
        assert!(err.is_err());
    }
}
