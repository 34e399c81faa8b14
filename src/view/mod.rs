use std::collections::{HashMap, HashSet};
use std::io;
use std::io::ErrorKind;

use ramhorns::Template;
use spdlog::warn;

use crate::series::SeriesGroup;
use crate::text_utils::slugify;

pub mod templates;
pub mod home_renderer;
pub mod series_list_renderer;
pub mod series_renderer;
pub mod series_nav_renderer;
pub mod series_feed;

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag<'a> {
    tag: &'a str,
    link: String,
}

impl<'a> ViewTag<'a> {
    pub(crate) fn new(tag: &'a str) -> Self {
        ViewTag {
            tag,
            link: tag_link(tag),
        }
    }
}

/// Url slugs of the series, shared by every page that links to one.
///
/// Slugs are handed out in `list_series` order. A series whose slug is already
/// taken gets a numeric suffix (`c`, `c-2`), so every series has its own page.
#[derive(Debug, Default)]
pub struct SeriesLinks {
    slugs: HashMap<String, String>,
}

impl SeriesLinks {
    pub fn new(groups: &[SeriesGroup]) -> SeriesLinks {
        let mut slugs: HashMap<String, String> = HashMap::new();
        let mut used: HashSet<String> = HashSet::new();

        for group in groups {
            let mut base = slugify(group.name);
            if base.is_empty() {
                base = "series".to_string();
            }

            let mut slug = base.clone();
            let mut n = 2;
            while used.contains(&slug) {
                slug = format!("{}-{}", base, n);
                n += 1;
            }
            if slug != base {
                warn!("Series {} has a link already in use ({}), using {}", group.name, base, slug);
            }

            used.insert(slug.clone());
            slugs.insert(group.name.to_string(), slug);
        }

        SeriesLinks { slugs }
    }

    pub fn slug(&self, series_name: &str) -> String {
        match self.slugs.get(series_name) {
            Some(slug) => slug.clone(),
            None => slugify(series_name),
        }
    }

    pub fn link(&self, series_name: &str) -> String {
        format!("/series/{}/", self.slug(series_name))
    }

    pub fn feed_link(&self, series_name: &str) -> String {
        format!("{}index.xml", self.link(series_name))
    }
}

pub fn tag_link(tag: &str) -> String {
    format!("/tags/{}/", slugify(tag))
}

pub fn page_link(page: u32) -> String {
    match page {
        0 | 1 => "/".to_string(),
        x => format!("/page/{}/", x),
    }
}

pub(crate) fn parse_template<'a>(tpl_src: &'a str, name: &str) -> io::Result<Template<'a>> {
    match Template::new(tpl_src) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))),
    }
}
