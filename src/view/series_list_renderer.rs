use std::io;

use ramhorns::Template;

use crate::series::SeriesGroup;
use crate::text_utils::{format_date_time, truncate_summary};
use crate::view::{parse_template, SeriesLinks};

#[derive(ramhorns::Content)]
struct SeriesListPage<'a> {
    series: Vec<SeriesListItem<'a>>,
    series_count: u32,
}

#[derive(ramhorns::Content)]
struct SeriesListItem<'a> {
    name: &'a str,
    link: String,
    post_count: u32,
    last_updated: String,
    description: String,
    has_description: bool,
}

pub struct SeriesListRenderer<'a> {
    pub template: Template<'a>,
    pub summary_length: usize,
}

impl SeriesListRenderer<'_> {
    pub fn new(tpl_src: &str, summary_length: usize) -> io::Result<SeriesListRenderer> {
        let template = parse_template(tpl_src, "series list")?;

        Ok(SeriesListRenderer {
            template,
            summary_length,
        })
    }

    pub fn render(&self, groups: &[SeriesGroup], links: &SeriesLinks) -> String {
        let series: Vec<SeriesListItem> = groups.iter()
            .map(|group| {
                // First post (by index) with a description speaks for the series
                let description = group.posts.iter()
                    .find_map(|p| p.description.as_deref())
                    .map(|d| truncate_summary(d, self.summary_length))
                    .unwrap_or_default();
                let (last_updated, _) = format_date_time(&group.last_updated);

                SeriesListItem {
                    name: group.name,
                    link: links.link(group.name),
                    post_count: group.post_count as u32,
                    last_updated,
                    has_description: !description.is_empty(),
                    description,
                }
            })
            .collect();

        self.template.render(&SeriesListPage {
            series_count: series.len() as u32,
            series,
        })
    }
}
