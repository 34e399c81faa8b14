use std::io;

use ramhorns::Template;

use crate::series::SeriesGroup;
use crate::text_utils::{format_date_time, truncate_summary};
use crate::view::{parse_template, SeriesLinks};

#[derive(ramhorns::Content)]
struct SeriesPage<'a> {
    name: &'a str,
    link: String,
    feed_link: String,
    post_count: u32,
    last_updated: String,
    posts: Vec<SeriesPost<'a>>,
}

#[derive(ramhorns::Content)]
struct SeriesPost<'a> {
    position: u32,
    title: &'a str,
    link: &'a str,
    date: String,
    summary: String,
    has_summary: bool,
}

pub struct SeriesRenderer<'a> {
    pub template: Template<'a>,
    pub summary_length: usize,
}

impl SeriesRenderer<'_> {
    pub fn new(tpl_src: &str, summary_length: usize) -> io::Result<SeriesRenderer> {
        let template = parse_template(tpl_src, "series")?;

        Ok(SeriesRenderer {
            template,
            summary_length,
        })
    }

    pub fn render(&self, group: &SeriesGroup, links: &SeriesLinks) -> String {
        let posts: Vec<SeriesPost> = group.posts.iter()
            .enumerate()
            .map(|(idx, post)| {
                let summary = post.description.as_deref()
                    .map(|d| truncate_summary(d, self.summary_length))
                    .unwrap_or_default();
                let (date, _) = format_date_time(&post.date);
                SeriesPost {
                    position: idx as u32 + 1,
                    title: post.title.as_str(),
                    link: post.permalink.as_str(),
                    date,
                    has_summary: !summary.is_empty(),
                    summary,
                }
            })
            .collect();

        let (last_updated, _) = format_date_time(&group.last_updated);
        self.template.render(&SeriesPage {
            name: group.name,
            link: links.link(group.name),
            feed_link: links.feed_link(group.name),
            post_count: group.post_count as u32,
            last_updated,
            posts,
        })
    }
}
