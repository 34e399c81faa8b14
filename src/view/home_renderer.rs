use std::io;

use ramhorns::Template;

use crate::content::Post;
use crate::series::{neighbors, SeriesGroup};
use crate::tags::TagCount;
use crate::text_utils::{format_date_time, truncate_summary};
use crate::view::{page_link, parse_template, tag_link, SeriesLinks, ViewTag};

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    posts: Vec<HomePost<'a>>,
    series: Vec<HomeSeries<'a>>,
    has_series: bool,
    tags: Vec<HomeTag<'a>>,
    has_tags: bool,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct HomePost<'a> {
    title: &'a str,
    link: &'a str,
    date: String,
    time: String,
    summary: String,
    tags: Vec<ViewTag<'a>>,
    has_tags: bool,
    series: Option<SeriesBadge<'a>>,
}

#[derive(ramhorns::Content)]
struct SeriesBadge<'a> {
    name: &'a str,
    link: String,
    position: u32,
    total: u32,
}

#[derive(ramhorns::Content)]
struct HomeSeries<'a> {
    name: &'a str,
    link: String,
    post_count: u32,
}

#[derive(ramhorns::Content)]
struct HomeTag<'a> {
    tag: &'a str,
    link: String,
    count: u32,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
    pub page_count: u32,
    pub summary_length: usize,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str, page_count: u32, summary_length: usize) -> io::Result<HomeRenderer> {
        let template = parse_template(home_tpl_src, "home")?;

        Ok(HomeRenderer {
            template,
            page_count,
            summary_length,
        })
    }

    /// `contents` is the current page, `all_posts` is used for the series badges.
    pub fn render(&self, contents: &[&Post], all_posts: &[Post], cur_page: u32,
                  tags: &[TagCount], series: &[SeriesGroup], links: &SeriesLinks) -> String {
        let mut posts = vec![];
        for post in contents {
            let (date, time) = format_date_time(&post.date);
            let series = neighbors(post, all_posts).map(|nav| SeriesBadge {
                name: nav.series,
                link: links.link(nav.series),
                position: nav.position as u32,
                total: nav.total as u32,
            });
            let post_tags: Vec<ViewTag> = post.tags.iter().map(|t| ViewTag::new(t)).collect();

            posts.push(HomePost {
                title: post.title.as_str(),
                link: post.permalink.as_str(),
                date,
                time,
                summary: truncate_summary(post.description.as_deref().unwrap_or(""), self.summary_length),
                has_tags: !post_tags.is_empty(),
                tags: post_tags,
                series,
            });
        }

        let page_list: Vec<ViewPagination> = (1..=self.page_count)
            .map(|number| ViewPagination {
                current: number == cur_page,
                number,
                link: page_link(number),
            })
            .collect();

        let series: Vec<HomeSeries> = series.iter()
            .map(|g| HomeSeries {
                name: g.name,
                link: links.link(g.name),
                post_count: g.post_count as u32,
            })
            .collect();

        let tags: Vec<HomeTag> = tags.iter()
            .map(|t| HomeTag {
                tag: t.tag,
                link: tag_link(t.tag),
                count: t.count as u32,
            })
            .collect();

        self.template.render(&HomePage {
            posts,
            has_series: !series.is_empty(),
            series,
            has_tags: !tags.is_empty(),
            tags,
            show_pagination: self.page_count > 1,
            page_list,
        })
    }
}
