use std::io;

use ramhorns::Template;

use crate::content::Post;
use crate::series::SeriesNav;
use crate::view::{parse_template, SeriesLinks};

#[derive(ramhorns::Content)]
struct ViewNav<'a> {
    series: &'a str,
    series_link: String,
    position: u32,
    total: u32,
    previous: Option<ViewLink<'a>>,
    next: Option<ViewLink<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewLink<'a> {
    title: &'a str,
    link: &'a str,
}

impl<'a> From<&'a Post> for ViewLink<'a> {
    fn from(post: &'a Post) -> Self {
        ViewLink {
            title: post.title.as_str(),
            link: post.permalink.as_str(),
        }
    }
}

/// The "part N of X" banner shown in posts that belong to a series
pub struct SeriesNavRenderer<'a> {
    pub template: Template<'a>,
}

impl SeriesNavRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<SeriesNavRenderer> {
        let template = parse_template(tpl_src, "series navigation")?;
        Ok(SeriesNavRenderer {
            template,
        })
    }

    pub fn render(&self, nav: &SeriesNav, links: &SeriesLinks) -> String {
        self.template.render(&ViewNav {
            series: nav.series,
            series_link: links.link(nav.series),
            position: nav.position as u32,
            total: nav.total as u32,
            previous: nav.previous.map(ViewLink::from),
            next: nav.next.map(ViewLink::from),
        })
    }
}
