use std::io;
use std::io::ErrorKind;

use anyhow::{Context, Result};
use spdlog::{debug, info, warn};

use crate::config::Config;
use crate::content::content_index::ContentIndex;
use crate::content::Post;
use crate::paginator::Paginator;
use crate::series::{list_series, neighbors, SeriesGroup};
use crate::tags::tag_counts;
use crate::view::home_renderer::HomeRenderer;
use crate::view::series_feed::SeriesFeed;
use crate::view::series_list_renderer::SeriesListRenderer;
use crate::view::series_nav_renderer::SeriesNavRenderer;
use crate::view::series_renderer::SeriesRenderer;
use crate::view::templates::TemplateSet;
use crate::view::SeriesLinks;

/// A generated file, path relative to the output directory.
#[derive(Debug)]
pub struct RenderedPage {
    pub path: String,
    pub body: Vec<u8>,
}

/// Read-only snapshot of the blog: configuration, published posts and templates.
pub struct Site {
    config: Config,
    posts: Vec<Post>,
    templates: TemplateSet,
    links: SeriesLinks,
}

impl Site {
    pub fn new(config: Config, posts: Vec<Post>) -> io::Result<Site> {
        let templates = TemplateSet::load(config.paths.template_dir.as_deref())?;

        // Fail early on broken templates instead of in the middle of a build
        HomeRenderer::new(&templates.home, 1, 0)?;
        SeriesListRenderer::new(&templates.series_list, 0)?;
        SeriesRenderer::new(&templates.series, 0)?;
        SeriesNavRenderer::new(&templates.series_nav)?;

        let links = SeriesLinks::new(&list_series(&posts));

        Ok(Site {
            config,
            posts,
            templates,
            links,
        })
    }

    pub fn open(config: Config) -> Result<Site> {
        let index_path = config.paths.content_index.clone();
        let index = ContentIndex::from_file(&index_path)
            .with_context(|| format!("Error reading content index {}", index_path.display()))?;

        let posts = index.into_posts();
        info!("{} posts loaded", posts.len());

        let site = Site::new(config, posts).context("Error loading templates")?;
        Ok(site)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    fn sorted_by_date(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    fn find_series(&self, name: &str) -> Option<SeriesGroup<'_>> {
        list_series(&self.posts).into_iter().find(|g| g.name == name)
    }

    pub fn page_count(&self) -> u32 {
        let page_size = self.config.defaults.page_size;
        Paginator::from(&self.posts, page_size).page_count()
    }

    /// Homepage, newest posts first. Pages out of range show the first page.
    pub fn render_home(&self, cur_page: u32) -> io::Result<String> {
        let contents = self.sorted_by_date();
        let defaults = &self.config.defaults;
        let paginator = Paginator::from(&contents, defaults.page_size);
        let cur_page = match cur_page { // Sanity check for current page
            0 => 1,
            x if x > paginator.page_count() => 1,
            x => x,
        };

        let content_page: &[&Post] = if paginator.page_count() == 0 {
            &[]
        } else {
            match paginator.get_page(cur_page) {
                Ok(content) => content,
                Err(err_desc) => return Err(io::Error::new(ErrorKind::InvalidInput, err_desc)),
            }
        };

        let tags = tag_counts(&self.posts);
        let mut series = list_series(&self.posts);
        series.truncate(defaults.home_series_count);

        let home = HomeRenderer::new(&self.templates.home, paginator.page_count(), defaults.summary_length)?;
        Ok(home.render(content_page, &self.posts, cur_page, &tags, &series, &self.links))
    }

    pub fn render_series_list(&self) -> io::Result<String> {
        let groups = list_series(&self.posts);
        let renderer = SeriesListRenderer::new(&self.templates.series_list, self.config.defaults.summary_length)?;
        Ok(renderer.render(&groups, &self.links))
    }

    /// None when no post belongs to the series
    pub fn render_series(&self, series_name: &str) -> io::Result<Option<String>> {
        let Some(group) = self.find_series(series_name) else {
            return Ok(None);
        };
        let renderer = SeriesRenderer::new(&self.templates.series, self.config.defaults.summary_length)?;
        Ok(Some(renderer.render(&group, &self.links)))
    }

    /// Navigation banner of a post. None when the post has nothing to navigate to.
    pub fn render_series_nav(&self, permalink: &str) -> io::Result<Option<String>> {
        let Some(post) = self.posts.iter().find(|p| p.permalink == permalink) else {
            debug!("No post with permalink {}", permalink);
            return Ok(None);
        };
        let Some(nav) = neighbors(post, &self.posts) else {
            return Ok(None);
        };
        let renderer = SeriesNavRenderer::new(&self.templates.series_nav)?;
        Ok(Some(renderer.render(&nav, &self.links)))
    }

    pub fn render_series_feed(&self, series_name: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(group) = self.find_series(series_name) else {
            return Ok(None);
        };
        let feed = SeriesFeed {
            site_title: &self.config.site.title,
            base_url: &self.config.site.base_url,
            links: &self.links,
        };
        match feed.render(&group) {
            Ok(xml) => Ok(Some(xml)),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidData, format!("Error rendering feed of {}: {}", series_name, e))),
        }
    }

    /// Every page generated from the posts.
    pub fn render_all(&self) -> Result<Vec<RenderedPage>> {
        let mut pages = vec![];

        let page_count = self.page_count().max(1);
        for page in 1..=page_count {
            let path = match page {
                1 => "index.html".to_string(),
                x => format!("page/{}/index.html", x),
            };
            let body = self.render_home(page).with_context(|| format!("Error rendering home page {}", page))?;
            pages.push(RenderedPage { path, body: body.into_bytes() });
        }

        let body = self.render_series_list().context("Error rendering series list")?;
        pages.push(RenderedPage { path: "series/index.html".to_string(), body: body.into_bytes() });

        for group in list_series(&self.posts) {
            let slug = self.links.slug(group.name);
            if let Some(body) = self.render_series(group.name).with_context(|| format!("Error rendering series {}", group.name))? {
                pages.push(RenderedPage { path: format!("series/{}/index.html", slug), body: body.into_bytes() });
            }
            if let Some(body) = self.render_series_feed(group.name)? {
                pages.push(RenderedPage { path: format!("series/{}/index.xml", slug), body });
            }
        }

        for post in self.posts.iter() {
            let Some(body) = self.render_series_nav(&post.permalink)? else {
                continue;
            };
            let path = match permalink_dir(&post.permalink) {
                None => {
                    warn!("Permalink {} points outside of the site, skipping its series navigation", post.permalink);
                    continue;
                }
                Some(dir) if dir.is_empty() => "series-nav.html".to_string(),
                Some(dir) => format!("{}/series-nav.html", dir),
            };
            pages.push(RenderedPage { path, body: body.into_bytes() });
        }

        info!("{} pages rendered", pages.len());
        Ok(pages)
    }
}

// Output directory of a permalink, relative to the site root.
// Full urls keep only their path. None when the path climbs out of the root
fn permalink_dir(permalink: &str) -> Option<String> {
    let path = match permalink.find("://") {
        Some(pos) => {
            let rest = &permalink[pos + 3..];
            rest.find('/').map_or("", |start| &rest[start..])
        }
        None => permalink,
    };

    let mut segments: Vec<&str> = vec![];
    for segment in path.split(|c: char| c == '/' || c == '\\') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            x if x.contains(':') => return None,
            x => segments.push(x),
        }
    }

    Some(segments.join("/"))
}
