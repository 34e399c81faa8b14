use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use spdlog::info;

pub const HOME_TPL: &str = r##"<section class="posts">
{{#posts}}
<article class="post on-list">
  <h2 class="post-title"><a href="{{link}}">{{title}}</a></h2>
  <div class="post-meta"><time class="post-date">{{date}}</time>{{#series}} :: <a class="post-series" href="{{link}}">Part {{position}} of {{total}} in {{name}}</a>{{/series}}</div>
  {{#has_tags}}<span class="post-tags">{{#tags}}<a href="{{link}}">#{{tag}}</a> {{/tags}}</span>{{/has_tags}}
  <div class="post-content">{{summary}}</div>
  <a class="read-more button" href="{{link}}">Read more →</a>
</article>
{{/posts}}
{{^posts}}<p>No posts yet.</p>{{/posts}}
</section>
{{#show_pagination}}
<div class="pagination">{{#page_list}}{{#current}}<span class="current">{{number}}</span>{{/current}}{{^current}}<a href="{{link}}">{{number}}</a>{{/current}} {{/page_list}}</div>
{{/show_pagination}}
{{#has_series}}
<aside class="series">
  <h3>Series</h3>
  <ul>{{#series}}<li><a href="{{link}}">{{name}}</a> ({{post_count}})</li>{{/series}}</ul>
</aside>
{{/has_series}}
{{#has_tags}}
<aside class="tags">{{#tags}}<a href="{{link}}">{{tag}}</a> ({{count}}) {{/tags}}</aside>
{{/has_tags}}
"##;

pub const SERIES_LIST_TPL: &str = r##"<h1>Series</h1>
<ul class="series-list">
{{#series}}
  <li>
    <h2><a href="{{link}}">{{name}}</a></h2>
    <div class="series-meta">{{post_count}} posts :: last updated <time>{{last_updated}}</time></div>
    {{#has_description}}<p>{{description}}</p>{{/has_description}}
  </li>
{{/series}}
</ul>
{{^series}}<p>No series yet.</p>{{/series}}
"##;

pub const SERIES_TPL: &str = r##"<h1>Series: {{name}}</h1>
<div class="series-meta">{{post_count}} posts :: last updated <time>{{last_updated}}</time> :: <a href="{{feed_link}}">RSS</a></div>
<ol class="series-posts">
{{#posts}}
  <li value="{{position}}">
    <a href="{{link}}">{{title}}</a> <time>{{date}}</time>
    {{#has_summary}}<p>{{summary}}</p>{{/has_summary}}
  </li>
{{/posts}}
</ol>
"##;

pub const SERIES_NAV_TPL: &str = r##"<div class="series-nav">
  <p>Part {{position}} of {{total}} in the series <a href="{{series_link}}">{{series}}</a></p>
  {{#previous}}<a class="series-prev" href="{{link}}">← {{title}}</a>{{/previous}}
  {{#next}}<a class="series-next" href="{{link}}">{{title}} →</a>{{/next}}
</div>
"##;

/// Sources of all templates. Files in the template directory replace the built-in ones.
pub struct TemplateSet {
    pub home: String,
    pub series_list: String,
    pub series: String,
    pub series_nav: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet {
            home: HOME_TPL.to_string(),
            series_list: SERIES_LIST_TPL.to_string(),
            series: SERIES_TPL.to_string(),
            series_nav: SERIES_NAV_TPL.to_string(),
        }
    }
}

impl TemplateSet {
    pub fn load(tpl_dir: Option<&Path>) -> io::Result<TemplateSet> {
        let Some(tpl_dir) = tpl_dir else {
            return Ok(TemplateSet::default());
        };

        Ok(TemplateSet {
            home: read_template(tpl_dir, "home.tpl", HOME_TPL)?,
            series_list: read_template(tpl_dir, "series_list.tpl", SERIES_LIST_TPL)?,
            series: read_template(tpl_dir, "series.tpl", SERIES_TPL)?,
            series_nav: read_template(tpl_dir, "series_nav.tpl", SERIES_NAV_TPL)?,
        })
    }
}

fn read_template(tpl_dir: &Path, file_name: &str, default_src: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match fs::read_to_string(&full_path) {
        Ok(src) => {
            info!("Using template {}", full_path.display());
            Ok(src)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(default_src.to_string()),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
    }
}
