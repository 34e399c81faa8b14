use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use serde::Deserialize;
use spdlog::{debug, info, warn};

use crate::content::front_matter::FrontMatter;
use crate::content::Post;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexFormat {
    Toml,
    Json,
}

/// List of front matter records produced by the content loader.
///
/// TOML uses an array of tables (`[[post]]`), JSON an object with a `post` array.
#[derive(Debug, Default, Deserialize)]
pub struct ContentIndex {
    #[serde(default, rename = "post")]
    pub posts: Vec<FrontMatter>,
}

impl ContentIndex {
    pub fn from_file(file_path: &Path) -> io::Result<ContentIndex> {
        let format = match Self::guess_format(file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the format of the content index {}", file_path.display()))),
            Some(format) => format,
        };

        let raw_content = match fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening content index {}: {}", file_path.display(), e))),
        };

        let index = Self::from_str(&raw_content, format)?;
        info!("Content index {} has {} records", file_path.display(), index.posts.len());
        Ok(index)
    }

    pub fn from_str(src: &str, format: IndexFormat) -> io::Result<ContentIndex> {
        let res = match format {
            IndexFormat::Toml => toml::from_str::<ContentIndex>(src).map_err(|e| e.to_string()),
            IndexFormat::Json => serde_json::from_str::<ContentIndex>(src).map_err(|e| e.to_string()),
        };

        res.map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error parsing content index: {}", e)))
    }

    fn guess_format(file_name: &Path) -> Option<IndexFormat> {
        match file_name.extension()?.to_str()? {
            "toml" => Some(IndexFormat::Toml),
            "json" => Some(IndexFormat::Json),
            _ => None,
        }
    }

    pub fn into_posts(self) -> Vec<Post> {
        load_posts(self.posts)
    }
}

/// Validates the records and returns the publishable posts, in index order.
///
/// Drafts, invalid records and repeated permalinks are left out.
pub fn load_posts(records: Vec<FrontMatter>) -> Vec<Post> {
    let mut posts: Vec<Post> = Vec::with_capacity(records.len());
    let mut permalinks: HashSet<String> = HashSet::new();

    for fm in records {
        if fm.draft {
            debug!("Skipping draft {}", fm.permalink);
            continue;
        }

        let post = match Post::try_from(fm) {
            Ok(post) => post,
            Err(e) => {
                warn!("Skipping invalid post: {}", e);
                continue;
            }
        };

        if !permalinks.insert(post.permalink.clone()) {
            warn!("Duplicated permalink {}, keeping the first one", post.permalink);
            continue;
        }
        posts.push(post);
    }

    for (series, index, permalinks) in find_duplicate_indices(&posts) {
        warn!("Series {} has {} posts with index {}, ordering them by date: {}",
            series, permalinks.len(), index, permalinks.join(", "));
    }

    posts
}

/// Returns (series, index, permalinks) for every index used by more than one post.
pub fn find_duplicate_indices(posts: &[Post]) -> Vec<(String, u32, Vec<String>)> {
    let mut seen: HashMap<(&str, u32), Vec<&str>> = HashMap::new();
    let mut order: Vec<(&str, u32)> = vec![];

    for post in posts {
        if let Some(ref series) = post.series {
            let key = (series.name.as_str(), series.index);
            let entry = seen.entry(key).or_insert_with(|| {
                order.push(key);
                vec![]
            });
            entry.push(post.permalink.as_str());
        }
    }

    order.into_iter()
        .filter_map(|key| {
            let permalinks = &seen[&key];
            if permalinks.len() > 1 {
                let (name, index) = key;
                Some((name.to_string(), index, permalinks.iter().map(|p| p.to_string()).collect()))
            } else {
                None
            }
        })
        .collect()
}
