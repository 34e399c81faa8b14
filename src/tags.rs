use std::collections::HashMap;

use crate::content::Post;

#[derive(Debug, PartialEq)]
pub struct TagCount<'a> {
    pub tag: &'a str,
    pub count: usize,
}

/// Sort tags by frequency reversed. Equal counts are sorted by name.
pub fn tag_counts(posts: &[Post]) -> Vec<TagCount<'_>> {
    let mut tag_map: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in post.tags.iter() {
            *tag_map.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tag_list: Vec<TagCount> = tag_map.into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    tag_list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(b.tag)));
    tag_list
}
