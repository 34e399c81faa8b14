//! Series grouping and navigation.
//!
//! A series is not stored anywhere. It is the set of posts sharing the same
//! series name, computed from the post collection every time it is needed.
//! Nothing here fails: posts with missing or inconsistent series metadata
//! simply don't show up in any series.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::content::Post;

/// One series and its members, sorted by series index.
#[derive(Debug)]
pub struct SeriesGroup<'a> {
    pub name: &'a str,
    pub posts: Vec<&'a Post>,
    pub post_count: usize,
    pub last_updated: NaiveDateTime,
}

/// Where a post sits inside its series.
#[derive(Debug)]
pub struct SeriesNav<'a> {
    pub series: &'a str,
    pub previous: Option<&'a Post>,
    pub next: Option<&'a Post>,
    /// 1-based
    pub position: usize,
    pub total: usize,
}

// Series index first. Repeated indices fall back to date and permalink
fn series_order(a: &Post, b: &Post) -> Ordering {
    a.series_index().cmp(&b.series_index())
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.permalink.cmp(&b.permalink))
}

/// Groups all posts by series. Largest series first, ties keep the order in
/// which the series were first seen in `posts`.
pub fn list_series(posts: &[Post]) -> Vec<SeriesGroup<'_>> {
    let mut groups: Vec<(&str, Vec<&Post>)> = vec![];
    let mut name_to_group: HashMap<&str, usize> = HashMap::new();

    for post in posts {
        let Some(name) = post.series_name() else {
            continue;
        };
        let pos = *name_to_group.entry(name).or_insert_with(|| {
            groups.push((name, vec![]));
            groups.len() - 1
        });
        groups[pos].1.push(post);
    }

    let mut res: Vec<SeriesGroup> = groups.into_iter()
        .filter_map(|(name, mut members)| {
            members.sort_by(|a, b| series_order(a, b));
            let last_updated = members.iter().map(|p| p.date).max()?;
            Some(SeriesGroup {
                name,
                post_count: members.len(),
                posts: members,
                last_updated,
            })
        })
        .collect();

    // sort_by is stable, discovery order is kept for equal counts
    res.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    res
}

/// Members of a single series sorted by series index.
pub fn series_members<'a>(series_name: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    let mut members: Vec<&Post> = posts.iter()
        .filter(|p| p.series_name() == Some(series_name))
        .collect();
    members.sort_by(|a, b| series_order(a, b));
    members
}

/// Previous and next posts of `post` in its series.
///
/// Returns None when there is nothing to navigate: no series, a series with a
/// single post, or a post that is not part of `posts`.
pub fn neighbors<'a>(post: &Post, posts: &'a [Post]) -> Option<SeriesNav<'a>> {
    let series_name = post.series_name()?;
    let members = series_members(series_name, posts);
    if members.len() < 2 {
        return None;
    }

    let idx = members.iter().position(|p| p.permalink == post.permalink)?;
    let previous = if idx > 0 { Some(members[idx - 1]) } else { None };
    let next = members.get(idx + 1).copied();

    Some(SeriesNav {
        series: members[idx].series_name()?,
        previous,
        next,
        position: idx + 1,
        total: members.len(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, NaiveTime};

    use crate::content::SeriesRef;

    use super::*;

    fn post(link: &str, series: Option<(&str, u32)>, day: u64) -> Post {
        let base = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        );
        Post {
            title: format!("title of {}", link),
            date: base.checked_add_days(Days::new(day)).unwrap(),
            permalink: format!("/posts/{}/", link),
            series: series.map(|(name, index)| SeriesRef { name: name.to_string(), index }),
            tags: vec![],
            description: None,
        }
    }

    fn links(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.permalink.clone()).collect()
    }

    fn sample_posts() -> Vec<Post> {
        vec![
            post("gadgets-2", Some(("Gadgets", 2)), 10),
            post("widgets-3", Some(("Widgets", 3)), 3),
            post("standalone", None, 4),
            post("widgets-1", Some(("Widgets", 1)), 1),
            post("gadgets-1", Some(("Gadgets", 1)), 9),
            post("widgets-2", Some(("Widgets", 2)), 2),
            post("solo-1", Some(("Solo", 1)), 20),
        ]
    }

    #[test]
    fn test_list_series_ordering() {
        let posts = sample_posts();
        let groups = list_series(&posts);

        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["Widgets", "Gadgets", "Solo"]);

        assert_eq!(groups[0].post_count, 3);
        assert_eq!(links(&groups[0].posts), ["/posts/widgets-1/", "/posts/widgets-2/", "/posts/widgets-3/"]);
        assert_eq!(groups[0].last_updated, posts[1].date);

        assert_eq!(groups[1].post_count, 2);
        assert_eq!(links(&groups[1].posts), ["/posts/gadgets-1/", "/posts/gadgets-2/"]);
        assert_eq!(groups[1].last_updated, posts[0].date);
    }

    #[test]
    fn test_list_series_ties_keep_discovery_order() {
        let posts = vec![
            post("b-1", Some(("B", 1)), 1),
            post("a-1", Some(("A", 1)), 2),
            post("c-1", Some(("C", 1)), 3),
            post("a-2", Some(("A", 2)), 4),
        ];
        let names: Vec<&str> = list_series(&posts).iter().map(|g| g.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_every_series_post_in_exactly_one_group() {
        let posts = sample_posts();
        let groups = list_series(&posts);

        for p in posts.iter() {
            let found = groups.iter()
                .filter(|g| g.posts.iter().any(|m| m.permalink == p.permalink))
                .count();
            let expected = if p.series.is_some() { 1 } else { 0 };
            assert_eq!(found, expected, "post {}", p.permalink);
        }

        let total: usize = groups.iter().map(|g| g.post_count).sum();
        assert_eq!(total, 6);
        assert!(groups.iter().all(|g| !g.posts.is_empty()));
    }

    #[test]
    fn test_no_series() {
        let posts = vec![post("a", None, 1), post("b", None, 2)];
        assert!(list_series(&posts).is_empty());
        assert!(list_series(&[]).is_empty());
    }

    #[test]
    fn test_series_members() {
        let posts = sample_posts();
        let members = series_members("Widgets", &posts);
        assert_eq!(members.len(), 3);
        let indices: Vec<u32> = members.iter().filter_map(|p| p.series_index()).collect();
        assert_eq!(indices, [1, 2, 3]);

        assert!(series_members("Unknown", &posts).is_empty());
        // Exact match only
        assert!(series_members("widgets", &posts).is_empty());
    }

    #[test]
    fn test_series_members_with_gaps() {
        let posts = vec![
            post("w-10", Some(("W", 10)), 3),
            post("w-2", Some(("W", 2)), 1),
            post("w-5", Some(("W", 5)), 2),
        ];
        assert_eq!(links(&series_members("W", &posts)), ["/posts/w-2/", "/posts/w-5/", "/posts/w-10/"]);
    }

    #[test]
    fn test_duplicate_index_ordered_by_date() {
        let posts = vec![
            post("late", Some(("W", 1)), 5),
            post("early", Some(("W", 1)), 1),
            post("second", Some(("W", 2)), 0),
        ];
        assert_eq!(links(&series_members("W", &posts)), ["/posts/early/", "/posts/late/", "/posts/second/"]);
    }

    #[test]
    fn test_neighbors_middle() {
        let posts = vec![
            post("widgets-1", Some(("Widgets", 1)), 1),
            post("widgets-2", Some(("Widgets", 2)), 2),
            post("widgets-3", Some(("Widgets", 3)), 3),
        ];
        let nav = neighbors(&posts[1], &posts).unwrap();
        assert_eq!(nav.series, "Widgets");
        assert_eq!(nav.previous.map(|p| p.permalink.as_str()), Some("/posts/widgets-1/"));
        assert_eq!(nav.next.map(|p| p.permalink.as_str()), Some("/posts/widgets-3/"));
        assert_eq!(nav.position, 2);
        assert_eq!(nav.total, 3);
    }

    #[test]
    fn test_neighbors_first_and_last() {
        let posts = sample_posts();

        let first = neighbors(&posts[3], &posts).unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.map(|p| p.permalink.as_str()), Some("/posts/widgets-2/"));
        assert_eq!(first.position, 1);

        let last = neighbors(&posts[1], &posts).unwrap();
        assert!(last.next.is_none());
        assert_eq!(last.previous.map(|p| p.permalink.as_str()), Some("/posts/widgets-2/"));
        assert_eq!(last.position, 3);
        assert_eq!(last.total, 3);
    }

    #[test]
    fn test_neighbors_none() {
        let posts = sample_posts();

        // No series
        assert!(neighbors(&posts[2], &posts).is_none());
        // Single member series
        assert!(neighbors(&posts[6], &posts).is_none());
        // Post outside of the collection
        let stranger = post("widgets-9", Some(("Widgets", 9)), 30);
        assert!(neighbors(&stranger, &posts).is_none());
        // Series with no other matching post
        let lonely = post("lonely", Some(("Nobody", 1)), 30);
        assert!(neighbors(&lonely, &posts).is_none());
    }
}
