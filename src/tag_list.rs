use std::collections::HashMap;

use crate::config::Site;
use crate::post::Post;

#[derive(Debug, Clone, PartialEq)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

impl TagCount {
    pub fn url(&self, site: &Site) -> String {
        tag_url(site, &self.tag)
    }
}

pub fn tag_url(site: &Site, tag: &str) -> String {
    format!("{}/tag/{}", site.url, tag)
}

/// How many posts use each tag. Counts keep the order in which tags
/// were first seen, which decides ties when sorting.
#[derive(Default)]
pub struct TagList {
    tags: Vec<TagCount>,
    positions: HashMap<String, usize>,
}

impl TagList {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_posts<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Self {
        let mut tag_list = TagList::new();
        for post in posts {
            for tag in post.tags.iter() {
                tag_list.add(tag);
            }
        }
        tag_list
    }

    pub fn add(&mut self, tag: &str) {
        match self.positions.get(tag) {
            Some(&pos) => self.tags[pos].count += 1,
            None => {
                self.positions.insert(tag.to_string(), self.tags.len());
                self.tags.push(TagCount {
                    tag: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn count(&self, tag: &str) -> u32 {
        self.positions.get(tag)
            .map(|&pos| self.tags[pos].count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Most used first
    pub fn all(&self) -> Vec<TagCount> {
        let mut tags = self.tags.clone();
        // sort_by is stable, so ties stay in first-seen order
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }
}
