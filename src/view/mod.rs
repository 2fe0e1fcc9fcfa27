use std::io;

use crate::config::Site;
use crate::content_store::ContentStore;
use crate::paginator::paginate;
use crate::post::Post;

pub mod list_view;
pub mod post_view;

/// Everything a view needs besides the posts themselves
pub struct ViewContext<'a> {
    pub site: &'a Site,
    pub content: &'a ContentStore,
    pub page_size: u32,
    pub sidebar_size: usize,
}

/// Open Graph and `<meta>` values, in the order they should be emitted
pub type MetaTags = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct PostLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub id: u32,
    pub title: String,
    pub date: String,
    pub url: String,
    pub image: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

impl PostSummary {
    pub fn from_post(post: &Post, ctx: &ViewContext) -> io::Result<PostSummary> {
        Ok(PostSummary {
            id: post.id,
            title: post.title.clone(),
            date: post.date.clone(),
            url: post.url(ctx.site)?,
            image: post.image(ctx.site),
            description: post.description(ctx.content)?,
            tags: post.tags.clone(),
        })
    }
}

/// The newest posts, for the sidebar
pub fn recent_posts(posts: &[Post], ctx: &ViewContext) -> io::Result<Vec<PostLink>> {
    if ctx.sidebar_size == 0 {
        return Ok(vec![]);
    }

    paginate(posts, 1, ctx.sidebar_size as u32).items.into_iter()
        .map(|post| -> io::Result<PostLink> {
            Ok(PostLink {
                title: post.title.clone(),
                url: post.url(ctx.site)?,
            })
        })
        .collect()
}
