use std::io;
use std::io::ErrorKind;

use crate::metadata::Metadata;
use crate::tag_list::TagList;
use crate::view::{recent_posts, MetaTags, PostLink, PostSummary, ViewContext};

#[derive(Debug, Clone, PartialEq)]
pub struct TagLink {
    pub tag: String,
    pub count: u32,
    pub url: String,
}

/// Everything needed to show a single post. The body is the raw markdown.
#[derive(Debug)]
pub struct PostView {
    pub post: PostSummary,
    pub body: String,
    pub recent_posts: Vec<PostLink>,
    pub tag_list: Vec<TagLink>,
    pub meta_tags: MetaTags,
}

impl PostView {
    pub fn load(metadata: &Metadata, ctx: &ViewContext, id: u32) -> io::Result<PostView> {
        let post = match metadata.get(id) {
            Some(post) => post,
            None => return Err(io::Error::new(ErrorKind::NotFound, format!("Post ({}) does not exist", id))),
        };

        let summary = PostSummary::from_post(post, ctx)?;
        let body = post.body(ctx.content)?.to_string();

        let mut meta_tags = vec![
            ("og:title", summary.title.clone()),
            ("title", summary.title.clone()),
            ("og:description", summary.description.clone()),
            ("description", summary.description.clone()),
        ];
        if let Some(ref image) = summary.image {
            meta_tags.push(("og:image", image.clone()));
        }
        meta_tags.push(("og:url", summary.url.clone()));
        meta_tags.push(("og:type", "article".to_string()));

        let tag_list = TagList::from_posts(metadata.all()).all().into_iter()
            .map(|t| TagLink {
                url: t.url(ctx.site),
                tag: t.tag,
                count: t.count,
            })
            .collect();

        Ok(PostView {
            post: summary,
            body,
            recent_posts: recent_posts(metadata.all(), ctx)?,
            tag_list,
            meta_tags,
        })
    }

    pub fn title(&self) -> &str {
        &self.post.title
    }
}
