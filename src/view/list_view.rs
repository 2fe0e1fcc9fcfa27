use std::borrow::Borrow;
use std::io;

use crate::metadata::Metadata;
use crate::paginator::paginate;
use crate::post::Post;
use crate::tag_list::tag_url;
use crate::view::{recent_posts, MetaTags, PostLink, PostSummary, ViewContext};

/// A page of posts: either the most recent ones or the ones with a tag.
#[derive(Debug)]
pub struct ListView {
    pub title: String,
    pub url: String,
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub pages: u32,
    pub recent_posts: Vec<PostLink>,
    pub meta_tags: MetaTags,
}

impl ListView {
    pub fn recent(metadata: &Metadata, ctx: &ViewContext, page: u32) -> io::Result<ListView> {
        let site = ctx.site;
        let meta_tags = vec![
            ("og:title", site.title.clone()),
            ("og:description", site.description.clone()),
            ("og:url", site.url.clone()),
            ("og:type", "website".to_string()),
        ];

        Self::build(metadata.all(), metadata, ctx, page, site.title.clone(), site.url.clone(), meta_tags)
    }

    pub fn tagged(metadata: &Metadata, ctx: &ViewContext, tag: &str, page: u32) -> io::Result<ListView> {
        let url = tag_url(ctx.site, tag);
        let meta_tags = vec![
            ("og:title", tag.to_string()),
            ("og:description", format!("All posts tagged with {}", tag)),
            ("og:url", url.clone()),
            ("og:type", "article".to_string()),
        ];

        let posts = metadata.get_by_tag(tag);
        Self::build(&posts, metadata, ctx, page, format!("Tagged with {}", tag), url, meta_tags)
    }

    fn build<P: Borrow<Post>>(posts: &[P], metadata: &Metadata, ctx: &ViewContext, page: u32,
                             title: String, url: String, meta_tags: MetaTags) -> io::Result<ListView> {
        let page = paginate(posts, page, ctx.page_size);
        let summaries = page.items.into_iter()
            .map(|post| PostSummary::from_post(Borrow::<Post>::borrow(post), ctx))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(ListView {
            title,
            url,
            posts: summaries,
            page: page.number,
            pages: page.total_pages,
            recent_posts: recent_posts(metadata.all(), ctx)?,
            meta_tags,
        })
    }
}
