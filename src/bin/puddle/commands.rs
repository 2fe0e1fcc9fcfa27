use anyhow::{bail, Context, Result};

use puddle::config::Config;
use puddle::content_store::ContentStore;
use puddle::metadata::Metadata;
use puddle::tag_list::TagList;
use puddle::view::list_view::ListView;
use puddle::view::post_view::PostView;
use puddle::view::ViewContext;

use crate::AddArgs;

fn load_metadata(config: &Config) -> Result<Metadata> {
    let content = ContentStore::new(&config.paths.content_dir);
    let metadata = Metadata::load(&config.paths.metadata_file, content)
        .with_context(|| format!("Could not load posts from {}", config.paths.metadata_file.display()))?;
    Ok(metadata)
}

fn view_context<'a>(config: &'a Config, metadata: &'a Metadata) -> ViewContext<'a> {
    ViewContext {
        site: &config.site,
        content: metadata.content(),
        page_size: config.defaults.page_size,
        sidebar_size: config.defaults.sidebar_size(),
    }
}

fn check_tags(allowed: &[String], tags: &[String]) -> Result<()> {
    // No configured list means any tag goes
    if allowed.is_empty() {
        return Ok(());
    }

    for tag in tags {
        if !allowed.contains(tag) {
            bail!("Invalid tag {}. Please choose from: {}", tag, allowed.join(", "));
        }
    }
    Ok(())
}

pub(crate) fn add_cmd(config: &Config, args: AddArgs) -> Result<()> {
    if args.title.trim().is_empty() {
        bail!("Title cannot be empty. Please enter a valid title.");
    }
    check_tags(&config.defaults.tags, &args.tags)?;

    let mut metadata = load_metadata(config)?;
    let id = metadata.add(&args.title, &args.tags, args.image.as_deref())
        .context("Could not create the post")?;

    println!("Post created.");
    println!("Edit the following file to add your mark-down content: {}", metadata.content().path(id).display());
    Ok(())
}

pub(crate) fn delete_cmd(config: &Config, id: u32) -> Result<()> {
    let mut metadata = load_metadata(config)?;
    if metadata.get(id).is_none() {
        bail!("No such post ({})", id);
    }

    metadata.delete(id)
        .with_context(|| format!("Could not delete post ({})", id))?;
    println!("Post ({}) deleted", id);
    Ok(())
}

pub(crate) fn list_cmd(config: &Config, tag: Option<&str>, page: u32) -> Result<()> {
    let metadata = load_metadata(config)?;
    let ctx = view_context(config, &metadata);

    let view = match tag {
        Some(tag) => ListView::tagged(&metadata, &ctx, tag, page)?,
        None => ListView::recent(&metadata, &ctx, page)?,
    };

    println!("{} (page {}/{})", view.title, view.page, view.pages);
    for post in view.posts.iter() {
        println!("{:>5}  {}  {}  [{}]", post.id, post.date, post.title, post.tags.join(", "));
    }
    Ok(())
}

pub(crate) fn show_cmd(config: &Config, id: u32) -> Result<()> {
    let metadata = load_metadata(config)?;
    let ctx = view_context(config, &metadata);
    let view = PostView::load(&metadata, &ctx, id)?;

    println!("{}", view.title());
    println!("date:  {}", view.post.date);
    println!("url:   {}", view.post.url);
    if let Some(ref image) = view.post.image {
        println!("image: {}", image);
    }
    println!("tags:  {}", view.post.tags.join(", "));
    println!();
    println!("{}", view.post.description);
    Ok(())
}

pub(crate) fn tags_cmd(config: &Config) -> Result<()> {
    let metadata = load_metadata(config)?;
    let tag_list = TagList::from_posts(metadata.all());

    for tag in tag_list.all() {
        println!("{:>5}  {}", tag.count, tag.tag);
    }
    Ok(())
}
