use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::Local;
use spdlog::{debug, info};

use crate::content_store::ContentStore;
use crate::post::Post;

const EMPTY_INDEX: &str = "[]";

/// The post index: a JSON array of every post, kept in a single file.
///
/// Every change rewrites the whole file. Only one process is expected to
/// write at a time; two concurrent writers will lose one of the changes.
pub struct Metadata {
    file: PathBuf,
    content: ContentStore,
    posts: Vec<Post>,
    latest_id: u32,
}

impl Metadata {
    pub fn new(file: PathBuf, content: ContentStore, posts: Vec<Post>) -> Self {
        let latest_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Metadata {
            file,
            content,
            posts,
            latest_id,
        }
    }

    /// Reads the index at `file`, creating an empty one first if there is none
    pub fn load(file: &Path, content: ContentStore) -> io::Result<Metadata> {
        if !file.exists() {
            info!("Creating empty post index {}", file.display());
            fs::write(file, EMPTY_INDEX)
                .map_err(|e| io::Error::new(e.kind(), format!("Cannot write to metadata file {}: {}", file.display(), e)))?;
        }

        let raw = fs::read(file)
            .map_err(|e| io::Error::new(e.kind(), format!("Error opening metadata file {}: {}", file.display(), e)))?;

        let posts: Vec<Post> = match serde_json::from_slice(&raw) {
            Ok(posts) => posts,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidInput, format!("Metadata file {} does not contain valid JSON: {}", file.display(), e))),
        };

        debug!("Loaded {} posts from {}", posts.len(), file.display());
        Ok(Self::new(file.to_path_buf(), content, posts))
    }

    pub fn latest_id(&self) -> u32 {
        self.latest_id
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }

    pub fn get(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn get_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter()
            .filter(|p| p.has_tag(tag))
            .collect()
    }

    /// Stores a new post and creates its empty body. Returns the new id.
    ///
    /// The index is written before the body is created. If either step
    /// fails the post is dropped from memory again, so a retry starts clean.
    pub fn add(&mut self, title: &str, tags: &[String], image: Option<&str>) -> io::Result<u32> {
        let title = title.trim();
        if title.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidInput, "Title cannot be empty"));
        }

        let mut unique_tags: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique_tags.contains(tag) {
                unique_tags.push(tag.clone());
            }
        }

        let image = image.map(str::trim)
            .filter(|i| !i.is_empty())
            .map(str::to_string);

        let id = self.latest_id.checked_add(1)
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, format!("No post id left after {}", self.latest_id)))?;
        let post = Post::new(id, title, unique_tags, &Local::now().naive_local(), image);
        self.posts.push(post);

        let res = self.save().and_then(|_| self.content.create(id));
        if let Err(e) = res {
            self.posts.pop();
            return Err(e);
        }

        self.latest_id = id;
        info!("Added post {} ({})", id, title);
        Ok(id)
    }

    pub fn delete(&mut self, id: u32) -> io::Result<()> {
        let pos = match self.posts.iter().position(|p| p.id == id) {
            Some(pos) => pos,
            None => return Err(io::Error::new(ErrorKind::NotFound, format!("Post ({}) does not exist", id))),
        };

        let post = self.posts.remove(pos);
        if let Err(e) = self.save() {
            self.posts.insert(pos, post);
            return Err(e);
        }

        self.content.delete(id)?;
        info!("Deleted post {} ({})", id, post.title);
        Ok(())
    }

    /// Replaces the index file with the posts in memory.
    /// The new index is written next to the old one and renamed over it.
    pub fn save(&self) -> io::Result<()> {
        let tmp_file = self.file.with_extension("json.tmp");

        let res = self.write_index(&tmp_file)
            .and_then(|_| fs::rename(&tmp_file, &self.file));
        if let Err(e) = res {
            let _ = fs::remove_file(&tmp_file);
            return Err(io::Error::new(e.kind(), format!("Failed to write metadata file {}: {}", self.file.display(), e)));
        }

        debug!("Saved {} posts to {}", self.posts.len(), self.file.display());
        Ok(())
    }

    fn write_index(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.posts)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::test_data::INDEX_DATA;

    use super::*;

    struct Fixture {
        _dir: TempDir,
        index: PathBuf,
        content: ContentStore,
    }

    fn fixture() -> io::Result<Fixture> {
        let dir = TempDir::new()?;
        let index = dir.path().join("posts.json");
        let content_dir = dir.path().join("content");
        fs::create_dir(&content_dir)?;
        Ok(Fixture {
            index,
            content: ContentStore::new(content_dir),
            _dir: dir,
        })
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_load_missing_index() -> io::Result<()> {
        let fx = fixture()?;
        let metadata = Metadata::load(&fx.index, fx.content.clone())?;
        assert!(metadata.all().is_empty());
        assert_eq!(metadata.latest_id(), 0);
        assert_eq!(fs::read_to_string(&fx.index)?, "[]");
        Ok(())
    }

    #[test]
    fn test_load_unwritable_index() {
        let content = ContentStore::new("/fake/path");
        let err = Metadata::load(Path::new("/fake/path/metadata.json"), content).err().unwrap();
        assert!(err.to_string().contains("Cannot write to metadata file"));
    }

    #[test]
    fn test_load_invalid_json() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, "{not json")?;

        let err = Metadata::load(&fx.index, fx.content.clone()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(fs::read_to_string(&fx.index)?, "{not json");

        fs::write(&fx.index, b"[\xff\xfe]")?;
        let err = Metadata::load(&fx.index, fx.content.clone()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(fs::read(&fx.index)?, b"[\xff\xfe]");
        Ok(())
    }

    #[test]
    fn test_load_fixture() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, INDEX_DATA)?;

        let metadata = Metadata::load(&fx.index, fx.content.clone())?;
        assert_eq!(metadata.all().len(), 8);
        assert_eq!(metadata.latest_id(), 8);

        let post = metadata.get(1).unwrap();
        assert_eq!(post.title, "Test Post 1");
        assert!(metadata.get(123).is_none());

        assert_eq!(metadata.get_by_tag("tag-1").len(), 5);
        assert_eq!(metadata.get_by_tag("tag-2").len(), 3);
        assert!(metadata.get_by_tag("fake-tag").is_empty());

        let ids: Vec<u32> = metadata.get_by_tag("tag-2").iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 4, 6]);
        Ok(())
    }

    #[test]
    fn test_latest_id_is_max_not_last() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, r#"[{"id":9,"title":"a","tags":[],"date":"01-01-2024, 00:00"},{"id":4,"title":"b","tags":[],"date":"02-01-2024, 00:00"}]"#)?;

        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;
        assert_eq!(metadata.latest_id(), 9);
        assert_eq!(metadata.add("c", &[], None)?, 10);
        Ok(())
    }

    #[test]
    fn test_add_then_get() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        let id = metadata.add("Test Post", &tags(&["tag1", "tag2"]), Some("/img/a.png"))?;
        assert_eq!(id, 1);

        let post = metadata.get(id).unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.tags, ["tag1", "tag2"]);
        assert_eq!(post.image.as_deref(), Some("/img/a.png"));
        assert!(post.date_time().is_ok());

        assert!(fx.content.path(id).exists());
        assert_eq!(fx.content.read(id)?, "");
        Ok(())
    }

    #[test]
    fn test_add_normalizes_input() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        let id = metadata.add("  Spaced  ", &tags(&["b", "a", "b"]), Some(" "))?;
        let post = metadata.get(id).unwrap();
        assert_eq!(post.title, "Spaced");
        assert_eq!(post.tags, ["b", "a"]);
        assert_eq!(post.image, None);
        Ok(())
    }

    #[test]
    fn test_add_empty_title() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        let err = metadata.add("   ", &[], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(metadata.all().is_empty());
        assert_eq!(metadata.latest_id(), 0);
        Ok(())
    }

    #[test]
    fn test_ids_are_not_reused() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        assert_eq!(metadata.add("one", &[], None)?, 1);
        assert_eq!(metadata.add("two", &[], None)?, 2);
        metadata.delete(2)?;
        assert_eq!(metadata.add("three", &[], None)?, 3);
        metadata.delete(1)?;
        assert_eq!(metadata.add("four", &[], None)?, 4);

        assert_eq!(metadata.latest_id(), 4);
        let ids: Vec<u32> = metadata.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 4]);
        Ok(())
    }

    #[test]
    fn test_add_when_ids_run_out() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, r#"[{"id":4294967295,"title":"a","tags":[],"date":"01-01-2024, 00:00"}]"#)?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        let err = metadata.add("b", &[], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(metadata.all().len(), 1);
        assert_eq!(metadata.latest_id(), u32::MAX);
        assert_eq!(Metadata::load(&fx.index, fx.content.clone())?.all().len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_rolls_back_when_body_fails() -> io::Result<()> {
        let fx = fixture()?;
        let broken = ContentStore::new(fx.content.root_dir().join("missing"));
        let mut metadata = Metadata::load(&fx.index, broken)?;

        assert!(metadata.add("Test Post", &[], None).is_err());
        assert!(metadata.all().is_empty());
        assert_eq!(metadata.latest_id(), 0);

        // The next successful write drops the orphan from the index
        let mut metadata = Metadata::new(fx.index.clone(), fx.content.clone(), metadata.into_posts());
        assert_eq!(metadata.add("Test Post", &[], None)?, 1);
        let reloaded = Metadata::load(&fx.index, fx.content.clone())?;
        assert_eq!(reloaded.all().len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_rolls_back_when_save_fails() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::new(PathBuf::from("/fake/path/posts.json"), fx.content.clone(), vec![]);

        assert!(metadata.add("Test Post", &[], None).is_err());
        assert!(metadata.all().is_empty());
        assert!(!fx.content.path(1).exists());
        Ok(())
    }

    #[test]
    fn test_delete() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;
        let id = metadata.add("Test Post", &tags(&["tag1"]), None)?;

        metadata.delete(id)?;
        assert!(metadata.get(id).is_none());
        assert!(!fx.content.path(id).exists());

        let reloaded = Metadata::load(&fx.index, fx.content.clone())?;
        assert!(reloaded.get(id).is_none());
        Ok(())
    }

    #[test]
    fn test_delete_missing() -> io::Result<()> {
        let fx = fixture()?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;
        assert_eq!(metadata.delete(123).unwrap_err().kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_delete_without_body_file() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, INDEX_DATA)?;
        let mut metadata = Metadata::load(&fx.index, fx.content.clone())?;

        // The index entry goes away even though removing the body fails
        assert_eq!(metadata.delete(3).unwrap_err().kind(), ErrorKind::NotFound);
        let reloaded = Metadata::load(&fx.index, fx.content.clone())?;
        assert!(reloaded.get(3).is_none());
        assert_eq!(reloaded.all().len(), 7);
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> io::Result<()> {
        let fx = fixture()?;
        fs::write(&fx.index, INDEX_DATA)?;
        let metadata = Metadata::load(&fx.index, fx.content.clone())?;

        let copy = fx.index.with_file_name("copy.json");
        let saved = Metadata::new(copy.clone(), fx.content.clone(), metadata.all().to_vec());
        saved.save()?;

        let reloaded = Metadata::load(&copy, fx.content.clone())?;
        assert_eq!(reloaded.all(), metadata.all());
        assert!(!copy.with_extension("json.tmp").exists());
        Ok(())
    }
}
