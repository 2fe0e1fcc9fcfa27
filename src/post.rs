use std::cell::OnceCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Site;
use crate::content_store::ContentStore;
use crate::text_utils::{format_date_time, parse_date_time, slugify, summarize};

/// One entry of the post index.
///
/// Example of the stored form:
/// {"id":3,"title":"Hello world","tags":["rust"],"date":"22-05-2020, 10:54","image":"/img/hello.png"}
///
/// The body lives in the content store and is read the first time it is
/// asked for, then kept for as long as the post is.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Post {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip)]
    body: OnceCell<String>,
}

// Two posts are the same record when their stored fields match,
// whether or not a body has been loaded yet.
impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.tags == other.tags
            && self.date == other.date
            && self.image == other.image
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, tags={}\ntitle={}",
               self.id,
               self.date,
               self.tags.join(" "),
               self.title,
        )
    }
}

impl Post {
    pub fn new(id: u32, title: &str, tags: Vec<String>, date: &NaiveDateTime, image: Option<String>) -> Post {
        Post {
            id,
            title: title.to_string(),
            tags,
            date: format_date_time(date),
            image,
            body: OnceCell::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Fails with `InvalidInput` when the stored date is corrupt
    pub fn date_time(&self) -> io::Result<NaiveDateTime> {
        parse_date_time(&self.date)
    }

    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// `{url}/{id}/{year}/{month}/{day}/{slug}`
    pub fn url(&self, site: &Site) -> io::Result<String> {
        let date = self.date_time()?;
        Ok(format!("{}/{}/{}/{}", site.url, self.id, date.format("%Y/%m/%d"), self.slug()))
    }

    /// Site-relative images get the site url in front. The stored value is left untouched.
    pub fn image(&self, site: &Site) -> Option<String> {
        self.image.as_ref().map(|image| {
            if image.starts_with('/') {
                format!("{}{}", site.site_url, image)
            } else {
                image.clone()
            }
        })
    }

    pub fn body(&self, content: &ContentStore) -> io::Result<&str> {
        if let Some(body) = self.body.get() {
            return Ok(body);
        }

        let body = content.read(self.id)?;
        Ok(self.body.get_or_init(|| body))
    }

    pub fn description(&self, content: &ContentStore) -> io::Result<String> {
        Ok(summarize(self.body(content)?))
    }
}
