use std::collections::HashMap;

/// Which page a visitor asked for.
#[derive(Debug, PartialEq, Clone)]
pub enum PageRequest {
    Recent { page: u32 },
    Tag { tag: String, page: u32 },
    Post(u32),
}

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn get_page(&self) -> u32 {
        match self.get("page").and_then(|v| v.parse::<u32>().ok()) {
            Some(0) | None => 1,
            Some(page) => page,
        }
    }

    /// `p1=<digits>` is a post, `p1=tag&p2=<tag>` a tag listing,
    /// anything else the list of recent posts.
    pub fn page_request(&self) -> PageRequest {
        let page = self.get_page();
        match self.get("p1") {
            Some(p1) if !p1.is_empty() && p1.bytes().all(|b| b.is_ascii_digit()) => match p1.parse() {
                Ok(id) => PageRequest::Post(id),
                Err(_) => PageRequest::Recent { page },
            },
            Some("tag") => match self.get("p2") {
                Some(tag) if !tag.is_empty() => PageRequest::Tag { tag: tag.to_string(), page },
                _ => PageRequest::Recent { page },
            },
            _ => PageRequest::Recent { page },
        }
    }
}
