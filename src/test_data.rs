#![cfg(test)]

use crate::config::Site;

pub const POST_DATA: &str = "# What I learned after 20+ years of software development
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

Disclaimer: I don't think I am a great engineer, but I would love to have listened to that myself when I started my career, over 20 years ago.
";

/// Eight posts, five tagged `tag-1` and three tagged `tag-2`
pub const INDEX_DATA: &str = r#"[
{"id":1,"title":"Test Post 1","tags":["tag-1"],"date":"01-02-2023, 09:00","image":"/img/one.png"},
{"id":2,"title":"Test Post 2","tags":["tag-1","tag-2"],"date":"03-02-2023, 10:30"},
{"id":3,"title":"Test Post 3","tags":[],"date":"10-03-2023, 18:45","image":"https://cdn.example.org/three.jpg"},
{"id":4,"title":"Test Post 4","tags":["tag-2"],"date":"11-03-2023, 08:15"},
{"id":5,"title":"Test Post 5","tags":["tag-1"],"date":"02-05-2023, 21:00"},
{"id":6,"title":"Test Post 6","tags":["tag-1","tag-2"],"date":"17-06-2023, 12:00"},
{"id":7,"title":"Test Post 7","tags":[],"date":"30-07-2023, 07:05"},
{"id":8,"title":"Test Post 8","tags":["tag-1"],"date":"01-09-2023, 16:20"}
]"#;

pub fn test_site() -> Site {
    Site {
        title: "Puddle".to_string(),
        description: "A small blog".to_string(),
        url: "https://example.com/blog".to_string(),
        site_url: "https://example.com".to_string(),
    }
}
