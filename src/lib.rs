pub mod config;
pub mod logger;
pub mod post;
pub mod content_store;
pub mod metadata;
pub mod paginator;
pub mod tag_list;
pub mod query_string;
pub mod text_utils;
pub mod view;
mod test_data;
