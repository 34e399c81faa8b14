pub mod config;
pub mod logger;
pub mod content;
pub mod series;
pub mod tags;
pub mod site;
mod test_data;
mod text_utils;
mod paginator;
mod view;
