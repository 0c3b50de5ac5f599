pub mod feed_reader;

pub use feed_reader::{FeedData, FeedReader};
