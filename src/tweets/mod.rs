mod load;
mod parse;
mod records;

pub use load::load_dataset;
pub use records::{ColorMetric, TweetDataset, TweetRecord};
