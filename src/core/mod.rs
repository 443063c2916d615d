// Core algorithm exports
pub mod matcher;
pub mod normalize;
pub mod similarity;

pub use matcher::{search, score_record, SCORE_THRESHOLD, SUBSTRING_BONUS};
pub use normalize::normalize;
pub use similarity::similarity;
