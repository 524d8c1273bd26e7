pub mod config;
pub mod error;
pub mod export;
pub mod merge;
pub mod normalize;
pub mod numeric;
pub mod pipeline;
pub mod rankings;
pub mod rating;
pub mod season;
pub mod season_loader;
pub mod trend;
