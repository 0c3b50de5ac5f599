pub mod accumulator;
pub mod channel_pipeline;
pub mod grid_builder;
pub mod interpolator;
pub mod merger;
pub mod validator;

pub use accumulator::{Accumulator, Projection};
pub use channel_pipeline::{ChannelPipeline, ChannelReport};
pub use grid_builder::GridBuilder;
pub use interpolator::{GapInterpolator, InterpolationStats, SeriesFill};
pub use merger::{GridMerger, MergedRecord};
pub use validator::{TokenVerdict, ValidationFilter};
