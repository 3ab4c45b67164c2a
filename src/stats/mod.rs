//! Statistical estimates for project participation rates.

pub mod sampling;

pub use sampling::{
    acceptable_sample_size, min_sample_size, probability, quality, Probability, SampleSize, Z_95,
};
