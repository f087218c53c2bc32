pub mod chain;
pub mod sampler;

pub use chain::{advance_digest, digest_entropy, timestamp_micros_part, ChainError};
pub use sampler::{fair_index, SampleError};
