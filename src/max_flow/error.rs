//!
//! Errors raised while building a network
//!
//! Infeasibility is not an error, it is reported as `Ok(None)`.
//!
use super::base::Capacity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("entity {entity} prefers bucket {bucket}, but there are only {buckets} buckets")]
    BucketOutOfRange {
        entity: usize,
        bucket: usize,
        buckets: usize,
    },
    #[error("eligible entity {index} is out of range, there are only {entities} entities")]
    EligibleOutOfRange { index: usize, entities: usize },
    #[error("arc v{tail} -> v{head} has lower bound {lower} above its upper bound {upper}")]
    InvalidBounds {
        tail: usize,
        head: usize,
        lower: Capacity,
        upper: Capacity,
    },
    #[error("vertex v{vertex} is out of range, the network has {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },
    #[error("invalid rules: bucket_size={bucket_size} min_eligible={min_eligible}")]
    InvalidRules {
        bucket_size: usize,
        min_eligible: usize,
    },
}
