//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod recommendation_source;

#[cfg(test)]
pub use recommendation_source::MockRecommendationSource;
pub use recommendation_source::{
    FixtureRecommendationSource, RecommendationSource, RecommendationSourceError,
};
