pub mod query;
pub mod recommendation;

pub use query::{NewQuery, ProductQuery, QueryUpdate};
pub use recommendation::{NewRecommendation, Recommendation};
