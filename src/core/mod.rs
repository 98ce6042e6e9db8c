pub mod lookup;
pub mod title;

pub use crate::domain::model::{ProductResponse, SearchQuery, SearchRequest, SearchResultItem};
pub use crate::domain::ports::{SearchClient, SearchSettings};
pub use crate::utils::error::Result;
