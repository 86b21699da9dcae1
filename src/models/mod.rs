pub mod listing;
pub mod request;

pub use listing::{Listing, Source};
pub use request::{
    Currency, FilterConstraint, FilterField, Operation, PriceRange, PropertyType, SearchInput,
    SearchRequest,
};
