pub mod portal;
pub mod traits;

pub use portal::PortalScraper;
pub use traits::{SearchExecutor, SearchOutcome};
