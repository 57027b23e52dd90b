pub mod enums;
pub mod error;
pub mod source;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AccountingModel, AssetId, PortfolioId};
pub use error::CoreError;
pub use source::ReturnSource;
pub use structs::{ReturnPoint, ReturnSeries};
