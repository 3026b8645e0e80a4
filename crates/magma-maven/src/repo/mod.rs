pub mod fetcher;
pub mod probe;
pub mod types;
pub mod versioning;

pub use fetcher::*;
pub use probe::*;
pub use types::*;
pub use versioning::*;
