pub mod docs;
pub mod search;
pub mod sources;

pub use docs::*;
pub use search::*;
pub use sources::*;
