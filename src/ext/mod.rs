/// Extension traits for standard library types.
pub mod path;

pub use path::PathExt;
