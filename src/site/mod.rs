//! Site discovery and rendering
//!
//! - `frontmatter`: splitting YAML front matter from page sources
//! - `page`: pages, their URLs and output paths
//! - `data`: global data files
//! - `collections`: tag collections
//! - `pagination`: splitting a template over a data sequence
//! - `layout`: layout chains
//! - `operation`: the filesystem effects a build decides on
//! - `builder`: turning the input directory into operations
//! - `writer`: applying operations to disk

pub mod builder;
pub mod collections;
pub mod data;
pub mod frontmatter;
pub mod layout;
pub mod operation;
pub mod page;
pub mod pagination;
pub mod writer;

pub use builder::{check_duplicate_outputs, SiteBuilder};
pub use operation::BuildOperation;
pub use page::Page;
pub use writer::OutputWriter;
