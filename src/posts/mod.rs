//! Read-only view of the posts visible to the signed-in customer.

pub mod viewer;

pub use viewer::{PostViewer, PostsView};
