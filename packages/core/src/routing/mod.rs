//! Read-Path Routing
//!
//! Maps an inbound path under the pages namespace to a [`PageIntent`].
//! Writes never go through here: they always address a page by id.

mod slug_resolver;

pub use slug_resolver::{PageIntent, SlugResolver, PAGES_NAMESPACE};
