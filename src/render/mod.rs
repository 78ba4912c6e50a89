//! Render client for the headless-browser backend.
//!
//! One POST per analysis: the backend loads the target URL, waits for the
//! network to go idle and answers with the page's HTML. Nothing is cached and
//! failures are not retried.

mod client;
mod types;

pub use client::RenderClient;
pub use types::{GotoOptions, RenderRequest, RenderedContent};
