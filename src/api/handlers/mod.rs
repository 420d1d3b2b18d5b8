//! HTTP request handlers.

pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod translate;

pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::{code_stats_handler, service_stats_handler};
pub use translate::translate_handler;
