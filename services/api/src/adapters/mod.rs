pub mod db;
pub mod html;

pub use db::{connect_pool, DbAdapter};
pub use html::HtmlRenderer;
