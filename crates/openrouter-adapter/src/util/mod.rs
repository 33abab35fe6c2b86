pub(crate) mod http;
pub mod json;
pub(crate) mod template;
