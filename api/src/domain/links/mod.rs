pub mod content;
pub mod link;
