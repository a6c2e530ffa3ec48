// Content blobs live outside the record store, one markdown file per Link id.

pub const CONTENT_NOT_FOUND: &str = "Error: Link content not found.";
pub const CONTENT_WRITE_FAILED: &str = "Error: Could not write file.";
pub const CONTENT_UNAVAILABLE: &str = "Error: Link content unavailable.";

pub fn content_key(link_id: i64) -> String {
    format!("links/{}.md", link_id)
}

#[derive(Debug, thiserror::Error)]
pub enum LinkContentError {
    #[error("{}", CONTENT_NOT_FOUND)]
    NotFound,
    #[error("{}", CONTENT_WRITE_FAILED)]
    WriteFailed(#[source] anyhow::Error),
    #[error("{}", CONTENT_UNAVAILABLE)]
    Storage(#[source] anyhow::Error),
}
