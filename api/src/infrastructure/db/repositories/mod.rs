pub mod link_repository_memory;
pub mod link_repository_sqlx;
