pub mod link_repository;
pub mod storage_port;
