pub mod attach_link_items;
pub mod create_link;
pub mod delete_link;
pub mod delete_link_content;
pub mod get_link;
pub mod get_link_content;
pub mod get_link_items;
pub mod list_links;
pub mod set_link_content;
pub mod update_link;
