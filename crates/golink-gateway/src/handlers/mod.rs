mod health;
mod links;
mod opensearch;
mod redirect;
mod resolve;
mod search;

pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, edit_link_handler, index_handler,
    links_root_handler,
};
pub use opensearch::opensearch_handler;
pub use resolve::{resolve_handler, resolve_with_path_handler};
pub use search::{search_handler, suggest_handler};
