pub mod create;
pub mod delete;
pub mod fetch;
pub mod list;

pub use create::create_item;
pub use delete::delete_item;
pub use fetch::fetch_item;
pub use list::list_items;
