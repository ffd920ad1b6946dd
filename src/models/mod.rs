pub mod nav_item;
pub mod page;
pub mod table_filter;
pub mod view_state;
