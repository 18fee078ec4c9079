pub mod app;
pub mod font_entry_view;
pub mod layout;
pub mod popup_view;
pub mod reader_view;
