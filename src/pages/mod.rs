pub mod help;
pub mod listing;
pub mod main_menu;
