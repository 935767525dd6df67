pub mod ansi;
pub mod display_data;
pub mod display_manager;
mod table_printer;
mod width_util;
