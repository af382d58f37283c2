pub mod excel_write;
pub mod fetch;
pub mod html_table;
