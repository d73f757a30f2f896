pub mod edit_reader;
pub mod line_item_writer;
