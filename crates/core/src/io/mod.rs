//! Collaborators for reading input tables and writing structural input files

mod csv_table;
mod teddy;

pub use csv_table::{read_load_cases, read_table, read_table_from_reader, read_target_nodes};
pub use teddy::{teddy_file_name, write_teddy, write_teddy_file};
