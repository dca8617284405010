mod csv;
mod script;

pub use self::csv::write_table_csv;
pub use self::script::ScriptWriter;
