pub mod columns;
pub mod reader;
pub mod record;
