mod compress;
mod context;
mod error;
mod pdb;
mod report;

pub use pdb::reader::{Extraction, read as read_pdb_trace};

pub use report::reader::read as read_report;
pub use report::writer::{write_diagnostics, write_report};

pub use compress::{is_gzip_path, open_input};

pub use context::{IoContext, MAX_RESOLUTION, UNIPROT_DATABASE};

pub use error::Error;
