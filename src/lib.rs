mod classifier;
mod error;
mod headers;
mod mmap;
mod prefetch;
mod reader;
mod records;
mod scan;
mod utils;

pub use classifier::simd_instructions;
pub use error::{Error, Result};
pub use mmap::MappedView;
pub use reader::{Format, Reader};
pub use records::Row;
pub use utils::{parse_number, unquoted};
