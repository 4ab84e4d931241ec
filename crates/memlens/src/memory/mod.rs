mod dump;
mod view;

pub use dump::{MemoryDump, hex_dump_lines, printable};
pub use view::MemoryView;

pub(crate) use view::string_to_latin1;
