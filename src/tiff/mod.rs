mod handler;
mod reader;

pub use handler::{DirectoryStack, TiffHandler, TiffStandard};
pub use reader::{process_ifd, process_tiff, TagFormat, TiffContext, MAX_ENTRY_COUNT};
