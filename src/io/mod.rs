mod byte_reader;
mod reader;
mod sequential;

pub use byte_reader::{ByteReader, Charset};
pub(crate) use byte_reader::decode_string;
pub use reader::{ByteOrder, BytesReader, RandomReader};
pub use sequential::SequentialByteReader;
