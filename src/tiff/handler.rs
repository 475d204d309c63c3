//! The handler contract the TIFF walker calls back into.
//!
//! The walker owns traversal; everything format-specific (which markers are
//! valid, which tags open sub-IFDs, which entries need custom decoding)
//! lives behind [`TiffHandler`]. Handlers are stateful; the walker holds no
//! per-handler state beyond the context it threads through the walk.

use crate::error::{DirectoryError, TiffError};
use crate::meta::{Directory, DirectoryKind, MetadataList, Value};

use super::reader::TiffContext;

/// Which TIFF dialect the marker selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffStandard {
    /// Classic TIFF: 16-bit entry counts, 32-bit offsets
    Tiff,
    /// BigTIFF: 64-bit entry counts and offsets
    BigTiff,
}

/// Callbacks driving one TIFF walk.
pub trait TiffHandler {
    /// Dispatch on the 16-bit marker following the byte-order mark.
    ///
    /// Implementations push the root directory as a side effect and return
    /// the standard the rest of the walk uses. Unknown markers fail the
    /// walk.
    fn process_tiff_marker(&mut self, marker: u16) -> Result<TiffStandard, TiffError>;

    /// Whether `tag` opens a sub-IFD from the current directory.
    ///
    /// Only consulted for pointer-sized entries. Returning `true` pushes
    /// the sub-directory; the walker then recurses at the pointed-to
    /// offset and the directory is popped by [`ending_ifd`](Self::ending_ifd).
    fn try_enter_sub_ifd(&mut self, tag: u16) -> bool;

    /// Whether the IFD that just ended is followed by another in the chain.
    ///
    /// Returning `true` pushes the follower's directory.
    fn has_follower_ifd(&mut self) -> bool;

    /// Take over processing of one entry.
    ///
    /// Returning `Ok(true)` means the handler consumed the entry and the
    /// walker stores nothing. Errors are recorded on the current directory
    /// and do not abort sibling entries.
    fn custom_process_tag(
        &mut self,
        ctx: &mut TiffContext<'_>,
        tag: u16,
        value_offset: u64,
        byte_count: usize,
    ) -> Result<bool, TiffError>;

    /// Byte count for entries whose format code falls outside the standard
    /// table (or needs overriding). `None` defers to the standard table.
    fn custom_format_byte_count(&mut self, tag: u16, format: u16, count: u64) -> Option<u64>;

    /// Called after all entries of an IFD are processed.
    ///
    /// This is where the current directory is popped; handlers may run
    /// finish-up work (GeoTIFF unpacking) against it first.
    fn ending_ifd(&mut self, ctx: &mut TiffContext<'_>);

    /// Store a decoded value into the current directory.
    fn set_tag(&mut self, tag: u16, value: Value);

    /// Push a new current directory.
    fn push_directory(&mut self, kind: DirectoryKind);

    /// Record an error on the current directory.
    fn error(&mut self, error: DirectoryError);
}

// =============================================================================
// DirectoryStack
// =============================================================================

/// Shared handler base: a stack of in-progress directories over the list of
/// all directories produced so far.
///
/// The top of the stack is the "current" directory; tag operations target
/// it. Directories accumulate into the output list in push order and a
/// pushed directory's parent is whatever was current at push time.
#[derive(Debug, Default)]
pub struct DirectoryStack {
    directories: Vec<Directory>,
    stack: Vec<usize>,
}

impl DirectoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DirectoryKind) {
        let parent = self.stack.last().copied();
        let index = self.directories.len();
        self.directories.push(Directory::with_parent(kind, parent));
        self.stack.push(index);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn current(&self) -> Option<&Directory> {
        self.stack.last().map(|&i| &self.directories[i])
    }

    pub fn current_mut(&mut self) -> Option<&mut Directory> {
        let index = *self.stack.last()?;
        Some(&mut self.directories[index])
    }

    pub fn current_kind(&self) -> Option<DirectoryKind> {
        self.current().map(Directory::kind)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    /// First directory of the given kind, in push order.
    pub fn first_of_kind(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories.iter().find(|d| d.kind() == kind)
    }

    /// Attach an externally produced directory with the current directory
    /// as its parent.
    pub fn attach(&mut self, mut directory: Directory) {
        directory.set_parent(self.current_index());
        self.directories.push(directory);
    }

    pub fn attach_all(&mut self, directories: Vec<Directory>) {
        for directory in directories {
            self.attach(directory);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Record an error on the current directory, falling back to the most
    /// recently pushed one when the stack has already unwound.
    pub fn record_error(&mut self, error: DirectoryError) {
        if let Some(directory) = self.current_mut() {
            directory.add_error(error);
        } else if let Some(directory) = self.directories.last_mut() {
            directory.add_error(error);
        }
    }

    pub fn into_list(self) -> MetadataList {
        MetadataList::new(self.directories)
    }
}
