//! Fixed-layout vendor decoders.
//!
//! Unlike the IFD-style makernotes, these blocks are sequences of reads at
//! well-known offsets into directory tags keyed by those offsets.

pub mod kodak;
pub mod panasonic_raw;
pub mod printim;
pub mod reconyx;
