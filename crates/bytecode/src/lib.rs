//! Compact binary form of an [`Operation`](opal_ir::Operation): one printable
//! tag byte per instruction, with payload bytes only for literal constants and
//! variable names.

mod codec;
mod disassembler;
mod reader;
mod tag;

pub use codec::{decode, encode, encoded_len};
pub use disassembler::disassemble;
pub use tag::{kind_of, tag};
