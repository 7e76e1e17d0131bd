use crate::codec::encoded_len;
use crate::tag::tag;

use opal_ir::Operation;

/// Listing of `operation` as it is laid out in bytecode: byte offset, tag and
/// instruction, one per line.
pub fn disassemble(name: &str, operation: &Operation) -> String {
    let mut disassembled = String::new();

    disassembled.push_str(format!("Disassembly of '{}'\n", name).as_str());

    let mut offset = 0;

    for instruction in operation {
        disassembled.push_str(
            format!(
                "\t{:04}  {}  {}\n",
                offset,
                tag(instruction.kind()) as char,
                instruction
            )
            .as_str(),
        );

        offset += encoded_len(instruction);
    }

    disassembled
}
