use crate::reader::Reader;
use crate::tag::{kind_of, tag};

use opal_errors::OpalError;
use opal_ir::{Directive, Function, Instruction, InstructionKind, Operation, Operator};

use thin_vec::ThinVec;

use std::f64::consts::{E, PI};

pub fn encode(operation: &Operation) -> Result<Vec<u8>, OpalError> {
    let mut bytes = Vec::with_capacity(operation.len());

    for instruction in operation {
        encode_instruction(instruction, &mut bytes)?;
    }

    Ok(bytes)
}

/// Number of bytes `instruction` occupies once encoded.
pub fn encoded_len(instruction: &Instruction) -> usize {
    match (instruction.kind(), instruction) {
        (InstructionKind::Constant, _) => 1 + std::mem::size_of::<f64>(),

        (InstructionKind::NamedVariable, Instruction::Variable(name))
        | (
            InstructionKind::SpriteVariable,
            Instruction::Directive(Directive::Variable(name)),
        ) => 2 + name.len(),

        _ => 1,
    }
}

fn encode_instruction(instruction: &Instruction, bytes: &mut Vec<u8>) -> Result<(), OpalError> {
    let kind = instruction.kind();

    bytes.push(tag(kind));

    match instruction {
        Instruction::Constant(value) if kind == InstructionKind::Constant => {
            bytes.extend(value.to_be_bytes());
        }

        Instruction::Variable(name) if kind == InstructionKind::NamedVariable => {
            encode_name(name, bytes)?
        }

        Instruction::Directive(Directive::Variable(name)) => encode_name(name, bytes)?,

        _ => {}
    }

    Ok(())
}

fn encode_name(name: &str, bytes: &mut Vec<u8>) -> Result<(), OpalError> {
    let len = u8::try_from(name.len()).map_err(|_| OpalError::Encode {
        content: format!("name of {} bytes, at most 255 fit", name.len()),
    })?;

    bytes.push(len);
    bytes.extend(name.as_bytes());

    Ok(())
}

/// Decodes bytecode from a foreign producer. Every read is bounds-checked;
/// stack balance is not, so evaluate the result with a checking evaluator.
pub fn decode(bytes: &[u8]) -> Result<Operation, OpalError> {
    let mut reader = Reader::new(bytes);
    let mut instructions = ThinVec::new();

    while !reader.end_of_stream() {
        let start = reader.position();
        let byte = reader.get_byte(start)?;

        let kind = kind_of(byte).ok_or_else(|| OpalError::unknown_tag(start, byte))?;

        instructions.push(decode_instruction(kind, start, &mut reader)?);
    }

    Ok(Operation::new(instructions))
}

fn decode_instruction(
    kind: InstructionKind,
    start: usize,
    reader: &mut Reader,
) -> Result<Instruction, OpalError> {
    Ok(match kind {
        InstructionKind::Constant => {
            Instruction::Constant(f64::from_be_bytes(reader.get_array(start)?))
        }
        InstructionKind::Pi => Instruction::Constant(PI),
        InstructionKind::E => Instruction::Constant(E),

        InstructionKind::Variable => Instruction::positional(),
        InstructionKind::NamedVariable => Instruction::Variable(decode_name(start, reader)?),

        InstructionKind::Add => Instruction::Operator(Operator::Add),
        InstructionKind::Subtract => Instruction::Operator(Operator::Subtract),
        InstructionKind::Multiply => Instruction::Operator(Operator::Multiply),
        InstructionKind::Divide => Instruction::Operator(Operator::Divide),
        InstructionKind::Pow => Instruction::Operator(Operator::Pow),

        InstructionKind::Negative => Instruction::Negative,

        InstructionKind::Cos => Instruction::Function(Function::Cos),
        InstructionKind::Sin => Instruction::Function(Function::Sin),
        InstructionKind::Sqrt => Instruction::Function(Function::Sqrt),
        InstructionKind::Min => Instruction::Function(Function::Min),
        InstructionKind::Max => Instruction::Function(Function::Max),
        InstructionKind::Zoom => Instruction::Function(Function::Zoom),

        InstructionKind::SpriteVariable => {
            Instruction::Directive(Directive::Variable(decode_name(start, reader)?))
        }
        InstructionKind::SpriteDirection => Instruction::Directive(Directive::Direction),
        InstructionKind::SpriteAnimation => Instruction::Directive(Directive::Animation),
        InstructionKind::SpriteHitboxTop => Instruction::Directive(Directive::HitboxTop),
    })
}

fn decode_name(start: usize, reader: &mut Reader) -> Result<String, OpalError> {
    let len = reader.get_byte(start)? as usize;
    let bytes = reader.get_bytes(start, len)?;

    String::from_utf8(bytes.to_vec())
        .map_err(|error| OpalError::decode(start, format!("invalid name: {}", error)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_constants_take_one_byte() {
        let op: Operation = [
            Instruction::Constant(PI),
            Instruction::Constant(E),
            Instruction::positional(),
            Instruction::Operator(Operator::Pow),
        ]
        .into_iter()
        .collect();

        assert_eq!(encode(&op), Ok(b"pex^".to_vec()));
    }

    #[test]
    fn constants_carry_big_endian_payloads() {
        let op: Operation = [Instruction::Constant(2.0), Instruction::Negative]
            .into_iter()
            .collect();

        let bytes = encode(&op).unwrap();

        assert_eq!(bytes, [b'#', 0x40, 0, 0, 0, 0, 0, 0, 0, b'~']);
        assert_eq!(decode(&bytes), Ok(op));
    }

    #[test]
    fn names_are_length_prefixed() {
        let op: Operation = [
            Instruction::variable("hp"),
            Instruction::Directive(Directive::Variable("Angle".to_owned())),
        ]
        .into_iter()
        .collect();

        let bytes = encode(&op).unwrap();

        assert_eq!(bytes, b"v\x02hpV\x05Angle");
        assert_eq!(decode(&bytes), Ok(op));
    }

    #[test]
    fn long_names_are_refused() {
        let op: Operation = [Instruction::variable(&"n".repeat(256))]
            .into_iter()
            .collect();

        assert!(matches!(encode(&op), Err(OpalError::Encode { .. })));
    }

    #[test]
    fn encoded_len_agrees_with_encode() {
        let instructions = [
            Instruction::Constant(0.25),
            Instruction::Constant(PI),
            Instruction::positional(),
            Instruction::variable("speed"),
            Instruction::Function(Function::Min),
            Instruction::Directive(Directive::Variable("Angle".to_owned())),
        ];

        for instruction in instructions {
            let len = encoded_len(&instruction);
            let op: Operation = [instruction].into_iter().collect();

            assert_eq!(encode(&op).unwrap().len(), len);
        }
    }

    #[test]
    fn unknown_tags_are_fatal() {
        assert_eq!(decode(b"x2+"), Err(OpalError::unknown_tag(1, b'2')));
    }

    #[test]
    fn truncated_payloads_are_fatal() {
        assert_eq!(
            decode(&[b'x', b'#', 0x40, 0]),
            Err(OpalError::truncated(1, 8, 2))
        );
        assert_eq!(decode(b"V\x09Ang"), Err(OpalError::truncated(0, 9, 3)));
        assert_eq!(decode(b"xv"), Err(OpalError::truncated(1, 1, 0)));
    }

    #[test]
    fn names_must_be_utf8() {
        assert!(matches!(
            decode(&[b'v', 1, 0xff]),
            Err(OpalError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn empty_input_is_an_empty_operation() {
        assert_eq!(decode(&[]), Ok(Operation::default()));
    }

    #[test]
    fn decoding_does_not_check_balance() {
        let op = decode(b"+").unwrap();

        assert_eq!(op.len(), 1);
        assert!(op.validate().is_err());
    }
}
