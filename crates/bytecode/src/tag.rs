use opal_ir::InstructionKind;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static KINDS: Lazy<FxHashMap<u8, InstructionKind>> = Lazy::new(|| {
    InstructionKind::ALL
        .iter()
        .map(|kind| (tag(*kind), *kind))
        .collect()
});

/// The tag byte of an instruction kind.
pub fn tag(kind: InstructionKind) -> u8 {
    match kind {
        InstructionKind::Add => b'+',
        InstructionKind::Subtract => b'-',
        InstructionKind::Multiply => b'*',
        InstructionKind::Divide => b'/',
        InstructionKind::Pow => b'^',
        InstructionKind::Negative => b'~',

        InstructionKind::Constant => b'#',
        InstructionKind::Pi => b'p',
        InstructionKind::E => b'e',
        InstructionKind::Variable => b'x',
        InstructionKind::NamedVariable => b'v',

        InstructionKind::Min => b'm',
        InstructionKind::Max => b'M',
        InstructionKind::Cos => b'c',
        InstructionKind::Sin => b's',
        InstructionKind::Sqrt => b'r',
        InstructionKind::Zoom => b'z',

        InstructionKind::SpriteVariable => b'V',
        InstructionKind::SpriteDirection => b'D',
        InstructionKind::SpriteAnimation => b'A',
        InstructionKind::SpriteHitboxTop => b'H',
    }
}

/// The instruction kind a tag byte stands for.
pub fn kind_of(tag: u8) -> Option<InstructionKind> {
    KINDS.get(&tag).copied()
}
