use opal_ir::{Instruction, InstructionKind, Priority};

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static GENERIC: Lazy<LanguageProfile> = Lazy::new(|| LanguageProfile::new("Generic"));

static C: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::new("C")
        .with_spelling(InstructionKind::Cos, "cosf")
        .with_spelling(InstructionKind::Sin, "sinf")
        .with_spelling(InstructionKind::Sqrt, "sqrtf")
        .with_spelling(InstructionKind::Pow, "powf")
        .with_spelling(InstructionKind::Pi, "M_PI")
        .with_spelling(InstructionKind::E, "M_E")
        .with_priority(InstructionKind::Pow, Priority::Function)
        .with_float_suffix("f")
        .with_statement_end(";")
});

static SWIFT: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::new("Swift")
        .with_spelling(InstructionKind::Pow, "pow")
        .with_spelling(InstructionKind::Pi, "Double.pi")
        .with_spelling(InstructionKind::E, "M_E")
        .with_priority(InstructionKind::Pow, Priority::Function)
});

static JAVASCRIPT: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::new("JavaScript")
        .with_spelling(InstructionKind::Cos, "Math.cos")
        .with_spelling(InstructionKind::Sin, "Math.sin")
        .with_spelling(InstructionKind::Sqrt, "Math.sqrt")
        .with_spelling(InstructionKind::Min, "Math.min")
        .with_spelling(InstructionKind::Max, "Math.max")
        .with_spelling(InstructionKind::Pow, "Math.pow")
        .with_spelling(InstructionKind::Pi, "Math.PI")
        .with_spelling(InstructionKind::E, "Math.E")
        .with_priority(InstructionKind::Pow, Priority::Function)
        .with_statement_end(";")
});

/// A rendering target: per-kind spelling and display-priority overrides on
/// top of the generic syntax. Kinds without an override keep their generic
/// spelling and evaluation priority.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub name: &'static str,
    spellings: FxHashMap<InstructionKind, &'static str>,
    priorities: FxHashMap<InstructionKind, Priority>,
    /// Appended to literals with a fractional part.
    pub float_suffix: Option<&'static str>,
    /// Terminates rendered declaration lines.
    pub statement_end: &'static str,
}

impl LanguageProfile {
    pub fn new(name: &'static str) -> LanguageProfile {
        LanguageProfile {
            name,
            spellings: FxHashMap::default(),
            priorities: FxHashMap::default(),
            float_suffix: None,
            statement_end: "",
        }
    }

    pub fn with_spelling(mut self, kind: InstructionKind, spelling: &'static str) -> Self {
        self.spellings.insert(kind, spelling);
        self
    }

    pub fn with_priority(mut self, kind: InstructionKind, priority: Priority) -> Self {
        self.priorities.insert(kind, priority);
        self
    }

    pub fn with_float_suffix(mut self, suffix: &'static str) -> Self {
        self.float_suffix = Some(suffix);
        self
    }

    pub fn with_statement_end(mut self, end: &'static str) -> Self {
        self.statement_end = end;
        self
    }

    pub fn generic() -> &'static LanguageProfile {
        &GENERIC
    }

    pub fn c() -> &'static LanguageProfile {
        &C
    }

    pub fn swift() -> &'static LanguageProfile {
        &SWIFT
    }

    pub fn javascript() -> &'static LanguageProfile {
        &JAVASCRIPT
    }

    /// Looks up a built-in profile, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static LanguageProfile> {
        match name.to_ascii_lowercase().as_str() {
            "generic" => Some(LanguageProfile::generic()),
            "c" => Some(LanguageProfile::c()),
            "swift" => Some(LanguageProfile::swift()),
            "javascript" | "js" => Some(LanguageProfile::javascript()),
            _ => None,
        }
    }

    pub fn spelling(&self, kind: InstructionKind) -> Option<&'static str> {
        self.spellings.get(&kind).copied().or_else(|| kind.symbol())
    }

    /// Display priority of `instruction` under this profile.
    pub fn priority(&self, instruction: &Instruction) -> Option<Priority> {
        self.priorities
            .get(&instruction.kind())
            .copied()
            .or_else(|| instruction.priority())
    }
}
