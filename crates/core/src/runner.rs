use opal_bytecode::{decode, disassemble, encode};
use opal_codegen::{render, LanguageProfile};
use opal_errors::OpalError;
use opal_ir::Operation;
use opal_parser::{parse, parse_declarations};
use opal_vm::{evaluate, ExecutionContext, SpriteInstance, VirtualMachine};

use log::info;
use rustc_hash::FxHashMap;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header of bytecode files written by `compile`.
pub const MAGIC: [u8; 2] = [0x4F, 0x50];

pub fn eval(
    expression: &str,
    x: f64,
    variables: &FxHashMap<String, String>,
) -> Result<f64, OpalError> {
    let operation = parse(expression)?;

    let mut context = ExecutionContext::new(x).with_variables(variables);

    evaluate(&operation, &mut context)
}

/// Bytecode file contents for `expression`: the magic header followed by the
/// encoded operation.
pub fn compile(expression: &str) -> Result<Vec<u8>, OpalError> {
    let operation = parse(expression)?;

    let mut bytes = MAGIC.to_vec();
    bytes.extend(encode(&operation)?);

    Ok(bytes)
}

pub fn load(bytes: &[u8]) -> Result<Operation, OpalError> {
    let Some(body) = bytes.strip_prefix(&MAGIC[..]) else {
        return Err(OpalError::decode(0, "invalid file magic number".to_owned()));
    };

    decode(body).map_err(|err| match err {
        OpalError::Decode { offset, content } => OpalError::Decode {
            offset: offset + MAGIC.len(),
            content,
        },
        err => err,
    })
}

pub fn render_expression(
    expression: &str,
    profile: &LanguageProfile,
) -> Result<String, OpalError> {
    render(&parse(expression)?, profile)
}

/// Runs a declaration file at `x = 0` against a fresh sprite, returning the
/// resulting sprite state followed by the program rendered in `profile`.
pub fn declare(text: &str, profile: &LanguageProfile) -> Result<String, OpalError> {
    let operation = parse_declarations(text)?;

    let mut sprite = SpriteInstance::new();
    let mut context = ExecutionContext::new(0.0).with_sprite(&mut sprite);

    VirtualMachine::new().run(&operation, &mut context)?;

    let rendered = render(&operation, profile)?;

    Ok(format!("{}\n{}", sprite, rendered))
}

fn invalid_data(file_path: &Path, err: OpalError) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}: {}", file_path.display(), err),
    )
}

pub fn compile_file(expression: &str, output_file_path: &Path) -> io::Result<()> {
    let bytes = compile(expression).map_err(|err| invalid_data(Path::new("<expression>"), err))?;

    let output_file = File::create(output_file_path)?;

    let mut writer = BufWriter::new(output_file);

    writer.write_all(&bytes)?;
    writer.flush()?;

    info!("wrote {} bytes to {}", bytes.len(), output_file_path.display());

    Ok(())
}

pub fn disassemble_file(file_path: &Path) -> io::Result<String> {
    let bytes = fs::read(file_path)?;

    let operation = load(&bytes).map_err(|err| invalid_data(file_path, err))?;

    Ok(disassemble(
        file_path.to_string_lossy().as_ref(),
        &operation,
    ))
}

pub fn declare_file(file_path: &Path, profile: &LanguageProfile) -> io::Result<String> {
    let text = fs::read_to_string(file_path)?;

    declare(&text, profile).map_err(|err| invalid_data(file_path, err))
}
