//! Thin file collaborators.
//!
//! Deliberately minimal: reading/writing raw bytes, composed with
//! `parse`/`emit` for the common case of a file round-trip. No
//! string-literal sugar, no schema, no format negotiation.

use crate::emit::EmitConfig;
use crate::error::Error;
use crate::node::Node;
use std::fs;
use std::io;
use std::path::Path;

/// Reads `path` as raw bytes. Width conversion beyond `u8` is the caller's
/// responsibility (this crate does not guess a source's encoding).
pub fn read_source_file(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    fs::read(path)
}

pub fn write_source_file(path: impl AsRef<Path>, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

/// Reads `path` and parses it as 8-bit sdata source.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node, ParseFileError> {
    let source = read_source_file(path).map_err(ParseFileError::Io)?;
    crate::parse::parse::<u8>(&source).map_err(ParseFileError::Parse)
}

/// Emits `node` under `config` and writes it to `path` as 8-bit sdata text.
pub fn emit_to_file(
    node: &Node,
    config: &EmitConfig,
    path: impl AsRef<Path>,
) -> Result<(), EmitFileError> {
    let text = crate::emit::emit::<u8>(node, config).map_err(EmitFileError::Emit)?;
    write_source_file(path, &text).map_err(EmitFileError::Io)
}

#[derive(Debug, thiserror::Error)]
pub enum ParseFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EmitFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Emit(#[from] Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::EmitConfig;

    #[test]
    fn round_trips_through_a_temp_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("sdata-io-test-{}.sdata", std::process::id()));

        write_source_file(&path, b"r { x: 1 }").unwrap();
        let node = parse_file(&path).unwrap();
        assert!(node.is_sequence());
        assert_eq!(node.identifier(), "r");

        emit_to_file(&node, &EmitConfig::pretty(), &path).unwrap();
        let roundtripped = read_source_file(&path).unwrap();
        assert_eq!(roundtripped, b"r {\n  x: 1\n}");

        let _ = fs::remove_file(&path);
    }
}
