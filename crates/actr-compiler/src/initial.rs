//! Caller-supplied initial buffer contents.

use std::collections::BTreeMap;

use actr_parser::parse_chunk;
use actr_types::model::{Model, Pattern};

use crate::error::{CompilerError, Result};

/// Buffer name → chunk literal text, e.g. `"goal" → "[countFrom: 2 5 starting]"`.
pub type InitialBuffers = BTreeMap<String, String>;

/// Buffer name → parsed pattern. Buffers whose text was empty are absent.
pub type ParsedInitialBuffers = BTreeMap<String, Pattern>;

/// Check every named buffer exists in `model` and parse its text.
pub fn parse_initial_buffers(
    model: &Model,
    initial_buffers: &InitialBuffers,
) -> Result<ParsedInitialBuffers> {
    let mut parsed = ParsedInitialBuffers::new();

    for (buffer_name, text) in initial_buffers {
        if model.lookup_buffer(buffer_name).is_none() {
            return Err(CompilerError::UnknownBuffer {
                buffer: buffer_name.clone(),
                model: model.name.clone(),
            });
        }

        let pattern = parse_chunk(model, text).map_err(|source| CompilerError::InitialBuffer {
            buffer: buffer_name.clone(),
            source,
        })?;

        if let Some(pattern) = pattern {
            parsed.insert(buffer_name.clone(), pattern);
        }
    }

    Ok(parsed)
}
