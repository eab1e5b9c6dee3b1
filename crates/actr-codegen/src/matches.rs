//! Production condition emission.
//!
//! ```text
//! =goal>            buffer holds a matching chunk
//! ?goal>            buffer state query (internal `_status` chunk)
//! =retrieval>       declarative memory retrieval result
//! ?retrieval>       retrieval state query
//! ```

use actr_types::model::{Match, MatchTarget, Pattern, STATUS_CHUNK};

use crate::error::{CodegenError, CodegenResult};
use crate::pattern::emit_pattern;
use crate::writer::{KeyValueList, ScriptWriter};

/// pyactr exposes declarative memory through this buffer.
pub const RETRIEVAL_BUFFER: &str = "retrieval";

/// Write one condition of a production.
pub fn emit_match(m: &Match, w: &mut ScriptWriter) -> CodegenResult<()> {
    let pattern = &m.pattern;

    match &m.target {
        MatchTarget::Buffer(buffer) => {
            if pattern.is_internal() {
                emit_status_query(buffer, "buffer", pattern, w)
            } else {
                w.writeln(format!("\t={buffer}>"));
                emit_pattern(pattern, 2, w);
                Ok(())
            }
        }
        MatchTarget::Memory => {
            if pattern.is_internal() {
                emit_status_query(RETRIEVAL_BUFFER, "state", pattern, w)
            } else {
                w.writeln(format!("\t={RETRIEVAL_BUFFER}>"));
                let mut items = KeyValueList::new();
                items.add("isa", pattern.chunk.name.as_str());
                w.tab_write(2, &items);
                Ok(())
            }
        }
    }
}

fn emit_status_query(
    buffer: &str,
    key: &str,
    pattern: &Pattern,
    w: &mut ScriptWriter,
) -> CodegenResult<()> {
    if pattern.chunk.name != STATUS_CHUNK {
        return Err(CodegenError::Unsupported(format!(
            "internal chunk '{}' in a condition on '{buffer}'",
            pattern.chunk.name
        )));
    }
    let [status] = pattern.slots.as_slice() else {
        return Err(CodegenError::Unsupported(format!(
            "status query on '{buffer}' must have exactly one slot"
        )));
    };

    w.writeln(format!("\t?{buffer}>"));
    let mut items = KeyValueList::new();
    items.add(key, status.to_string());
    w.tab_write(2, &items);
    Ok(())
}
