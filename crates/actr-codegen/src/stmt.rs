//! Production action emission.

use actr_types::model::{SetContents, SetStatement, Statement};

use crate::error::{CodegenError, CodegenResult};
use crate::matches::RETRIEVAL_BUFFER;
use crate::pattern::emit_pattern;
use crate::value::encode_value;
use crate::writer::{KeyValueList, ScriptWriter};

/// Write a slice of actions in order.
pub fn emit_statements(stmts: &[Statement], w: &mut ScriptWriter) -> CodegenResult<()> {
    for stmt in stmts {
        emit_statement(stmt, w)?;
    }
    Ok(())
}

/// Write a single action.
pub fn emit_statement(stmt: &Statement, w: &mut ScriptWriter) -> CodegenResult<()> {
    match stmt {
        Statement::Set(set) => emit_set(set, w),
        Statement::Recall(recall) => {
            w.writeln(format!("\t+{RETRIEVAL_BUFFER}>"));
            emit_pattern(&recall.pattern, 2, w);
            Ok(())
        }
        Statement::Clear(clear) => {
            for name in &clear.buffer_names {
                w.writeln(format!("\t~{name}>"));
            }
            Ok(())
        }
    }
}

fn emit_set(set: &SetStatement, w: &mut ScriptWriter) -> CodegenResult<()> {
    let Some(contents) = &set.contents else {
        return Err(CodegenError::Unsupported(format!(
            "set on '{}' without slot values or a pattern",
            set.buffer
        )));
    };

    w.writeln(format!("\t={}>", set.buffer));
    match contents {
        SetContents::Slots { chunk, slots } => {
            let mut items = KeyValueList::new();
            items.add("isa", chunk.name.as_str());
            for slot in slots {
                items.add(slot.name.as_str(), encode_value(&slot.value));
            }
            w.tab_write(2, &items);
        }
        SetContents::Pattern(pattern) => emit_pattern(pattern, 2, w),
    }
    Ok(())
}
