//! Script assembler.
//!
//! Writes the whole pyactr script for a model in one pass. See the crate
//! docs for the section order.

use actr_types::model::{Model, Pattern, Production};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{CodegenError, CodegenResult};
use crate::matches::emit_match;
use crate::pattern::emit_pattern;
use crate::stmt::emit_statements;
use crate::value::format_float;
use crate::writer::ScriptWriter;

const GOAL_BUFFER: &str = "goal";
const MEMORY_ALIAS: &str = "dm";

/// Per-run inputs that are not part of the model.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Caller-supplied initial goal. Takes precedence over any model
    /// initializer targeting the goal buffer.
    pub initial_goal: Option<Pattern>,
    /// Timestamp written into the header.
    pub generated_at: NaiveDateTime,
}

impl ScriptOptions {
    pub fn new() -> Self {
        Self {
            initial_goal: None,
            generated_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn with_initial_goal(mut self, goal: Option<Pattern>) -> Self {
        self.initial_goal = goal;
        self
    }
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Python identifier of the model object, e.g. `pyactr_Count`.
///
/// Every word of the model name is capitalised. Letters, digits and `_`
/// continue a word; anything else separates words, so `count-from` gives
/// `pyactr_Count-From`.
pub fn class_name(model: &Model) -> String {
    let mut title = String::with_capacity(model.name.len());
    let mut word_start = true;
    for c in model.name.chars() {
        if word_start {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        word_start = !(c.is_alphanumeric() || c == '_');
    }
    format!("pyactr_{title}")
}

/// Generate the complete script for `model`.
pub fn generate(model: &Model, options: &ScriptOptions) -> CodegenResult<String> {
    if model.name.is_empty() {
        return Err(CodegenError::MissingModelName);
    }

    let mut assembler = Assembler {
        model,
        options,
        class_name: class_name(model),
        w: ScriptWriter::new(),
    };
    assembler.assemble()?;

    let script = assembler.w.into_contents();
    debug!(model = %model.name, bytes = script.len(), "generated pyactr script");
    Ok(script)
}

// ══════════════════════════════════════════════════════════════════════════════
// Assembler
// ══════════════════════════════════════════════════════════════════════════════

struct Assembler<'a> {
    model: &'a Model,
    options: &'a ScriptOptions,
    class_name: String,
    w: ScriptWriter,
}

impl Assembler<'_> {
    fn assemble(&mut self) -> CodegenResult<()> {
        self.emit_header();
        self.emit_constructor();
        self.emit_chunk_types();
        self.emit_aliases();
        self.emit_initial_goal();
        self.emit_imaginal();
        self.emit_initializers();
        let model = self.model;
        for production in &model.productions {
            self.emit_production(production)?;
        }
        self.emit_harness();
        Ok(())
    }

    fn emit_header(&mut self) {
        self.w.writeln(format!(
            "# This file is generated by actr-compiler {} {}",
            env!("CARGO_PKG_VERSION"),
            self.options.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        self.w.blank();
        self.w
            .writeln("# *** This is a generated file. Any changes may be overwritten.");
        self.w.blank();
        let model = self.model;
        let description = &model.description;
        self.emit_comment(description);
        if description.is_empty() {
            self.w.writeln("# ");
        }
        self.w.blank();

        self.w.writeln("import pyactr as actr");
        self.w.blank();
    }

    /// One `# ` line per line of `text`.
    fn emit_comment(&mut self, text: &str) {
        for line in text.lines() {
            self.w.writeln(format!("# {line}"));
        }
    }

    fn emit_constructor(&mut self) {
        let memory = &self.model.memory;
        let mut args = vec!["subsymbolic=True".to_string()];
        if let Some(latency) = memory.latency {
            args.push(format!("latency_factor={}", format_float(latency)));
        }
        if let Some(threshold) = memory.threshold {
            args.push(format!("retrieval_threshold={}", format_float(threshold)));
        }

        self.w.writeln(format!(
            "{} = actr.ACTRModel({})",
            self.class_name,
            args.join(", ")
        ));
        self.w.blank();
    }

    fn emit_chunk_types(&mut self) {
        for chunk in self.model.chunks.iter().filter(|c| !c.is_internal()) {
            self.w.writeln(format!(
                "actr.chunktype('{}', '{}')",
                chunk.name,
                chunk.slot_names.join(", ")
            ));
        }
        self.w.blank();
    }

    fn emit_aliases(&mut self) {
        self.w
            .writeln(format!("{MEMORY_ALIAS} = {}.decmem", self.class_name));
        self.w.writeln(format!(
            "{GOAL_BUFFER} = {}.set_goal('{GOAL_BUFFER}')",
            self.class_name
        ));
        self.w.blank();
    }

    fn emit_initial_goal(&mut self) {
        let Some(goal) = &self.options.initial_goal else {
            return;
        };
        self.w.writeln("initial_goal = actr.chunkstring(string='''");
        emit_pattern(goal, 1, &mut self.w);
        self.w.writeln("''')");
        self.w.writeln(format!("{GOAL_BUFFER}.add(initial_goal)"));
        self.w.blank();
    }

    fn emit_imaginal(&mut self) {
        let Some(delay) = self.model.imaginal().and_then(|b| b.imaginal_delay()) else {
            return;
        };
        self.w.writeln(format!(
            "imaginal = {}.set_goal(name=\"imaginal\", delay={})",
            self.class_name,
            format_float(delay)
        ));
        self.w.blank();
    }

    fn emit_initializers(&mut self) {
        let has_goal = self.options.initial_goal.is_some();

        for init in &self.model.initializers {
            let target = init.buffer.as_deref().unwrap_or(MEMORY_ALIAS);
            if target == GOAL_BUFFER && has_goal {
                debug!("initial goal overrides the model's goal initializer");
                continue;
            }
            self.w
                .writeln(format!("{target}.add(actr.chunkstring(string='''"));
            emit_pattern(&init.pattern, 1, &mut self.w);
            self.w.writeln("'''))");
        }
        self.w.blank();
    }

    fn emit_production(&mut self, production: &Production) -> CodegenResult<()> {
        if let Some(description) = &production.description {
            self.emit_comment(description);
        }
        self.w.writeln(format!(
            "{}.productionstring(name='{}', string='''",
            self.class_name, production.name
        ));
        for m in &production.matches {
            emit_match(m, &mut self.w)?;
        }
        self.w.writeln("\t==>");
        emit_statements(&production.statements, &mut self.w)?;
        self.w.write("''')\n\n");
        Ok(())
    }

    fn emit_harness(&mut self) {
        self.w.blank();
        self.w.writeln("if __name__ == '__main__':");
        self.w
            .writeln(format!("\tsim = {}.simulation()", self.class_name));
        self.w.writeln("\tsim.run()");
        self.w
            .writeln(format!("\tif {GOAL_BUFFER}.test_buffer('full') == True:"));
        self.w.writeln(format!(
            "\t\tprint( 'final goal: ' + str({GOAL_BUFFER}.pop()) )"
        ));
    }
}
