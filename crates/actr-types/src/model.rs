//! Model description handed to the code generator.
//!
//! A [`Model`] is built once upstream and only read afterwards. Declaration
//! order is preserved everywhere: generated output follows model order.
//! Patterns share their chunk definition through [`Arc`].

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Variable name that matches anything and binds nothing.
pub const WILDCARD: &str = "?";

/// Sigil that introduces a variable in chunk literals.
pub const VAR_SIGIL: char = '?';

/// Name of the internal chunk used to query buffer and retrieval state.
pub const STATUS_CHUNK: &str = "_status";

// ══════════════════════════════════════════════════════════════════════════════
// Model
// ══════════════════════════════════════════════════════════════════════════════

/// A complete model: buffers, memory, chunk types, initial contents and
/// productions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: String,
    pub description: String,
    pub buffers: Vec<Buffer>,
    pub memory: Memory,
    pub chunks: Vec<Arc<Chunk>>,
    pub initializers: Vec<Initializer>,
    pub productions: Vec<Production>,
}

impl Model {
    /// Create an empty model with the standard `goal` and `retrieval`
    /// buffers and the internal `_status` chunk.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffers: vec![Buffer::new("goal"), Buffer::new("retrieval")],
            chunks: vec![Arc::new(Chunk::status())],
            ..Self::default()
        }
    }

    /// Look up a buffer by name.
    pub fn lookup_buffer(&self, name: &str) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.name == name)
    }

    /// Look up a chunk type by name.
    pub fn lookup_chunk(&self, name: &str) -> Option<&Arc<Chunk>> {
        self.chunks.iter().find(|c| c.name == name)
    }

    /// The imaginal buffer, if the model declares one.
    pub fn imaginal(&self) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.imaginal_delay().is_some())
    }

    pub fn has_imaginal(&self) -> bool {
        self.imaginal().is_some()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Buffers & Memory
// ══════════════════════════════════════════════════════════════════════════════

/// What a buffer is used for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferKind {
    Standard,
    /// The imaginal buffer, with its creation delay in seconds.
    Imaginal { delay: f64 },
}

/// A named holder of at most one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    pub name: String,
    pub kind: BufferKind,
}

impl Buffer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BufferKind::Standard,
        }
    }

    pub fn imaginal(delay: f64) -> Self {
        Self {
            name: "imaginal".to_string(),
            kind: BufferKind::Imaginal { delay },
        }
    }

    pub fn imaginal_delay(&self) -> Option<f64> {
        match self.kind {
            BufferKind::Imaginal { delay } => Some(delay),
            BufferKind::Standard => None,
        }
    }
}

/// Declarative memory configuration.
///
/// `None` means the parameter was not given and is omitted from generated
/// output; it is not the same as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Memory {
    pub latency: Option<f64>,
    pub threshold: Option<f64>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Chunks & Patterns
// ══════════════════════════════════════════════════════════════════════════════

/// A chunk type: a name and its ordered slot names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub slot_names: Vec<String>,
}

impl Chunk {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        slot_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            slot_names: slot_names.into_iter().map(Into::into).collect(),
        }
    }

    /// The internal `_status` chunk with its single `status` slot.
    pub fn status() -> Self {
        Self::new(STATUS_CHUNK, ["status"])
    }

    /// Internal chunks are never declared to the runtime.
    pub fn is_internal(&self) -> bool {
        is_internal_chunk_name(&self.name)
    }

    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }
}

pub fn is_internal_chunk_name(name: &str) -> bool {
    name.starts_with('_')
}

/// A pattern was built with the wrong number of slots for its chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chunk '{chunk}' expects {expected} slots, found {found}")]
pub struct SlotCountMismatch {
    pub chunk: String,
    pub expected: usize,
    pub found: usize,
}

/// A chunk-shaped pattern: one [`PatternSlot`] per chunk slot, positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub chunk: Arc<Chunk>,
    pub slots: Vec<PatternSlot>,
}

impl Pattern {
    pub fn new(chunk: Arc<Chunk>, slots: Vec<PatternSlot>) -> Result<Self, SlotCountMismatch> {
        if slots.len() != chunk.slot_count() {
            return Err(SlotCountMismatch {
                chunk: chunk.name.clone(),
                expected: chunk.slot_count(),
                found: slots.len(),
            });
        }
        Ok(Self { chunk, slots })
    }

    /// Pairs of (slot name, slot) in declaration order.
    pub fn named_slots(&self) -> impl Iterator<Item = (&str, &PatternSlot)> {
        self.chunk
            .slot_names
            .iter()
            .map(String::as_str)
            .zip(self.slots.iter())
    }

    pub fn is_internal(&self) -> bool {
        self.chunk.is_internal()
    }
}

/// One slot of a pattern. Several items express conjunctive constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternSlot {
    pub items: Vec<Item>,
}

impl PatternSlot {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn single(item: Item) -> Self {
        Self { items: vec![item] }
    }
}

/// Raw source form of the slot, e.g. `full` or `!nil ?x`.
impl fmt::Display for PatternSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// A single constraint inside a pattern slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub negated: bool,
    pub value: ItemValue,
}

/// The literal carried by an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValue {
    Nil,
    /// An identifier (rendered quoted in generated code).
    Id(String),
    /// A number, stored as its exact source text.
    Num(String),
    /// A variable including its sigil, e.g. `?count`. [`WILDCARD`] is `?`.
    Var(String),
}

impl Item {
    pub fn new(value: ItemValue) -> Self {
        Self {
            negated: false,
            value,
        }
    }

    pub fn nil() -> Self {
        Self::new(ItemValue::Nil)
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::new(ItemValue::Id(id.into()))
    }

    pub fn num(text: impl Into<String>) -> Self {
        Self::new(ItemValue::Num(text.into()))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(ItemValue::Var(name.into()))
    }

    pub fn wildcard() -> Self {
        Self::var(WILDCARD)
    }

    /// Return this item with its negation flag set.
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(&self.value, ItemValue::Var(v) if v == WILDCARD)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        match &self.value {
            ItemValue::Nil => write!(f, "nil"),
            ItemValue::Id(s) | ItemValue::Num(s) | ItemValue::Var(s) => write!(f, "{s}"),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Initializers & Productions
// ══════════════════════════════════════════════════════════════════════════════

/// Initial content for a buffer, or for declarative memory when `buffer`
/// is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    pub buffer: Option<String>,
    pub pattern: Pattern,
}

/// A condition/action rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    pub name: String,
    pub description: Option<String>,
    pub matches: Vec<Match>,
    pub statements: Vec<Statement>,
}

/// Where a match looks for its chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTarget {
    Buffer(String),
    /// Declarative memory, seen through the retrieval buffer.
    Memory,
}

/// A production condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub target: MatchTarget,
    pub pattern: Pattern,
}

/// A production action.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Set(SetStatement),
    Recall(RecallStatement),
    Clear(ClearStatement),
}

/// `set`: write into a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SetStatement {
    pub buffer: String,
    /// `None` when the source form has no pyactr counterpart.
    pub contents: Option<SetContents>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetContents {
    /// Explicit slot assignments on the buffer's current chunk type.
    Slots { chunk: Arc<Chunk>, slots: Vec<SetSlot> },
    /// A whole replacement pattern.
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSlot {
    pub name: String,
    pub value: Value,
}

/// Right-hand side of a slot assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Var(String),
    Number(String),
    Str(String),
}

/// `recall`: issue a retrieval request against declarative memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallStatement {
    pub pattern: Pattern,
}

/// `clear`: detach the chunks held by the named buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearStatement {
    pub buffer_names: Vec<String>,
}
