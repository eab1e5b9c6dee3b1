//! Pattern emission: `isa` plus one entry per constrained slot.

use actr_types::model::Pattern;

use crate::value::encode_item;
use crate::writer::{KeyValueList, ScriptWriter};

/// Build the entries for a pattern.
///
/// Wildcard items contribute nothing; a slot with several items yields one
/// entry per item under the same key.
pub fn pattern_entries(pattern: &Pattern) -> KeyValueList {
    let mut items = KeyValueList::new();
    items.add("isa", pattern.chunk.name.as_str());

    for (slot_name, slot) in pattern.named_slots() {
        for item in &slot.items {
            if let Some(value) = encode_item(item) {
                items.add(slot_name, value);
            }
        }
    }
    items
}

/// Write a pattern at the given tab depth.
pub fn emit_pattern(pattern: &Pattern, tabs: usize, w: &mut ScriptWriter) {
    w.tab_write(tabs, &pattern_entries(pattern));
}
