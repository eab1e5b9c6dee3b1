//! Removal of pyactr's "no GUI" warning from captured output.
//!
//! When tkinter is unavailable pyactr prints a multi-line `UserWarning`
//! ending in the `warnings.warn(...)` source line below. Only this module
//! knows the literal; update it here if pyactr changes the message.

use std::sync::LazyLock;

use regex::Regex;

static GUI_WARNING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s).+warnings\.warn\("Simulation GUI is set to False\."\)(.+)"#)
        .expect("GUI warning pattern is valid")
});

/// Strip the GUI warning banner and everything before it.
///
/// If the banner matches exactly once the trimmed remainder is returned;
/// otherwise `text` comes back unchanged.
pub fn strip_gui_warning(text: &str) -> String {
    let mut matches = GUI_WARNING.captures_iter(text);
    match (matches.next(), matches.next()) {
        (Some(caps), None) => caps[1].trim().to_string(),
        _ => text.to_string(),
    }
}
