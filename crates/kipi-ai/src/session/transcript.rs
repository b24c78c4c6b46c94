//! Plain-text transcript export.

use chrono::{DateTime, Local};

use crate::conversation::Turn;

pub const DEFAULT_EXPORT_PREFIX: &str = "kipi_chat";

/// A formatted conversation ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Suggested file name.
    pub name: String,
    pub body: String,
}

impl Transcript {
    /// True when the conversation had no turns.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Render turns as `**Label**: content` blocks separated by blank lines.
pub fn format_turns<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
    turns
        .into_iter()
        .map(|turn| format!("**{}**: {}\n\n", turn.role.label(), turn.content))
        .collect()
}

/// `<prefix>_YYYYmmdd_HHMMSS.txt`
pub fn timestamped_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Reduce a caller-supplied name to a bare file name, adding `.txt` when
/// it has no extension.
///
/// Any directory part is dropped so the result always stays inside the
/// export directory. Returns `None` when nothing usable is left.
pub fn normalize_name(name: &str) -> Option<String> {
    let base = name.trim().rsplit(['/', '\\']).next()?.trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    if std::path::Path::new(base).extension().is_some() {
        Some(base.to_string())
    } else {
        Some(format!("{base}.txt"))
    }
}
