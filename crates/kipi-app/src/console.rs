//! Terminal output for display updates.

use std::io::{self, Write};

use kipi_ai::DisplayUpdate;

/// Erases one cell to the left.
const ERASE_ONE: &str = "\u{8} \u{8}";

/// Applies a reply's display updates to a terminal stream.
///
/// Each partial update is the full prefix plus a cursor marker; only the
/// newly revealed characters are written, and the previous marker is
/// erased first.
pub struct ConsoleView<W: Write> {
    out: W,
    shown_chars: usize,
    marker_visible: bool,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_chars: 0,
            marker_visible: false,
        }
    }

    pub fn apply(&mut self, update: &DisplayUpdate) -> io::Result<()> {
        if self.marker_visible {
            self.out.write_all(ERASE_ONE.as_bytes())?;
            self.marker_visible = false;
        }

        let (body, marker) = if update.is_final {
            (update.text.as_str(), None)
        } else {
            let mut chars = update.text.chars();
            let marker = chars.next_back();
            (chars.as_str(), marker)
        };

        let fresh: String = body.chars().skip(self.shown_chars).collect();
        self.out.write_all(fresh.as_bytes())?;
        self.shown_chars += fresh.chars().count();

        match marker {
            Some(m) => {
                let mut buf = [0u8; 4];
                self.out.write_all(m.encode_utf8(&mut buf).as_bytes())?;
                self.marker_visible = true;
            }
            None => {
                self.out.write_all(b"\n")?;
                self.shown_chars = 0;
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
