//! Response rendering.
//!
//! A finished reply is turned into a lazy sequence of [`DisplayUpdate`]s.
//! The sequence only describes *what* to show; *when* to show it is the
//! job of a [`Pacer`], which the session controller awaits between
//! updates.

use std::time::Duration;

use async_trait::async_trait;

use kipi_common::OutputMode;

pub const DEFAULT_CURSOR: char = '▌';

/// One frame of the reply as it should currently appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub text: String,
    /// Set on the last update, which carries the full text with no cursor.
    pub is_final: bool,
}

/// Stateless factory for render sequences.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    cursor: char,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            cursor: DEFAULT_CURSOR,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(mut self, cursor: char) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn render(&self, text: impl Into<String>, mode: OutputMode) -> RenderEvents {
        RenderEvents {
            text: text.into(),
            mode,
            cursor: self.cursor,
            revealed: 0,
            finished: false,
        }
    }
}

/// Lazy, finite sequence of display updates for one reply.
///
/// Incremental mode yields one update per character (prefix plus cursor)
/// and then the unmarked full text, `chars + 1` updates in total. Batch
/// mode yields the full text once.
#[derive(Debug)]
pub struct RenderEvents {
    text: String,
    mode: OutputMode,
    cursor: char,
    /// Byte offset of the revealed prefix.
    revealed: usize,
    finished: bool,
}

impl RenderEvents {
    fn final_update(&mut self) -> DisplayUpdate {
        self.finished = true;
        DisplayUpdate {
            text: self.text.clone(),
            is_final: true,
        }
    }

    fn remaining(&self) -> usize {
        if self.finished {
            return 0;
        }
        match self.mode {
            OutputMode::Batch => 1,
            OutputMode::Incremental => self.text[self.revealed..].chars().count() + 1,
        }
    }
}

impl Iterator for RenderEvents {
    type Item = DisplayUpdate;

    fn next(&mut self) -> Option<DisplayUpdate> {
        if self.finished {
            return None;
        }

        match self.mode {
            OutputMode::Batch => Some(self.final_update()),
            OutputMode::Incremental => {
                let next = self.text[self.revealed..].chars().next();
                match next {
                    Some(ch) => {
                        self.revealed += ch.len_utf8();
                        let mut shown =
                            String::with_capacity(self.revealed + self.cursor.len_utf8());
                        shown.push_str(&self.text[..self.revealed]);
                        shown.push(self.cursor);
                        Some(DisplayUpdate {
                            text: shown,
                            is_final: false,
                        })
                    }
                    None => Some(self.final_update()),
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RenderEvents {}

impl std::iter::FusedIterator for RenderEvents {}

/// Waits between display updates.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps a fixed interval between updates.
#[derive(Debug, Clone, Copy)]
pub struct FixedPacer {
    interval: Duration,
}

impl FixedPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Pacer for FixedPacer {
    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self) {}
}
