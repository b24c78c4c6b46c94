//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use kipi_ai::{SessionController, SessionState};
use kipi_common::KipiError;
use tracing::{debug, warn};

use crate::commands::{self, Command, HELP};
use crate::console::ConsoleView;
use crate::export::write_transcript;
use crate::settings::RuntimeSettings;

const MISSING_KEY_NOTICE: &str = "\
⚠️ No Gemini API key is set, so replies are demo text.
   Get a key at https://aistudio.google.com/ and then either
   - set it under [credentials] in config.toml,
   - export GEMINI_API_KEY (or put it in .env), or
   - type /key <your key>";

const OFFLINE_REMINDER: &str = "(demo mode: no API key set, /key <your key> to use Gemini)";

pub struct Repl<R, W> {
    controller: SessionController,
    state: SessionState,
    settings: RuntimeSettings,
    export_dir: PathBuf,
    show_stats: bool,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(controller: SessionController, settings: RuntimeSettings, input: R, out: W) -> Self {
        Self {
            controller,
            state: SessionState::new(),
            settings,
            export_dir: PathBuf::from("."),
            show_stats: false,
            input,
            out,
        }
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until `/quit` or end of input.
    pub async fn run(&mut self) -> Result<(), KipiError> {
        writeln!(self.out, "kipi: chat with Gemini (type /help for commands)")?;
        writeln!(self.out, "{}", self.settings.summary())?;
        if self.settings.is_offline() {
            writeln!(self.out, "{MISSING_KEY_NOTICE}")?;
        }

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let mut line = String::new();
            let read = tokio::task::block_in_place(|| self.input.read_line(&mut line))?;
            if read == 0 {
                writeln!(self.out)?;
                break;
            }

            match commands::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command).await?,
                Err(msg) => writeln!(self.out, "{msg}")?,
            }
        }

        debug!(session = %self.state.id().short(), "leaving REPL");
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Result<(), KipiError> {
        match command {
            Command::Chat(text) => self.chat(&text).await?,
            Command::Model(model) => match self.settings.set_model(&model) {
                Ok(()) => writeln!(self.out, "model set to {model}")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::Temperature(t) => match self.settings.set_temperature(t) {
                Ok(()) => writeln!(self.out, "temperature set to {t}")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::MaxTokens(n) => match self.settings.set_max_output_tokens(n) {
                Ok(()) => writeln!(self.out, "max output tokens set to {n}")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::Mode(mode) => {
                self.settings.set_output_mode(mode);
                writeln!(self.out, "output mode set to {mode}")?;
            }
            Command::Key(key) => {
                self.settings.set_credential(&key);
                if self.settings.is_offline() {
                    writeln!(self.out, "{MISSING_KEY_NOTICE}")?;
                } else {
                    writeln!(self.out, "API key set for this session")?;
                }
            }
            Command::Stats => {
                let stats = self.state.stats(&self.settings.generation);
                writeln!(self.out, "{stats}")?;
            }
            Command::Clear => match self.controller.clear(&mut self.state) {
                Ok(()) => writeln!(self.out, "🗑️ conversation cleared")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::Export(name) => self.export(name.as_deref())?,
            Command::Config => writeln!(self.out, "{}", self.settings.summary())?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit | Command::Empty => {}
        }
        Ok(())
    }

    async fn chat(&mut self, text: &str) -> Result<(), KipiError> {
        if self.settings.is_offline() {
            writeln!(self.out, "{OFFLINE_REMINDER}")?;
        }
        let mut view = ConsoleView::new(&mut self.out);
        let mut write_err = None;

        let result = self
            .controller
            .submit(
                &mut self.state,
                text,
                &self.settings.generation,
                &self.settings.credential,
                |update| {
                    if write_err.is_none() {
                        if let Err(e) = view.apply(update) {
                            write_err = Some(e);
                        }
                    }
                },
            )
            .await;
        drop(view);

        if let Some(e) = write_err {
            return Err(e.into());
        }

        match result {
            Ok(report) => {
                if let Some(kind) = report.error {
                    debug!(%kind, "turn completed with fallback reply");
                }
                if self.show_stats {
                    let stats = self.state.stats(&self.settings.generation);
                    writeln!(self.out, "{stats}")?;
                }
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    fn export(&mut self, name: Option<&str>) -> Result<(), KipiError> {
        let transcript = self.controller.export(&self.state, name);
        if transcript.is_empty() {
            writeln!(self.out, "Nothing to save yet.")?;
            return Ok(());
        }

        match write_transcript(&self.export_dir, &transcript) {
            Ok(path) => writeln!(self.out, "💾 saved {}", path.display())?,
            Err(e) => {
                warn!("export failed: {e}");
                writeln!(self.out, "could not save transcript: {e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use async_trait::async_trait;
    use kipi_ai::{CallResult, ModelClient, Role};
    use kipi_common::{GenerationConfig, OutputMode};

    struct Echo;

    #[async_trait]
    impl ModelClient for Echo {
        async fn generate(&self, prompt: &str, config: &GenerationConfig, _: &str) -> CallResult {
            CallResult::Success(format!("[{}] {prompt}", config.model))
        }
    }

    fn repl(script: &str) -> Repl<Cursor<Vec<u8>>, Vec<u8>> {
        let settings = RuntimeSettings::new(
            GenerationConfig {
                output_mode: OutputMode::Batch,
                ..Default::default()
            },
            "key",
        );
        Repl::new(
            SessionController::new(Echo),
            settings,
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn output(repl: &Repl<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&repl.out).into_owned()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn chat_turn_prints_reply_and_stores_pair() {
        let mut r = repl("hello\n/quit\n");
        r.run().await.unwrap();

        assert!(output(&r).contains("[gemini-2.5-flash] hello\n"));
        let turns = r.state().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn settings_change_applies_to_next_turn() {
        let mut r = repl("/model gemini-2.5-pro\nhi\n");
        r.run().await.unwrap();

        let out = output(&r);
        assert!(out.contains("model set to gemini-2.5-pro"));
        assert!(out.contains("[gemini-2.5-pro] hi"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_setting_is_reported_and_ignored() {
        let mut r = repl("/temperature 5\n/config\n");
        r.run().await.unwrap();

        let out = output(&r);
        assert!(out.contains("out of range"));
        assert!(out.contains("temperature: 0.7"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn clear_and_stats() {
        let mut r = repl("one\ntwo\n/stats\n/clear\n/stats\n");
        r.run().await.unwrap();

        let out = output(&r);
        assert!(out.contains("conversations: 2"));
        assert!(out.contains("conversation cleared"));
        assert!(out.contains("conversations: 0"));
        assert_eq!(r.state().message_count(), 0);
        assert_eq!(r.state().estimated_tokens(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_writes_transcript_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = repl("/export\nping\n/export session\n").with_export_dir(dir.path());
        r.run().await.unwrap();

        let out = output(&r);
        assert!(out.contains("Nothing to save yet."));
        let saved = std::fs::read_to_string(dir.path().join("session.txt")).unwrap();
        assert_eq!(saved, "**User**: ping\n\n**AI**: [gemini-2.5-flash] ping\n\n");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn placeholder_key_shows_missing_key_notice() {
        let mut r = repl("/key your-gemini-api-key-here\n");
        r.run().await.unwrap();
        let out = output(&r);
        assert!(out.contains("No Gemini API key is set"));
        assert!(!out.contains("API key set for this session"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_key_is_a_usage_error() {
        let mut r = repl("/key \n/key   x  \n");
        r.run().await.unwrap();
        let out = output(&r);
        assert!(out.contains("usage: /key <api key>"));
        assert!(!out.contains("No Gemini API key is set"));
        assert!(out.contains("API key set for this session"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_turns_are_preceded_by_reminder() {
        let mut r = repl("hello\n/key real-key\nagain\n");
        r.settings.set_credential("");
        r.run().await.unwrap();
        let out = output(&r);
        assert_eq!(out.matches(OFFLINE_REMINDER).count(), 1);
        let reminder = out.find(OFFLINE_REMINDER).unwrap();
        assert!(reminder < out.find("] hello").unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_name_cannot_escape_export_dir() {
        let root = tempfile::tempdir().unwrap();
        let exports = root.path().join("exports");
        let abs = root.path().join("abs");
        let script = format!("ping\n/export ../escaped\n/export {}\n", abs.display());
        let mut r = repl(&script).with_export_dir(&exports);
        r.run().await.unwrap();

        assert!(exports.join("escaped.txt").exists());
        assert!(exports.join("abs.txt").exists());
        assert!(!root.path().join("escaped.txt").exists());
        assert!(!root.path().join("abs.txt").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_command_does_not_stop_the_loop() {
        let mut r = repl("/dance\nstill here\n");
        r.run().await.unwrap();
        let out = output(&r);
        assert!(out.contains("unknown command /dance"));
        assert!(out.contains("still here"));
    }
}
