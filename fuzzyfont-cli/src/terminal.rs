//! Line-oriented terminal console used by `--tui`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use fuzzyfont_core::catalog::FontRecord;
use fuzzyfont_core::category::Category;
use fuzzyfont_core::session::{Console, Notice};
use fuzzyfont_core::stats::FontStats;

use crate::render::{
    apply_color, write_filter_menu, write_font_table, write_notice, write_panel, write_stats_table,
    AnsiColor,
};

/// Console over any reader/writer pair; stdin/stdout in the binary, buffers in tests.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    color: bool,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
            clear_screen: color,
        }
    }

    /// Emit the clear-screen sequence even without colour (or suppress it with colour).
    pub fn clear_screen(mut self, yes: bool) -> Self {
        self.clear_screen = yes;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            self.output.write_all(b"\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    fn panel(&mut self, title: &str, lines: &[String]) -> Result<()> {
        write_panel(title, lines, &mut self.output, self.color)
    }

    fn font_table(&mut self, fonts: &[FontRecord], start: usize, limit: Option<usize>) -> Result<()> {
        write_font_table(fonts, start, limit, &mut self.output, self.color)
    }

    fn stats_table(&mut self, stats: &FontStats) -> Result<()> {
        write_stats_table(stats, &mut self.output, self.color)
    }

    fn filter_menu(&mut self, toggles: &[(Category, bool)]) -> Result<()> {
        write_filter_menu(toggles, &mut self.output, self.color)
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        write_notice(notice, &mut self.output, self.color)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", apply_color(prompt, self.color, AnsiColor::Cyan))?;
        self.output.flush()?;

        // Raw bytes: a stray non-UTF-8 line becomes an unknown command, not a fatal error.
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .context("reading interactive input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
