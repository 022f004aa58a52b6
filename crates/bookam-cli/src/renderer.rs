//! Markdown output for the terminal.
//!
//! Rich mode hands whole documents to termimad so tables, code blocks and
//! emphasis are styled; plain mode prints the markdown as is, which keeps
//! output stable for scripts and tests.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Green);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Cyan);
        skin.code_block.set_bg(Color::AnsiValue(236));
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.table.set_fg(Color::AnsiValue(244));
        Self { rich_enabled, skin }
    }

    /// Writes a markdown document to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if self.rich_enabled {
            write!(stdout, "{}", self.skin.term_text(markdown))
        } else {
            write!(stdout, "{markdown}")
        }
        .context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")
    }

    /// Renders each part followed by a blank line.
    pub fn render_all<I, S>(&self, parts: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let document: String = parts
            .into_iter()
            .map(|part| format!("{}\n", part.as_ref()))
            .collect();
        self.render(&document)
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert!(!TerminalRenderer::new(false).rich_enabled);
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
