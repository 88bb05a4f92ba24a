use anyhow::Result;
use std::io::Write;

pub trait Messenger {
    fn send(&mut self, message: &str) -> Result<()>;

    /// Shown before reading the next command. Non-interactive sinks skip it.
    fn prompt(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

pub struct TerminalMessenger<W: Write> {
    out: W,
    interactive: bool,
}

impl<W: Write> TerminalMessenger<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Messenger for TerminalMessenger<W> {
    fn send(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        if self.interactive {
            write!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
