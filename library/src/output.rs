//! Line-oriented output sinks for `display` and statistics reports.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::error::ProcessorError;

pub trait OutputSink {
    fn write_line(&mut self, line: &str) -> Result<(), ProcessorError>;
}

/// Writes each line to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<(), ProcessorError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

/// Collects lines in memory. Clones share the same buffer, so a caller can
/// keep one handle and give the other to a processor.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl OutputSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<(), ProcessorError> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}
