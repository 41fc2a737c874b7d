use std::io::{self, Write};

use rustyline::ExternalPrinter;

/// Routes transcript output through a rustyline `ExternalPrinter` so
/// lines land above the prompt and the prompt is redrawn after them.
///
/// The printer takes whole messages, so output is buffered and handed
/// over one line at a time.
pub struct PrinterWriter<P: ExternalPrinter> {
    printer: P,
    buf: Vec<u8>,
}

impl<P: ExternalPrinter> PrinterWriter<P> {
    pub fn new(printer: P) -> Self {
        Self {
            printer,
            buf: Vec::new(),
        }
    }

    fn print(&mut self, bytes: &[u8]) -> io::Result<()> {
        let msg = String::from_utf8_lossy(bytes).into_owned();
        self.printer.print(msg).map_err(io::Error::other)
    }
}

impl<P: ExternalPrinter> Write for PrinterWriter<P> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.print(&line[..pos])?;
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let rest = std::mem::take(&mut self.buf);
            self.print(&rest)?;
        }
        Ok(())
    }
}
