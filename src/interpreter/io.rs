use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

/// The input side of [`HostIo`].
///
/// Real stdin is read through the process-wide handle on every call rather
/// than through a privately buffered wrapper, so `read()` inside a prompt
/// session and the prompt's own line reads never steal each other's input.
enum InputStream {
    Stdin,
    Stream(Box<dyn BufRead>),
}

/// The host streams the built-in functions talk to.
///
/// The interpreter owns one of these instead of reaching for the process
/// streams directly, so embedders and tests can swap in their own input and
/// capture output.
pub struct HostIo {
    input:  InputStream,
    output: Box<dyn Write>,
}

impl HostIo {
    /// Wires the interpreter to stdin and stdout.
    #[must_use]
    pub fn standard() -> Self {
        Self { input:  InputStream::Stdin,
               output: Box::new(io::stdout()), }
    }

    /// Wires the interpreter to arbitrary streams.
    #[must_use]
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input:  InputStream::Stream(input),
               output }
    }

    /// Reads one line from the input stream, without the trailing newline.
    /// Returns the empty string at end of input.
    pub(crate) fn read_line(&mut self) -> String {
        let mut line = String::new();
        let _ = match &mut self.input {
            InputStream::Stdin => io::stdin().read_line(&mut line),
            InputStream::Stream(stream) => stream.read_line(&mut line),
        };
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }

    /// Writes text to the output stream and flushes it, so prompts without a
    /// newline appear immediately.
    pub(crate) fn write(&mut self, text: &str) {
        let _ = self.output.write_all(text.as_bytes());
        let _ = self.output.flush();
    }
}

/// A cloneable writer over a shared buffer.
///
/// Hand one clone to [`HostIo::new`] and keep the other to read back what the
/// program printed.
///
/// # Example
/// ```
/// use std::io::Write;
///
/// use rill::interpreter::io::SharedWriter;
///
/// let writer = SharedWriter::default();
/// let mut sink = writer.clone();
/// write!(sink, "hello").unwrap();
/// assert_eq!(writer.contents(), "hello");
/// ```
#[derive(Clone, Default)]
pub struct SharedWriter {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedWriter {
    /// Creates an empty shared buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
