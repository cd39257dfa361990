use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// An in-memory output sink that can be read back while a
/// [`Context`](crate::interpreter::evaluator::core::Context) still owns a
/// clone of it.
///
/// Clones share the same buffer.
///
/// # Example
/// ```
/// use std::io::Write;
///
/// use scriptit::interpreter::io::SharedOutput;
///
/// let output = SharedOutput::new();
/// let mut writer = output.clone();
/// writeln!(writer, "hi").unwrap();
///
/// assert_eq!(output.contents(), "hi\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedOutput {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
