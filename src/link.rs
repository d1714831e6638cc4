//! Byte transport between the controller and the vehicle.

use crate::constants::LINE_TERMINATOR;
use serialport::SerialPort;
use std::io::{self, Read, Write};

/// A bidirectional byte stream that can report how much input is waiting.
pub trait Link: Read + Write {
    /// Number of bytes received and not yet read
    fn bytes_to_read(&self) -> io::Result<u32>;
}

impl Link for Box<dyn SerialPort> {
    fn bytes_to_read(&self) -> io::Result<u32> {
        SerialPort::bytes_to_read(&**self).map_err(io::Error::from)
    }
}

/// Read one reply line.
///
/// The line ends at a newline or when the port read timeout expires. Bytes
/// are decoded lossily and surrounding whitespace is trimmed.
pub fn read_line<L: Link + ?Sized>(link: &mut L) -> io::Result<String> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match link.read(&mut byte) {
            Ok(0) => break,
            Ok(_) if byte[0] == LINE_TERMINATOR => break,
            Ok(_) => line.push(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(String::from_utf8_lossy(&line).trim().to_string())
}

/// Read every line that is already buffered, without waiting for more.
pub fn drain_lines<L: Link + ?Sized>(link: &mut L) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    while link.bytes_to_read()? > 0 {
        lines.push(read_line(link)?);
    }
    Ok(lines)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::Link;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{self, Read, Write};
    use std::rc::Rc;

    /// Observable state of a [`MockLink`], shared with the test body.
    #[derive(Default)]
    pub struct MockState {
        pub writes: Vec<Vec<u8>>,
        pub pending: VecDeque<u8>,
        /// Reply queued into `pending` after each write, in order
        pub replies: VecDeque<Vec<u8>>,
        /// Zero-based index of the write that fails
        pub fail_write_at: Option<usize>,
        pub fail_reads: bool,
        pub dropped: bool,
    }

    /// In-memory stand-in for a serial port.
    pub struct MockLink {
        state: Rc<RefCell<MockState>>,
    }

    impl MockLink {
        pub fn new() -> (Self, Rc<RefCell<MockState>>) {
            let state = Rc::new(RefCell::new(MockState::default()));
            (MockLink { state: state.clone() }, state)
        }
    }

    impl Read for MockLink {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let mut state = self.state.borrow_mut();
            if state.fail_reads {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "read failed"));
            }
            let mut n = 0;
            while n < buf.len() {
                match state.pending.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
            }
            Ok(n)
        }
    }

    impl Write for MockLink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut state = self.state.borrow_mut();
            if state.fail_write_at == Some(state.writes.len()) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "write failed"));
            }
            state.writes.push(buf.to_vec());
            if let Some(reply) = state.replies.pop_front() {
                state.pending.extend(reply);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Link for MockLink {
        fn bytes_to_read(&self) -> io::Result<u32> {
            Ok(self.state.borrow().pending.len() as u32)
        }
    }

    impl Drop for MockLink {
        fn drop(&mut self) {
            self.state.borrow_mut().dropped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockLink;
    use super::*;

    #[test]
    fn drains_all_buffered_lines() {
        let (mut link, state) = MockLink::new();
        state.borrow_mut().pending.extend(b"OK SUP\r\nvalue=30\n".iter().copied());

        let lines = drain_lines(&mut link).unwrap();
        assert_eq!(lines, vec!["OK SUP".to_string(), "value=30".to_string()]);
        assert!(state.borrow().pending.is_empty());
    }

    #[test]
    fn partial_line_ends_on_timeout() {
        let (mut link, state) = MockLink::new();
        state.borrow_mut().pending.extend(b"no newline".iter().copied());

        assert_eq!(read_line(&mut link).unwrap(), "no newline");
    }

    #[test]
    fn nothing_buffered_reads_nothing() {
        let (mut link, _state) = MockLink::new();
        assert!(drain_lines(&mut link).unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let (mut link, state) = MockLink::new();
        state.borrow_mut().pending.extend([b'O', 0xFF, b'K', b'\n']);

        assert_eq!(read_line(&mut link).unwrap(), "O\u{FFFD}K");
    }

    #[test]
    fn read_errors_propagate() {
        let (mut link, state) = MockLink::new();
        {
            let mut state = state.borrow_mut();
            state.pending.extend(b"x\n".iter().copied());
            state.fail_reads = true;
        }
        let err = drain_lines(&mut link).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
