use std::io::{self, Write};

/// Consumer of everything the print opcodes produce.
pub trait OutputSink {
    fn emit_number(&mut self, value:i32) -> io::Result<()>;
    fn emit_char(&mut self, ch:u8) -> io::Result<()>;
    fn emit_string(&mut self, bytes:&[u8]) -> io::Result<()>;
}

/// Renders output as text into any writer, e.g. stdout.
pub struct WriterSink<W:Write> {
    out: W,
}

impl<W:Write> WriterSink<W> {
    pub fn new(out:W) -> WriterSink<W> {
        WriterSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> WriterSink<io::Stdout> {
        WriterSink::new(io::stdout())
    }
}

impl<W:Write> OutputSink for WriterSink<W> {
    fn emit_number(&mut self, value:i32) -> io::Result<()> {
        write!(self.out, "{}", value)?;
        self.out.flush()
    }

    fn emit_char(&mut self, ch:u8) -> io::Result<()> {
        self.out.write_all(&[ch])?;
        self.out.flush()
    }

    fn emit_string(&mut self, bytes:&[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Number(i32),
    Char(u8),
    String(Vec<u8>),
}

/// Keeps every emission, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    pub events: Vec<Emission>,
    text: Vec<u8>,
}

impl CaptureSink {
    pub fn new() -> CaptureSink {
        CaptureSink::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }
}

impl OutputSink for CaptureSink {
    fn emit_number(&mut self, value:i32) -> io::Result<()> {
        self.events.push(Emission::Number(value));
        self.text.extend_from_slice(value.to_string().as_bytes());
        Ok(())
    }

    fn emit_char(&mut self, ch:u8) -> io::Result<()> {
        self.events.push(Emission::Char(ch));
        self.text.push(ch);
        Ok(())
    }

    fn emit_string(&mut self, bytes:&[u8]) -> io::Result<()> {
        self.events.push(Emission::String(bytes.to_vec()));
        self.text.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_renders_text() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit_string(b"X=").unwrap();
        sink.emit_number(-25).unwrap();
        sink.emit_char(b'\n').unwrap();
        assert_eq!(sink.into_inner(), b"X=-25\n".to_vec());
    }

    #[test]
    fn test_capture_sink() {
        let mut sink = CaptureSink::new();
        sink.emit_number(7).unwrap();
        sink.emit_char(b' ').unwrap();
        assert_eq!(sink.events, vec![Emission::Number(7), Emission::Char(b' ')]);
        assert_eq!(sink.text(), "7 ");
    }
}
