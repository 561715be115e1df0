//! CLI output formatting module

use crate::config::OutputFormat;
use chunkwise_core::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
    writer: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Create a formatter writing to stdout
    pub fn with_format(format: OutputFormat, use_colors: bool) -> Self {
        Self {
            format,
            use_colors: use_colors && crate::config::supports_color(),
            writer: Box::new(io::stdout()),
        }
    }

    /// Create a formatter with custom writer
    pub fn with_writer<W: Write + Send + 'static>(
        format: OutputFormat,
        use_colors: bool,
        writer: W,
    ) -> Self {
        Self {
            format,
            use_colors: use_colors && crate::config::supports_color(),
            writer: Box::new(writer),
        }
    }

    /// Selected output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format and output a serializable value
    pub fn output<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(value)?;
                write!(self.writer, "{}", yaml)?;
            }
            OutputFormat::Compact => {
                let json = serde_json::to_string(value)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Pretty => {
                let json_value = serde_json::to_value(value)?;
                self.format_json_pretty(&json_value, 0)?;
            }
        }
        Ok(())
    }

    /// Format JSON value in a human-readable way
    fn format_json_pretty(&mut self, value: &serde_json::Value, indent: usize) -> Result<()> {
        let indent_str = "  ".repeat(indent);

        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map {
                    match val {
                        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                            writeln!(self.writer, "{}{}:", indent_str, self.colorize_key(key))?;
                            self.format_json_pretty(val, indent + 1)?;
                        }
                        _ => {
                            writeln!(
                                self.writer,
                                "{}{}: {}",
                                indent_str,
                                self.colorize_key(key),
                                self.format_value(val)
                            )?;
                        }
                    }
                }
            }
            serde_json::Value::Array(arr) => {
                for (i, item) in arr.iter().enumerate() {
                    writeln!(self.writer, "{}[{}]:", indent_str, i)?;
                    self.format_json_pretty(item, indent + 1)?;
                }
            }
            _ => {
                writeln!(self.writer, "{}{}", indent_str, self.format_value(value))?;
            }
        }
        Ok(())
    }

    fn format_value(&self, value: &serde_json::Value) -> String {
        let (text, color) = match value {
            serde_json::Value::String(s) => (format!("\"{}\"", s), "32"),
            serde_json::Value::Number(n) => (n.to_string(), "36"),
            serde_json::Value::Bool(b) => (b.to_string(), "35"),
            serde_json::Value::Null => ("null".to_string(), "90"),
            serde_json::Value::Array(arr) => return format!("[{} items]", arr.len()),
            serde_json::Value::Object(obj) => return format!("{{{}}} keys", obj.len()),
        };

        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text
        }
    }

    fn colorize_key(&self, key: &str) -> String {
        if self.use_colors {
            format!("\x1b[34m{}\x1b[0m", key)
        } else {
            key.to_string()
        }
    }

    /// Output a simple message
    pub fn message(&mut self, msg: &str) -> Result<()> {
        writeln!(self.writer, "{}", msg)?;
        Ok(())
    }

    /// Output a success message
    pub fn success(&mut self, msg: &str) -> Result<()> {
        self.marked("32", "✓", msg)
    }

    /// Output an error message
    pub fn error(&mut self, msg: &str) -> Result<()> {
        self.marked("31", "✗", msg)
    }

    /// Output a warning message
    pub fn warning(&mut self, msg: &str) -> Result<()> {
        self.marked("33", "⚠", msg)
    }

    fn marked(&mut self, color: &str, marker: &str, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[{}m{}\x1b[0m {}", color, marker, msg)?;
        } else {
            writeln!(self.writer, "{} {}", marker, msg)?;
        }
        Ok(())
    }
}

/// Writer that keeps its bytes reachable after the formatter takes ownership
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}
