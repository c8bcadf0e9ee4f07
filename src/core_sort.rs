//! Command-line driver: reads numeric keys, sorts them through the
//! dispatcher, optionally drops duplicates and writes them back out.

use crate::config::{NumericKind, SortConfig};
use crate::error::{SortContext, SortError, SortResult};
use crate::sequence::{sort, NumericVec};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

/// Parses one whitespace separated token into a key
trait ParseKey: Sized {
    fn parse_key(token: &str) -> Option<Self>;
}

macro_rules! impl_parse_int {
    ($($t:ty),* $(,)?) => {$(
        impl ParseKey for $t {
            fn parse_key(token: &str) -> Option<Self> {
                let (negative, digits) = match token.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, token.strip_prefix('+').unwrap_or(token)),
                };
                let hex = digits
                    .strip_prefix("0x")
                    .or_else(|| digits.strip_prefix("0X"));
                match (negative, hex) {
                    // from_str_radix would accept a sign after the prefix
                    (_, Some(hex)) if hex.starts_with(|c: char| c == '+' || c == '-') => None,
                    (false, Some(hex)) => <$t>::from_str_radix(hex, 16).ok(),
                    (true, Some(hex)) => <$t>::from_str_radix(&format!("-{hex}"), 16).ok(),
                    (_, None) => token.parse().ok(),
                }
            }
        }
    )*};
}

impl_parse_int!(isize, i32, i64, usize, u32, u64);

/// Writes one integer key as a `0x` literal that `ParseKey` reads back
trait HexKey: Copy {
    fn write_hex<W: Write>(self, writer: &mut W) -> io::Result<()>;
}

macro_rules! impl_hex_unsigned {
    ($($t:ty),*) => {$(
        impl HexKey for $t {
            fn write_hex<W: Write>(self, writer: &mut W) -> io::Result<()> {
                writeln!(writer, "{:#x}", self)
            }
        }
    )*};
}

macro_rules! impl_hex_signed {
    ($($t:ty),*) => {$(
        impl HexKey for $t {
            fn write_hex<W: Write>(self, writer: &mut W) -> io::Result<()> {
                if self < 0 {
                    writeln!(writer, "-{:#x}", self.unsigned_abs())
                } else {
                    writeln!(writer, "{:#x}", self)
                }
            }
        }
    )*};
}

impl_hex_unsigned!(usize, u32, u64);
impl_hex_signed!(isize, i32, i64);

impl ParseKey for f32 {
    fn parse_key(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl ParseKey for f64 {
    fn parse_key(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

/// Keys read from all inputs, with the line each one came from
struct ParsedKeys {
    values: NumericVec,
    /// (source name, line number) per key
    origins: Vec<(usize, usize)>,
    sources: Vec<String>,
}

impl ParsedKeys {
    fn new(kind: NumericKind) -> Self {
        Self {
            values: NumericVec::empty(kind),
            origins: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Core sort driver
pub struct CoreSort {
    config: SortConfig,
}

impl CoreSort {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    /// Runs the configured operation and returns the process exit code
    pub fn sort(&self) -> SortResult<i32> {
        self.config.validate()?;

        let parsed = self.read_inputs()?;

        if self.config.debug {
            eprintln!("Key kind: {}", self.config.kind);
            eprintln!("Keys read: {}", parsed.values.len());
            eprintln!("Inputs: {}", parsed.sources.len());
        }

        if self.config.check {
            return Ok(self.check_sorted(&parsed));
        }

        let mut values = parsed.values;
        sort(values.as_sequence())?;

        if self.config.unique {
            let removed = values.dedup();
            if self.config.debug {
                eprintln!("Duplicates removed: {removed}");
            }
        }

        if self.config.reverse {
            values.reverse();
        }

        self.write_output(&values)?;
        Ok(crate::EXIT_SUCCESS)
    }

    /// Reports the first out-of-order key, GNU sort style
    fn check_sorted(&self, parsed: &ParsedKeys) -> i32 {
        match parsed.values.first_disorder() {
            None => crate::EXIT_SUCCESS,
            Some(idx) => {
                let (source, line) = parsed.origins[idx];
                eprintln!("numsort: {}:{}: disorder", parsed.sources[source], line);
                crate::EXIT_FAILURE
            }
        }
    }

    fn read_inputs(&self) -> SortResult<ParsedKeys> {
        let mut parsed = ParsedKeys::new(self.config.kind);

        if self.config.reading_from_stdin() {
            let mut text = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut text)
                .with_context(|| "reading standard input".to_string())?;
            parse_text(&text, "-", &mut parsed)?;
        } else {
            for file in &self.config.input_files {
                let text = std::fs::read_to_string(file).with_file_context(file)?;
                parse_text(&text, file, &mut parsed)?;
            }
        }

        Ok(parsed)
    }

    fn write_output(&self, values: &NumericVec) -> SortResult<()> {
        match &self.config.output_file {
            Some(path) => {
                let file = File::create(path).with_file_context(path)?;
                let mut writer = BufWriter::new(file);
                write_keys(&mut writer, values, self.config.hex)?;
                writer.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                write_keys(&mut writer, values, self.config.hex)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

/// Appends every token of `text` to `parsed`
fn parse_text(text: &str, source: &str, parsed: &mut ParsedKeys) -> SortResult<()> {
    let source_idx = parsed.sources.len();
    parsed.sources.push(source.to_string());
    let origins = &mut parsed.origins;

    match &mut parsed.values {
        NumericVec::F32(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::F64(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::Isize(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::I32(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::I64(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::Usize(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::U32(values) => parse_into(text, source, source_idx, values, origins),
        NumericVec::U64(values) => parse_into(text, source, source_idx, values, origins),
    }
}

fn parse_into<T: ParseKey>(
    text: &str,
    source: &str,
    source_idx: usize,
    values: &mut Vec<T>,
    origins: &mut Vec<(usize, usize)>,
) -> SortResult<()> {
    for (line_idx, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = T::parse_key(token).ok_or_else(|| {
                SortError::parse_error(&format!(
                    "{}:{}: invalid {} value '{}'",
                    source,
                    line_idx + 1,
                    std::any::type_name::<T>(),
                    token
                ))
            })?;
            values.push(value);
            origins.push((source_idx, line_idx + 1));
        }
    }
    Ok(())
}

fn write_keys<W: Write>(writer: &mut W, values: &NumericVec, hex: bool) -> io::Result<()> {
    match values {
        NumericVec::F32(x) => write_plain(writer, x),
        NumericVec::F64(x) => write_plain(writer, x),
        NumericVec::Isize(x) => write_int(writer, x, hex),
        NumericVec::I32(x) => write_int(writer, x, hex),
        NumericVec::I64(x) => write_int(writer, x, hex),
        NumericVec::Usize(x) => write_int(writer, x, hex),
        NumericVec::U32(x) => write_int(writer, x, hex),
        NumericVec::U64(x) => write_int(writer, x, hex),
    }
}

fn write_plain<W: Write, T: std::fmt::Display>(writer: &mut W, values: &[T]) -> io::Result<()> {
    for value in values {
        writeln!(writer, "{value}")?;
    }
    Ok(())
}

fn write_int<W: Write, T: std::fmt::Display + HexKey>(
    writer: &mut W,
    values: &[T],
    hex: bool,
) -> io::Result<()> {
    if !hex {
        return write_plain(writer, values);
    }
    for &value in values {
        value.write_hex(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_keys(text: &str, kind: NumericKind) -> SortResult<NumericVec> {
        let mut parsed = ParsedKeys::new(kind);
        parse_text(text, "-", &mut parsed)?;
        Ok(parsed.values)
    }

    #[test]
    fn test_parse_keys_with_hex_and_signs() {
        let values = parse_keys("0x10 -5\n+7 0XfF", NumericKind::I64).expect("parse failed");
        assert_eq!(values, NumericVec::I64(vec![16, -5, 7, 255]));

        let values = parse_keys("-0x10", NumericKind::I32).expect("parse failed");
        assert_eq!(values, NumericVec::I32(vec![-16]));
    }

    #[test]
    fn test_parse_keys_rejects_garbage() {
        let err = parse_keys("1 2\nthree", NumericKind::U32).unwrap_err();
        match err {
            SortError::ParseError { message } => {
                assert!(message.starts_with("-:2:"), "{message}");
                assert!(message.contains("three"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_keys("-1", NumericKind::U64).is_err());
    }

    #[test]
    fn test_parse_rejects_sign_after_hex_prefix() {
        assert!(parse_keys("0x-5", NumericKind::I32).is_err());
        assert!(parse_keys("0x+5", NumericKind::I64).is_err());
        assert!(parse_keys("-0x-5", NumericKind::I32).is_err());
        assert!(parse_keys("0X+ff", NumericKind::U32).is_err());
    }

    #[test]
    fn test_negative_hex_output_parses_back() {
        let keys = NumericVec::I32(vec![i32::MIN, -5, 0, 26, i32::MAX]);
        let mut out = Vec::new();
        write_keys(&mut out, &keys, true).expect("write failed");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "-0x80000000\n-0x5\n0x0\n0x1a\n0x7fffffff\n");
        assert_eq!(parse_keys(&text, NumericKind::I32).expect("parse failed"), keys);

        let mut out = Vec::new();
        write_keys(&mut out, &NumericVec::I64(vec![i64::MIN, -1]), true).expect("write failed");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            parse_keys(&text, NumericKind::I64).expect("parse failed"),
            NumericVec::I64(vec![i64::MIN, -1])
        );
    }

    #[test]
    fn test_hex_check_accepts_own_output() -> SortResult<()> {
        let mut input = tempfile::NamedTempFile::new()?;
        writeln!(input, "3 -0x10 -5 0x2")?;
        let output = tempfile::NamedTempFile::new()?;

        let config = SortConfig::new()
            .with_kind(NumericKind::I32)
            .with_hex(true)
            .with_input_files(vec![input.path().display().to_string()])
            .with_output_file(Some(output.path().display().to_string()));
        assert_eq!(CoreSort::new(config).sort()?, crate::EXIT_SUCCESS);
        let written = std::fs::read_to_string(output.path())?;
        assert_eq!(written, "-0x10\n-0x5\n0x2\n0x3\n");

        let config = SortConfig::new()
            .with_kind(NumericKind::I32)
            .with_check(true)
            .with_input_files(vec![output.path().display().to_string()]);
        assert_eq!(CoreSort::new(config).sort()?, crate::EXIT_SUCCESS);
        Ok(())
    }

    #[test]
    fn test_parse_float_specials() {
        let values = parse_keys("NaN -inf 1.5 -0", NumericKind::F64).expect("parse failed");
        match values {
            NumericVec::F64(x) => {
                assert!(x[0].is_nan());
                assert_eq!(x[1], f64::NEG_INFINITY);
                assert_eq!(x[2], 1.5);
                assert!(x[3].is_sign_negative());
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_write_keys_hex() {
        let mut out = Vec::new();
        write_keys(&mut out, &NumericVec::U64(vec![16, 255]), true).expect("write failed");
        assert_eq!(String::from_utf8(out).expect("utf8"), "0x10\n0xff\n");

        let mut out = Vec::new();
        write_keys(&mut out, &NumericVec::F32(vec![-2.5, 1.0]), false).expect("write failed");
        assert_eq!(String::from_utf8(out).expect("utf8"), "-2.5\n1\n");
    }

    #[test]
    fn test_sort_file_unique_to_output() -> SortResult<()> {
        let mut input = tempfile::NamedTempFile::new()?;
        writeln!(input, "0x30 0x10\n0x20 0x10\n0x30")?;
        let output = tempfile::NamedTempFile::new()?;

        let config = SortConfig::new()
            .with_unique(true)
            .with_hex(true)
            .with_input_files(vec![input.path().display().to_string()])
            .with_output_file(Some(output.path().display().to_string()));

        let code = CoreSort::new(config).sort()?;
        assert_eq!(code, crate::EXIT_SUCCESS);
        let written = std::fs::read_to_string(output.path())?;
        assert_eq!(written, "0x10\n0x20\n0x30\n");
        Ok(())
    }

    #[test]
    fn test_check_reports_disorder() -> SortResult<()> {
        let mut sorted = tempfile::NamedTempFile::new()?;
        writeln!(sorted, "-3\n-1\n4")?;
        let mut unsorted = tempfile::NamedTempFile::new()?;
        writeln!(unsorted, "1\n5\n2")?;

        let config = SortConfig::new()
            .with_kind(NumericKind::I32)
            .with_check(true)
            .with_input_files(vec![sorted.path().display().to_string()]);
        assert_eq!(CoreSort::new(config).sort()?, crate::EXIT_SUCCESS);

        let config = SortConfig::new()
            .with_kind(NumericKind::I32)
            .with_check(true)
            .with_input_files(vec![unsorted.path().display().to_string()]);
        assert_eq!(CoreSort::new(config).sort()?, crate::EXIT_FAILURE);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let config = SortConfig::new().with_input_files(vec!["/no/such/numsort/input".to_string()]);
        let err = CoreSort::new(config).sort().unwrap_err();
        assert!(matches!(err, SortError::FileNotFound { .. }));
    }
}
