//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// The numeric kinds the radix engine supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    F32,
    F64,
    /// Native-width signed integer
    Isize,
    I32,
    I64,
    /// Native-width unsigned integer
    Usize,
    U32,
    U64,
}

impl NumericKind {
    /// Every supported kind, in dispatch order
    pub const ALL: [NumericKind; 8] = [
        NumericKind::F32,
        NumericKind::F64,
        NumericKind::Isize,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::Usize,
        NumericKind::U32,
        NumericKind::U64,
    ];

    /// Check if this is a floating point kind
    pub fn is_float(&self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }
}

impl FromStr for NumericKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f32" | "float32" => Ok(NumericKind::F32),
            "f64" | "float64" | "float" => Ok(NumericKind::F64),
            "isize" | "int" => Ok(NumericKind::Isize),
            "i32" | "int32" => Ok(NumericKind::I32),
            "i64" | "int64" => Ok(NumericKind::I64),
            "usize" | "uint" => Ok(NumericKind::Usize),
            "u32" | "uint32" => Ok(NumericKind::U32),
            "u64" | "uint64" => Ok(NumericKind::U64),
            _ => Err(SortError::unsupported_kind(s)),
        }
    }
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
            NumericKind::Isize => "isize",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::Usize => "usize",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
        };
        write!(f, "{name}")
    }
}

/// Main configuration structure for the numsort command
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Numeric kind the input tokens are parsed as
    pub kind: NumericKind,
    /// Reverse the output order
    pub reverse: bool,
    /// Drop consecutive duplicates after sorting
    pub unique: bool,
    /// Only check whether input is already sorted
    pub check: bool,
    /// Print integers as `0x` hexadecimal literals
    pub hex: bool,
    /// Output file path
    pub output_file: Option<String>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Debug mode (for troubleshooting)
    pub debug: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            kind: NumericKind::U64,
            reverse: false,
            unique: false,
            check: false,
            hex: false,
            output_file: None,
            input_files: Vec::new(),
            debug: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numeric kind
    pub fn with_kind(mut self, kind: NumericKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enable unique output
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enable hexadecimal output
    pub fn with_hex(mut self, hex: bool) -> Self {
        self.hex = hex;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.check && self.unique {
            return Err(SortError::conflicting_options(
                "--check is incompatible with --unique",
            ));
        }

        if self.check && self.output_file.is_some() {
            return Err(SortError::conflicting_options(
                "--check is incompatible with --output",
            ));
        }

        if self.hex && self.kind.is_float() {
            return Err(SortError::conflicting_options(
                "--hex requires an integer kind",
            ));
        }

        Ok(())
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set numeric kind
    pub fn kind(mut self, kind: NumericKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Enable reverse output
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Enable unique output
    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Enable hexadecimal output
    pub fn hex(mut self) -> Self {
        self.config.hex = true;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
