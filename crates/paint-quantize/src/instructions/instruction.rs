//! A single horizontal run and its textual encoding.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A horizontal run of same-colored cells.
///
/// `line` is the grid row (y), `offset` the first column (x) and `length`
/// the number of cells. A replay agent drags from `(offset, line)` to
/// `(offset + length, line)`.
///
/// Encoded as the token `[line,offset,length];`. A color's sequence is the
/// plain concatenation of its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instruction {
    pub line: u32,
    pub offset: u32,
    pub length: u32,
}

/// Error type for decoding instruction sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseInstructionError {
    /// Token is not of the form `[line,offset,length]`
    Malformed(String),
    /// A field is not a non-negative integer
    InvalidNumber(ParseIntError),
    /// Run of zero length
    EmptyRun,
}

impl From<ParseIntError> for ParseInstructionError {
    fn from(err: ParseIntError) -> Self {
        ParseInstructionError::InvalidNumber(err)
    }
}

impl fmt::Display for ParseInstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseInstructionError::Malformed(token) => {
                write!(f, "malformed instruction token '{}'", token)
            }
            ParseInstructionError::InvalidNumber(err) => {
                write!(f, "invalid instruction field: {}", err)
            }
            ParseInstructionError::EmptyRun => write!(f, "instruction has zero length"),
        }
    }
}

impl std::error::Error for ParseInstructionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseInstructionError::InvalidNumber(err) => Some(err),
            _ => None,
        }
    }
}

impl Instruction {
    #[inline]
    pub const fn new(line: u32, offset: u32, length: u32) -> Self {
        Self {
            line,
            offset,
            length,
        }
    }

    /// Column one past the end of the run.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset + self.length
    }

    /// Concatenate the tokens of `runs`.
    ///
    /// ```
    /// use paint_quantize::Instruction;
    ///
    /// let runs = [Instruction::new(0, 0, 2), Instruction::new(1, 1, 1)];
    /// assert_eq!(Instruction::encode_sequence(&runs), "[0,0,2];[1,1,1];");
    /// ```
    pub fn encode_sequence(runs: &[Instruction]) -> String {
        runs.iter().map(Instruction::to_string).collect()
    }

    /// Decode a concatenation of tokens. The empty string is the empty
    /// sequence.
    pub fn parse_sequence(encoded: &str) -> Result<Vec<Instruction>, ParseInstructionError> {
        encoded
            .split(';')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<Instruction>)
            .collect()
    }

    /// Number of runs in an encoded sequence, without decoding it.
    pub fn count_encoded(encoded: &str) -> usize {
        encoded.matches(';').count()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}];", self.line, self.offset, self.length)
    }
}

impl FromStr for Instruction {
    type Err = ParseInstructionError;

    /// Parse one token, with or without the trailing `;`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseInstructionError::Malformed(s.to_string());
        let body = s
            .trim()
            .trim_end_matches(';')
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(malformed)?;

        let mut fields = body.split(',');
        let (Some(line), Some(offset), Some(length), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        let instruction = Instruction {
            line: line.trim().parse()?,
            offset: offset.trim().parse()?,
            length: length.trim().parse()?,
        };
        if instruction.length == 0 {
            return Err(ParseInstructionError::EmptyRun);
        }
        Ok(instruction)
    }
}
