use std::io::{BufRead, Write};

use thiserror::Error;

use crate::set::RangeSumSet;

/// Modulus applied when folding the previous range-sum answer into the next
/// command's arguments.
pub const MODULO: i64 = 1_000_000_001;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

/// Line-based whitespace tokenizer over a buffered reader.
struct Tokenizer<R> {
    input: R,
    tokens: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokenizer<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            tokens: Vec::new().into_iter(),
        }
    }

    fn next_token(&mut self) -> Result<String, DriverError> {
        loop {
            if let Some(token) = self.tokens.next() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(DriverError::UnexpectedEof);
            }
            self.tokens = line
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
                .into_iter();
        }
    }

    fn next_i64(&mut self) -> Result<i64, DriverError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| DriverError::InvalidInteger(token))
    }
}

fn decode(arg: i64, last_sum: i64) -> i64 {
    (arg + last_sum) % MODULO
}

/// Runs a command stream against a fresh set.
///
/// The stream is whitespace-separated: a leading operation count, then that
/// many commands of the form `+ x`, `- x`, `? x` or `s l r`. Every literal
/// argument is offset by the previous range-sum answer modulo [`MODULO`]
/// before it reaches the set, which forces the stream to be processed
/// online. Membership answers (`Found` / `Not found`) and sums are written
/// one per line.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<(), DriverError> {
    let mut tokens = Tokenizer::new(input);
    let mut set = RangeSumSet::new();
    let mut last_sum = 0_i64;

    let count = tokens.next_i64()?;
    for _ in 0..count {
        let command = tokens.next_token()?;
        match command.as_str() {
            "+" => {
                let x = decode(tokens.next_i64()?, last_sum);
                set.insert(x);
            }
            "-" => {
                let x = decode(tokens.next_i64()?, last_sum);
                set.erase(x);
            }
            "?" => {
                let x = decode(tokens.next_i64()?, last_sum);
                let answer = if set.contains(x) { "Found" } else { "Not found" };
                writeln!(output, "{answer}")?;
            }
            "s" => {
                let from = decode(tokens.next_i64()?, last_sum);
                let to = decode(tokens.next_i64()?, last_sum);
                let total = set.range_sum(from, to);
                writeln!(output, "{total}")?;
                last_sum = total % MODULO;
            }
            _ => return Err(DriverError::UnknownCommand(command)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, DriverError};

    fn run_script(script: &str) -> String {
        let mut output = Vec::new();
        run(script.as_bytes(), &mut output).expect("script should run cleanly");
        String::from_utf8(output).expect("driver output is ascii")
    }

    #[test]
    fn plain_commands_without_offset() {
        let script = "6\n+ 5\n+ 1\n+ 10\n? 1\n? 7\ns 1 6\n";
        assert_eq!(run_script(script), "Found\nNot found\n6\n");
    }

    #[test]
    fn offset_wraps_large_arguments() {
        // After `s 1 2` answers 3, the literal 1000000000 decodes to
        // (1000000000 + 3) % 1000000001 = 2.
        let script = "\
15
? 1
+ 1
? 1
+ 2
s 1 2
+ 1000000000
? 1000000000
- 1000000000
? 1000000000
s 999999999 1000000000
- 2
? 2
- 0
+ 9
s 0 9
";
        let expected = "\
Not found
Found
3
Found
Not found
1
Not found
10
";
        assert_eq!(run_script(script), expected);
    }

    #[test]
    fn tokens_may_share_or_span_lines() {
        let script = "3 + 4\n+ 6 s 0\n10\n";
        assert_eq!(run_script(script), "10\n");
    }

    #[test]
    fn truncated_input_is_rejected() {
        let mut output = Vec::new();
        let err = run("2\n+ 1\n".as_bytes(), &mut output).unwrap_err();
        assert!(matches!(err, DriverError::UnexpectedEof));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let mut output = Vec::new();
        let err = run("1\n* 5\n".as_bytes(), &mut output).unwrap_err();
        assert!(matches!(err, DriverError::UnknownCommand(cmd) if cmd == "*"));
    }

    #[test]
    fn malformed_integer_is_rejected() {
        let mut output = Vec::new();
        let err = run("1\n+ forty\n".as_bytes(), &mut output).unwrap_err();
        assert!(matches!(err, DriverError::InvalidInteger(tok) if tok == "forty"));
    }
}
