use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{ReapError, Result};

/// Ask a yes/no question. Only `y` or `yes` (any case) confirm; any other
/// answer, including end of input, declines.
pub(crate) fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    write!(output, "{question} [y/N]: ").map_err(stdio_error)?;
    output.flush().map_err(stdio_error)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(stdio_error)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn stdio_error(source: std::io::Error) -> ReapError {
    ReapError::io(PathBuf::from("<stdio>"), source)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer(text: &str) -> bool {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        confirm(&mut input, &mut output, "Delete these files?").unwrap()
    }

    #[test]
    fn test_confirm_answers() {
        let cases = [
            ("y\n", true),
            ("Y\n", true),
            ("YES\n", true),
            ("yes\n", true),
            ("  yes  \n", true),
            ("n\n", false),
            ("N\n", false),
            ("no\n", false),
            ("NO\n", false),
            ("yep\n", false),
            ("\n", false),
            ("", false),
        ];

        for (input, expected) in cases {
            assert_eq!(answer(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_confirm_writes_question() {
        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        confirm(&mut input, &mut output, "Delete 3 files?").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Delete 3 files? [y/N]: ");
    }
}
