use std::io::{self, BufRead, Write};

/// Prompts until a number is entered. An empty line takes `default`; end of
/// input is an `UnexpectedEof` error.
pub fn get_input<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: f64,
) -> io::Result<f64> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all values were entered",
            ));
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(num) if num.is_finite() => return Ok(num),
            _ => writeln!(output, "Please enter a valid number")?,
        }
    }
}
