use crate::error::{Error, Result};

/// Flattens a text document into a sequence of numbers.
///
/// Numbers are separated by whitespace and/or commas, so one-per-line lists,
/// CSV rows and matrices all flatten row by row. Lines starting with `#` are
/// skipped. `nan`, `inf` and `-inf` are accepted and left for the kernels to
/// filter out.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
	let mut values = Vec::new();
	for (line_i, line) in text.lines().enumerate() {
		if line.trim_start().starts_with('#') {
			continue;
		}
		for token in line.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
			let value = token.parse::<f64>().map_err(|_| Error::Parse {
				line: line_i + 1,
				token: token.to_string(),
			})?;
			values.push(value);
		}
	}
	Ok(values)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flattens_rows() {
		let text = "1, 2, 3\n4 5\n\n  6\t7,8\n";
		assert_eq!(parse_values(text), Ok(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]));
	}

	#[test]
	fn skips_comments() {
		let text = "# header\n1.5\n   # indented comment\n-2e3\n";
		assert_eq!(parse_values(text), Ok(vec![1.5, -2000.0]));
	}

	#[test]
	fn accepts_non_finite() {
		let v = parse_values("NaN inf -inf 1").unwrap();
		assert!(v[0].is_nan());
		assert_eq!(v[1..], [f64::INFINITY, f64::NEG_INFINITY, 1.0]);
	}

	#[test]
	fn empty_text() {
		assert_eq!(parse_values(""), Ok(vec![]));
	}

	#[test]
	fn reports_bad_token() {
		assert_eq!(
			parse_values("1\n2 x3\n"),
			Err(Error::Parse { line: 2, token: "x3".into() })
		);
	}
}
