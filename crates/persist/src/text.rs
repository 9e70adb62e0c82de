use std::io::Write;
use std::str::FromStr;

use heatworld_common::CellFlags;
use heatworld_kernel::World;

use crate::CodecError;

/// First line of every text-format world.
pub const TEXT_HEADER: &str = "HeatWorld v0";

pub(crate) fn has_header(data: &[u8]) -> bool {
    let first = data.split(|&b| b == b'\n').next().unwrap_or_default();
    first.trim_ascii() == TEXT_HEADER.as_bytes()
}

/// Whitespace tokens tagged with their 1-based line number, skipping blank
/// lines and `#` comments.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(body: &'a str, first_line: usize) -> Self {
        let inner = body
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim_start().starts_with('#'))
            .flat_map(move |(i, l)| l.split_whitespace().map(move |tok| (i + first_line, tok)));
        Self {
            inner: Box::new(inner),
        }
    }

    fn next_value<T: FromStr>(&mut self, what: &'static str) -> Result<T, CodecError> {
        match self.inner.next() {
            Some((line, token)) => token.parse().map_err(|_| CodecError::Parse {
                line,
                token: token.to_string(),
                expected: what,
            }),
            None => Err(CodecError::MissingValues {
                what,
                expected: 1,
                found: 0,
            }),
        }
    }

    fn take_values<T: FromStr>(
        &mut self,
        count: usize,
        what: &'static str,
        expected: &'static str,
    ) -> Result<Vec<T>, CodecError> {
        let mut out = Vec::with_capacity(count.min(1 << 20));
        for (line, token) in self.inner.by_ref().take(count) {
            let value = token.parse().map_err(|_| CodecError::Parse {
                line,
                token: token.to_string(),
                expected,
            })?;
            out.push(value);
        }
        if out.len() != count {
            return Err(CodecError::MissingValues {
                what,
                expected: count,
                found: out.len(),
            });
        }
        Ok(out)
    }
}

pub(crate) fn decode(input: &str) -> Result<World, CodecError> {
    let (header, body) = input.split_once('\n').unwrap_or((input, ""));
    if header.trim() != TEXT_HEADER {
        return Err(CodecError::UnknownHeader(header.trim().to_string()));
    }

    let mut tokens = Tokens::new(body, 2);
    let width: u32 = tokens.next_value("width")?;
    let height: u32 = tokens.next_value("height")?;
    let alpha: f32 = tokens.next_value("alpha")?;
    let t: f64 = tokens.next_value("time")?;

    let cells = width as usize * height as usize;
    let state: Vec<f32> = tokens.take_values(cells, "state values", "a state value")?;
    let bits: Vec<u32> = tokens.take_values(cells, "property values", "a property bitmask")?;

    if let Some((line, token)) = tokens.inner.next() {
        return Err(CodecError::TrailingData {
            line,
            token: token.to_string(),
        });
    }

    tracing::trace!(width, height, cells, "parsed text world");
    let properties = bits.into_iter().map(CellFlags::from).collect();
    Ok(World::new(width, height, alpha, t, state, properties)?)
}

pub(crate) fn encode<W: Write>(out: &mut W, world: &World) -> Result<(), CodecError> {
    let w = world.width() as usize;
    writeln!(out, "{TEXT_HEADER}")?;
    writeln!(
        out,
        "{} {} {} {}",
        world.width(),
        world.height(),
        world.alpha(),
        world.time()
    )?;

    for row in world.state().chunks(w) {
        write_row(out, row.iter())?;
    }
    for row in world.properties().chunks(w) {
        write_row(out, row.iter().map(|p| p.bits()))?;
    }
    Ok(())
}

fn write_row<W: Write, T: std::fmt::Display>(
    out: &mut W,
    row: impl Iterator<Item = T>,
) -> Result<(), CodecError> {
    for (i, v) in row.enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{v}")?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "HeatWorld v0
3 3 1 0
# state
0 0 0
0 1 0
0 0 0

# properties
1 1 1
1 0 1
1 1 1
";

    #[test]
    fn decodes_commented_input() {
        let world = decode(SCENARIO).unwrap();
        assert_eq!(world.width(), 3);
        assert_eq!(world.height(), 3);
        assert_eq!(world.alpha(), 1.0);
        assert_eq!(world.value(1, 1), 1.0);
        assert!(world.flags(0, 0).is_fixed());
        assert!(!world.flags(1, 1).is_frozen());
    }

    #[test]
    fn encode_layout() {
        let world = decode(SCENARIO).unwrap();
        let mut buf = Vec::new();
        encode(&mut buf, &world).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], TEXT_HEADER);
        assert_eq!(lines[1], "3 3 1 0");
        assert_eq!(lines[3], "0 1 0");
        assert_eq!(lines[5], "1 1 1");
        assert_eq!(lines[6], "1 0 1");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn bad_number_reports_line() {
        let input = SCENARIO.replace("0 1 0", "0 hot 0");
        match decode(&input).unwrap_err() {
            CodecError::Parse { line, token, .. } => {
                assert_eq!(line, 5);
                assert_eq!(token, "hot");
            }
            other => panic!("expected Parse, got: {other}"),
        }
    }

    #[test]
    fn short_grid_is_rejected() {
        let input = SCENARIO.trim_end().trim_end_matches("1 1 1");
        match decode(input).unwrap_err() {
            CodecError::MissingValues {
                what,
                expected,
                found,
            } => {
                assert_eq!(what, "property values");
                assert_eq!(expected, 9);
                assert_eq!(found, 6);
            }
            other => panic!("expected MissingValues, got: {other}"),
        }
    }

    #[test]
    fn missing_dimensions_are_rejected() {
        let err = decode("HeatWorld v0\n3\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingValues { what: "height", .. }
        ));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let input = format!("{SCENARIO}7\n");
        match decode(&input).unwrap_err() {
            CodecError::TrailingData { line, token } => {
                assert_eq!(line, 12);
                assert_eq!(token, "7");
            }
            other => panic!("expected TrailingData, got: {other}"),
        }
    }

    #[test]
    fn unflagged_edge_fails_load() {
        let input = SCENARIO.replace("1 0 1", "0 0 1");
        assert!(matches!(decode(&input), Err(CodecError::World(_))));
    }

    #[test]
    fn header_tolerates_crlf() {
        assert!(has_header(b"HeatWorld v0\r\n3 3 1 0\n"));
        assert!(!has_header(b"HeatWorld v1\n"));
    }
}
