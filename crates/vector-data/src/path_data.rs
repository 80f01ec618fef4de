//! Compact path-data grammar (the SVG `d` attribute subset used by vector drawables).
//!
//! A path string is a list of command letters, each followed by the numbers it consumes.
//! A letter may be followed by several groups of numbers (an implicit repeat), so one
//! [`PathCommand`] holds every number up to the next letter.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
    #[error("unknown path command '{letter}' at offset {offset}")]
    UnknownCommand { letter: char, offset: usize },
    #[error("number at offset {offset} appears before any path command")]
    MissingCommand { offset: usize },
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter { found: char, offset: usize },
    #[error("command '{letter}' at offset {offset} takes {arity} parameters per segment, found {found}")]
    ArityMismatch {
        letter: char,
        offset: usize,
        arity: usize,
        found: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    /// Parses a command letter into its kind and relativity (lowercase is relative).
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'C' => CommandKind::CurveTo,
            'S' => CommandKind::SmoothCurveTo,
            'Q' => CommandKind::QuadTo,
            'T' => CommandKind::SmoothQuadTo,
            'A' => CommandKind::ArcTo,
            'Z' => CommandKind::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalLineTo => 'H',
            CommandKind::VerticalLineTo => 'V',
            CommandKind::CurveTo => 'C',
            CommandKind::SmoothCurveTo => 'S',
            CommandKind::QuadTo => 'Q',
            CommandKind::SmoothQuadTo => 'T',
            CommandKind::ArcTo => 'A',
            CommandKind::ClosePath => 'Z',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    /// Number of parameters one segment of this command consumes.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => 2,
            CommandKind::HorizontalLineTo | CommandKind::VerticalLineTo => 1,
            CommandKind::CurveTo => 6,
            CommandKind::SmoothCurveTo | CommandKind::QuadTo => 4,
            CommandKind::ArcTo => 7,
            CommandKind::ClosePath => 0,
        }
    }
}

/// One command letter and every parameter that follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub params: Vec<f32>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, relative: bool, params: Vec<f32>) -> Self {
        Self {
            kind,
            relative,
            params,
        }
    }

    pub fn letter(&self) -> char {
        self.kind.letter(self.relative)
    }

    /// Iterates the parameter groups of this command, one per implicit repeat.
    ///
    /// Close commands yield a single empty group.
    pub fn segments(&self) -> Box<dyn Iterator<Item = &[f32]> + '_> {
        let arity = self.kind.arity();
        if arity == 0 {
            Box::new(std::iter::once(&self.params[..0]))
        } else {
            Box::new(self.params.chunks_exact(arity))
        }
    }

    /// Whether `other` can be interpolated toward from `self`.
    pub fn can_morph(&self, other: &PathCommand) -> bool {
        self.kind == other.kind
            && self.relative == other.relative
            && self.params.len() == other.params.len()
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for (i, value) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Parses a path-data string.
///
/// Empty input yields an empty command list.
pub fn parse(data: &str) -> Result<Vec<PathCommand>, PathDataError> {
    let bytes = data.as_bytes();
    let mut commands = Vec::new();
    let mut pending: Option<(PathCommand, usize)> = None;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if let Some((cmd, offset)) = pending.take() {
                commands.push(finish_command(cmd, offset)?);
            }
            let letter = c as char;
            let (kind, relative) = CommandKind::from_letter(letter)
                .ok_or(PathDataError::UnknownCommand { letter, offset: i })?;
            pending = Some((PathCommand::new(kind, relative, Vec::new()), i));
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.' {
            let (cmd, _) = pending
                .as_mut()
                .ok_or(PathDataError::MissingCommand { offset: i })?;
            let end = scan_number(bytes, i);
            let text = &data[i..end];
            let value = text
                .parse::<f32>()
                .map_err(|_| PathDataError::InvalidNumber {
                    text: text.to_string(),
                    offset: i,
                })?;
            if !value.is_finite() {
                return Err(PathDataError::InvalidNumber {
                    text: text.to_string(),
                    offset: i,
                });
            }
            cmd.params.push(value);
            i = end;
            continue;
        }

        let found = data[i..].chars().next().unwrap_or('\u{fffd}');
        return Err(PathDataError::UnexpectedCharacter { found, offset: i });
    }

    if let Some((cmd, offset)) = pending.take() {
        commands.push(finish_command(cmd, offset)?);
    }

    Ok(commands)
}

fn finish_command(cmd: PathCommand, offset: usize) -> Result<PathCommand, PathDataError> {
    let arity = cmd.kind.arity();
    let found = cmd.params.len();
    let valid = if arity == 0 {
        found == 0
    } else {
        found > 0 && found % arity == 0
    };
    if valid {
        Ok(cmd)
    } else {
        Err(PathDataError::ArityMismatch {
            letter: cmd.letter(),
            offset,
            arity,
            found,
        })
    }
}

/// Returns the end offset of the number starting at `start`.
///
/// A number ends at a separator, a letter other than an exponent marker, a sign that
/// does not follow an exponent marker, or a second decimal point (".5.5" is two numbers).
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
        i += 1;
    }

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                i += 1;
            }
            b'e' | b'E' if !seen_exp => {
                seen_exp = true;
                i += 1;
                if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
                    i += 1;
                }
            }
            _ => break,
        }
    }
    i
}

/// Writes a command list back to path-data text.
pub fn serialize(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two command lists are morph-compatible when they have the same length and each pair
/// of commands has the same kind, relativity and parameter count.
pub fn morph_compatible(a: &[PathCommand], b: &[PathCommand]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.can_morph(y))
}

/// Linearly interpolates the parameters of two morph-compatible lists.
///
/// Returns `None` when the lists are not morph-compatible; callers then replace the
/// whole list instead.
pub fn interpolate(
    from: &[PathCommand],
    to: &[PathCommand],
    fraction: f32,
) -> Option<Vec<PathCommand>> {
    if !morph_compatible(from, to) {
        return None;
    }
    Some(
        from.iter()
            .zip(to)
            .map(|(a, b)| PathCommand {
                kind: a.kind,
                relative: a.relative,
                params: a
                    .params
                    .iter()
                    .zip(&b.params)
                    .map(|(x, y)| x + (y - x) * fraction)
                    .collect(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangle() {
        let cmds = parse("M12,2 L22,22 L2,22 Z").unwrap();
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0], PathCommand::new(CommandKind::MoveTo, false, vec![12.0, 2.0]));
        assert_eq!(cmds[2].params, vec![2.0, 22.0]);
        assert_eq!(cmds[3].kind, CommandKind::ClosePath);
        assert!(cmds[3].params.is_empty());
    }

    #[test]
    fn test_parse_compact_numbers() {
        // Signs and a second decimal point both start new numbers.
        let cmds = parse("m1-2.5.5-.25l.5.5").unwrap();
        assert_eq!(cmds[0].params, vec![1.0, -2.5, 0.5, -0.25]);
        assert!(cmds[0].relative);
        assert_eq!(cmds[1].params, vec![0.5, 0.5]);
    }

    #[test]
    fn test_parse_exponent_is_not_a_boundary() {
        let cmds = parse("M1e-2,3E+1L2e2 0").unwrap();
        assert_eq!(cmds[0].params, vec![0.01, 30.0]);
        assert_eq!(cmds[1].params, vec![200.0, 0.0]);
    }

    #[test]
    fn test_implicit_repeat_kept_in_one_command() {
        let cmds = parse("L1 2 3 4 5 6").unwrap();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].segments().count(), 3);
    }

    #[test]
    fn test_arity_mismatch_fails() {
        let err = parse("M0 0 L1 2 3").unwrap_err();
        assert!(matches!(
            err,
            PathDataError::ArityMismatch { letter: 'L', arity: 2, found: 3, .. }
        ));
        assert!(parse("C1 2 3 4 5").is_err());
        assert!(parse("z 1").is_err());
        assert!(parse("M").is_err());
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(parse("1 2"), Err(PathDataError::MissingCommand { offset: 0 })));
        assert!(matches!(parse("M0 0 X1 1"), Err(PathDataError::UnknownCommand { letter: 'X', .. })));
        assert!(matches!(parse("M0 0 L1e 2"), Err(PathDataError::InvalidNumber { .. })));
        assert!(matches!(parse("M0 0 L - 2"), Err(PathDataError::InvalidNumber { .. })));
        assert!(matches!(parse("M0 0 #"), Err(PathDataError::UnexpectedCharacter { found: '#', .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  ,\n").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let sources = [
            "M12,2 L22,22 L2,22 Z",
            "m1-2.5.5-.25l.5.5z",
            "M10 10 h5 v-5 H0 V0 c1 2 3 4 5 6 s1 1 2 2 Q0 0 1 1 t2 2 a5 5 30 1 0 10 10 A1 1 0 0 1 2 2 Z",
            "M1e-3 4.25e2",
        ];
        for src in sources {
            let parsed = parse(src).unwrap();
            let text = serialize(&parsed);
            assert_eq!(parse(&text).unwrap(), parsed, "round trip of {src:?} via {text:?}");
        }
    }

    #[test]
    fn test_morph_compatibility() {
        let a = parse("M0 0 L10 10 Z").unwrap();
        let b = parse("M5 5 L0 0 Z").unwrap();
        let c = parse("M0 0 l10 10 Z").unwrap();
        let d = parse("M0 0 L10 10 20 20 Z").unwrap();

        for (x, y) in [(&a, &b), (&a, &c), (&a, &d), (&c, &d)] {
            assert_eq!(morph_compatible(x, y), morph_compatible(y, x));
        }
        assert!(morph_compatible(&a, &b));
        assert!(!morph_compatible(&a, &c));
        assert!(!morph_compatible(&a, &d));
    }

    #[test]
    fn test_interpolate() {
        let a = parse("M0 0 L10 20").unwrap();
        let b = parse("M10 10 L20 0").unwrap();
        let mid = interpolate(&a, &b, 0.5).unwrap();
        assert_eq!(mid[0].params, vec![5.0, 5.0]);
        assert_eq!(mid[1].params, vec![15.0, 10.0]);

        let c = parse("M0 0 L1 1 Z").unwrap();
        assert!(interpolate(&a, &c, 0.5).is_none());
    }
}
