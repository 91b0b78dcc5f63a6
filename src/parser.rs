use crate::block_spec::{BlockSpec, StateValue, DEFAULT_NAMESPACE};
use crate::command::{Command, FillMode};
use crate::coordinate::{Coordinate, Position};
use crate::error::{HolodeckError, Result};
use smol_str::SmolStr;

/// Recursive-descent parser for `/setblock` and `/fill` command text.
///
/// Parsing is pure and deterministic: the same text always yields a
/// structurally equal [`Command`], and nothing here touches the world.
///
/// The default namespace applied to bare block ids is per-parser
/// configuration, so parsers with different defaults can coexist.
#[derive(Debug, Clone)]
pub struct CommandParser {
    default_namespace: SmolStr,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        CommandParser {
            default_namespace: DEFAULT_NAMESPACE.into(),
        }
    }

    pub fn with_namespace(namespace: impl Into<SmolStr>) -> Self {
        CommandParser {
            default_namespace: namespace.into(),
        }
    }

    /// Parse a command string into its AST.
    ///
    /// A leading `/` is optional. Any grammar violation surfaces as
    /// [`HolodeckError::Syntax`].
    pub fn parse(&self, command: &str) -> Result<Command> {
        let text = command.trim();
        let text = text.strip_prefix('/').unwrap_or(text);

        let mut tokens = text.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| HolodeckError::Syntax("empty command".to_string()))?;

        match verb {
            "setblock" => self.parse_setblock(&mut tokens),
            "fill" => self.parse_fill(&mut tokens),
            other => Err(HolodeckError::Syntax(format!(
                "unknown command: {}",
                other
            ))),
        }
    }

    /// Lenient per-line parse for scripts: `None` for blank lines,
    /// `#`-comments, and lines that fail to parse.
    ///
    /// Analysis and placement tolerate malformed input by contract; this is
    /// their entry point so the strict error path stays intact for direct
    /// execution.
    pub fn parse_lenient(&self, line: &str) -> Option<Command> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        self.parse(trimmed).ok()
    }

    fn parse_setblock<'a>(&self, tokens: &mut impl Iterator<Item = &'a str>) -> Result<Command> {
        let position = self.parse_position(tokens)?;
        let block = self.parse_block_spec(next_token(tokens, "block")?)?;
        expect_end(tokens)?;
        Ok(Command::SetBlock { position, block })
    }

    fn parse_fill<'a>(&self, tokens: &mut impl Iterator<Item = &'a str>) -> Result<Command> {
        let pos1 = self.parse_position(tokens)?;
        let pos2 = self.parse_position(tokens)?;
        let block = self.parse_block_spec(next_token(tokens, "block")?)?;
        let mode = match tokens.next() {
            Some(word) => FillMode::from_keyword(word)
                .ok_or_else(|| HolodeckError::Syntax(format!("unknown fill mode: {}", word)))?,
            None => FillMode::Replace,
        };
        expect_end(tokens)?;
        Ok(Command::Fill {
            pos1,
            pos2,
            block,
            mode,
        })
    }

    fn parse_position<'a>(&self, tokens: &mut impl Iterator<Item = &'a str>) -> Result<Position> {
        let x = parse_coordinate(next_token(tokens, "x coordinate")?)?;
        let y = parse_coordinate(next_token(tokens, "y coordinate")?)?;
        let z = parse_coordinate(next_token(tokens, "z coordinate")?)?;
        Ok(Position::new(x, y, z))
    }

    fn parse_block_spec(&self, token: &str) -> Result<BlockSpec> {
        let (id_part, states_part) = match token.find('[') {
            Some(open) => {
                let inner = token[open..]
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .ok_or_else(|| {
                        HolodeckError::Syntax(format!("malformed block states: {}", token))
                    })?;
                (&token[..open], Some(inner))
            }
            None => (token, None),
        };

        let (namespace, id) = match id_part.split_once(':') {
            Some((ns, id)) => (SmolStr::from(ns), SmolStr::from(id)),
            None => (self.default_namespace.clone(), SmolStr::from(id_part)),
        };
        if !is_identifier(&namespace) || !is_identifier(&id) {
            return Err(HolodeckError::Syntax(format!(
                "invalid block id: {}",
                id_part
            )));
        }

        let mut block = BlockSpec::new(namespace, id);
        if let Some(inner) = states_part {
            for pair in inner.split(',') {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    HolodeckError::Syntax(format!("malformed state pair: {}", pair))
                })?;
                if key.is_empty() || value.is_empty() {
                    return Err(HolodeckError::Syntax(format!(
                        "malformed state pair: {}",
                        pair
                    )));
                }
                block.set_state(SmolStr::from(key), coerce_state_value(value));
            }
        }
        Ok(block)
    }
}

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>, expected: &str) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| HolodeckError::Syntax(format!("missing {}", expected)))
}

fn expect_end<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<()> {
    match tokens.next() {
        Some(extra) => Err(HolodeckError::Syntax(format!(
            "unexpected trailing argument: {}",
            extra
        ))),
        None => Ok(()),
    }
}

/// `<signed-int>`, `~`, or `~<signed-int>`. A bare `~` is offset zero.
fn parse_coordinate(token: &str) -> Result<Coordinate> {
    if let Some(rest) = token.strip_prefix('~') {
        if rest.is_empty() {
            return Ok(Coordinate::relative(0));
        }
        let offset = parse_int(rest)?;
        return Ok(Coordinate::relative(offset));
    }
    parse_int(token).map(Coordinate::absolute)
}

fn parse_int(token: &str) -> Result<i32> {
    token
        .parse::<i32>()
        .map_err(|_| HolodeckError::Syntax(format!("expected integer, got: {}", token)))
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
}

/// `true`/`false` become booleans, optional-sign digit strings integers,
/// everything else stays a string.
fn coerce_state_value(token: &str) -> StateValue {
    match token {
        "true" => return StateValue::Bool(true),
        "false" => return StateValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = token.parse::<i64>() {
        return StateValue::Int(i);
    }
    StateValue::Str(token.into())
}

#[cfg(test)]
mod tests {
    use super::CommandParser;
    use crate::command::{Command, FillMode};

    #[test]
    fn test_relative_coordinate_forms() {
        let parser = CommandParser::new();
        let cmd = parser.parse("/setblock ~ ~5 ~-3 stone").unwrap();
        match cmd {
            Command::SetBlock { position, .. } => {
                assert!(position.x.relative);
                assert_eq!(position.x.value, 0);
                assert_eq!(position.y.value, 5);
                assert_eq!(position.z.value, -3);
            }
            _ => panic!("expected setblock"),
        }
    }

    #[test]
    fn test_fill_mode_default() {
        let parser = CommandParser::new();
        match parser.parse("/fill 0 0 0 1 1 1 stone").unwrap() {
            Command::Fill { mode, .. } => assert_eq!(mode, FillMode::Replace),
            _ => panic!("expected fill"),
        }
    }

    #[test]
    fn test_custom_default_namespace() {
        let parser = CommandParser::with_namespace("mymod");
        match parser.parse("setblock 0 0 0 widget").unwrap() {
            Command::SetBlock { block, .. } => {
                assert_eq!(block.full_id(), "mymod:widget");
            }
            _ => panic!("expected setblock"),
        }
    }

    #[test]
    fn test_lenient_mode() {
        let parser = CommandParser::new();
        assert!(parser.parse_lenient("").is_none());
        assert!(parser.parse_lenient("# a comment").is_none());
        assert!(parser.parse_lenient("garbage 1 2 3").is_none());
        assert!(parser.parse_lenient("/setblock 0 64 0 stone").is_some());
    }
}
