use crate::block_spec::BlockSpec;
use crate::coordinate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy controlling which cells of a fill region receive the target block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    #[default]
    Replace,
    // Currently identical to Replace; kept as a distinct keyword for
    // command-text fidelity.
    Destroy,
    Hollow,
    Keep,
    Outline,
}

impl FillMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FillMode::Replace => "replace",
            FillMode::Destroy => "destroy",
            FillMode::Hollow => "hollow",
            FillMode::Keep => "keep",
            FillMode::Outline => "outline",
        }
    }

    pub fn from_keyword(s: &str) -> Option<FillMode> {
        match s {
            "replace" => Some(FillMode::Replace),
            "destroy" => Some(FillMode::Destroy),
            "hollow" => Some(FillMode::Hollow),
            "keep" => Some(FillMode::Keep),
            "outline" => Some(FillMode::Outline),
            _ => None,
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed world-editing command.
///
/// Closed union: every consumer matches exhaustively, so adding a variant is
/// a compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SetBlock {
        position: Position,
        block: BlockSpec,
    },
    Fill {
        pos1: Position,
        pos2: Position,
        block: BlockSpec,
        mode: FillMode,
    },
}

impl Command {
    /// Positions referenced by this command, in command order.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        let (first, second) = match self {
            Command::SetBlock { position, .. } => (position, None),
            Command::Fill { pos1, pos2, .. } => (pos1, Some(pos2)),
        };
        std::iter::once(first).chain(second)
    }
}

impl fmt::Display for Command {
    /// Canonical command text, re-parseable by the parser.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetBlock { position, block } => {
                write!(f, "/setblock {} {}", position, block)
            }
            Command::Fill {
                pos1,
                pos2,
                block,
                mode,
            } => {
                write!(f, "/fill {} {} {}", pos1, pos2, block)?;
                if *mode != FillMode::Replace {
                    write!(f, " {}", mode)?;
                }
                Ok(())
            }
        }
    }
}
