use crate::analyzer::StructureAnalyzer;
use crate::bounding_box::BoundingBox;
use crate::command::Command;
use crate::coordinate::{Coordinate, Position};
use crate::error::Result;
use crate::parser::CommandParser;
use crate::script::Script;
use std::fs;
use std::path::Path;

/// Rewrites absolute-coordinate scripts into origin-relative form.
///
/// The base point defaults to the minimum absolute coordinate per axis, so
/// a converted script replays anywhere with `~`-offsets from its origin.
pub struct ScriptConverter {
    parser: CommandParser,
    analyzer: StructureAnalyzer,
}

impl Default for ScriptConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptConverter {
    pub fn new() -> Self {
        ScriptConverter {
            parser: CommandParser::new(),
            analyzer: StructureAnalyzer::new(),
        }
    }

    /// Bounding box of a script's absolute coordinates.
    pub fn analyze_script(&self, script: &Script) -> BoundingBox {
        self.analyzer.bounding_box(script)
    }

    /// Minimum absolute coordinate per axis; (0, 0, 0) when the script has
    /// none.
    pub fn detect_base_point(&self, script: &Script) -> (i32, i32, i32) {
        self.analyzer.bounds(script).base_point()
    }

    /// Rewrite every command origin-relative to `base_point`.
    ///
    /// Comments and blank lines pass through verbatim; non-comment lines
    /// that fail to parse are warned about and preserved as-is.
    pub fn convert_script(&self, script: &Script, base_point: (i32, i32, i32)) -> Vec<String> {
        let mut output = Vec::with_capacity(script.len());
        for (line_number, line) in script.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                output.push(trimmed.to_string());
                continue;
            }
            match self.parser.parse(trimmed) {
                Ok(command) => {
                    output.push(convert_command(&command, base_point).to_string());
                }
                Err(err) => {
                    log::warn!("could not parse line {}: {}", line_number + 1, err);
                    output.push(trimmed.to_string());
                }
            }
        }
        output
    }

    /// Convert a script file, writing the relative version plus a usage
    /// header to `output_path`.
    ///
    /// The base point is taken from `base_point` when given, auto-detected
    /// from minimum coordinates when `auto_detect` is set, and (0, 0, 0)
    /// otherwise. Returns the base point used and the structure's bounding
    /// box.
    pub fn convert_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        base_point: Option<(i32, i32, i32)>,
        auto_detect: bool,
    ) -> Result<((i32, i32, i32), BoundingBox)> {
        let script = Script::from_path(input_path)?;

        let base_point = match base_point {
            Some(point) => point,
            None if auto_detect => self.detect_base_point(&script),
            None => (0, 0, 0),
        };
        let bbox = self.analyze_script(&script);

        let mut lines = header_lines(base_point, &bbox, output_path.as_ref());
        lines.extend(self.convert_script(&script, base_point));

        let mut text = lines.join("\n");
        text.push('\n');
        fs::write(output_path, text)?;

        Ok((base_point, bbox))
    }
}

/// Rebase a command around `base_point`: absolute coordinates become
/// offsets from it, already-relative coordinates pass through. Shared by
/// script conversion and by structure placement, which replays scripts in
/// rebased form so a structure lands wherever its origin is computed.
pub(crate) fn convert_command(command: &Command, base_point: (i32, i32, i32)) -> Command {
    match command {
        Command::SetBlock { position, block } => Command::SetBlock {
            position: convert_position(position, base_point),
            block: block.clone(),
        },
        Command::Fill {
            pos1,
            pos2,
            block,
            mode,
        } => Command::Fill {
            pos1: convert_position(pos1, base_point),
            pos2: convert_position(pos2, base_point),
            block: block.clone(),
            mode: *mode,
        },
    }
}

fn convert_position(position: &Position, base_point: (i32, i32, i32)) -> Position {
    Position::new(
        convert_coordinate(position.x, base_point.0),
        convert_coordinate(position.y, base_point.1),
        convert_coordinate(position.z, base_point.2),
    )
}

fn convert_coordinate(coordinate: Coordinate, base: i32) -> Coordinate {
    if coordinate.relative {
        coordinate
    } else {
        Coordinate::relative(coordinate.value - base)
    }
}

fn header_lines(base_point: (i32, i32, i32), bbox: &BoundingBox, output: &Path) -> Vec<String> {
    let (x, y, z) = base_point;
    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut lines = vec![
        "# Converted to relative coordinates".to_string(),
        format!("# Base point: {}, {}, {}", x, y, z),
        "#".to_string(),
        "# Structure extents:".to_string(),
    ];
    for extent_line in bbox.to_string().lines() {
        lines.push(format!("#   {}", extent_line));
    }
    lines.push("#".to_string());
    lines.push("# For base-to-base placement (e.g., 10 blocks east):".to_string());
    lines.push(format!("#   Structure 1: --origin {},{},{}", x, y, z));
    lines.push(format!(
        "#   Structure 2: --origin {},{},{} (width={}, gap=10)",
        x + bbox.width() + 10,
        y,
        z,
        bbox.width()
    ));
    lines.push("#".to_string());
    lines.push("# Basic usage:".to_string());
    lines.push(format!(
        "#   holodeck batch <world> {} --origin {},{},{}",
        output_name, x, y, z
    ));
    lines.push(String::new());
    lines
}
