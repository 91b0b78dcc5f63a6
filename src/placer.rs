use crate::analyzer::StructureAnalyzer;
use crate::bounding_box::BoundingBox;
use crate::converter::convert_command;
use crate::editor::WorldEditor;
use crate::error::{HolodeckError, Result};
use crate::script::Script;
use crate::world::WorldBackend;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reference point within a structure's bounding box that aligns to the
/// requested placement position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Position is the minimum corner (the script origin).
    #[default]
    Corner,
    /// Position is the center of the bounding box.
    Center,
    /// Position is the center of the base; Y stays at the base level.
    BaseCenter,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Corner => "corner",
            Anchor::Center => "center",
            Anchor::BaseCenter => "base-center",
        }
    }
}

impl FromStr for Anchor {
    type Err = HolodeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "corner" => Ok(Anchor::Corner),
            "center" => Ok(Anchor::Center),
            "base-center" => Ok(Anchor::BaseCenter),
            other => Err(HolodeckError::Placement(format!(
                "unknown anchor type: {}",
                other
            ))),
        }
    }
}

/// Axis-aligned placement directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
    /// +Y
    Up,
    /// -Y
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = HolodeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(HolodeckError::Placement(format!(
                "unknown direction: {}",
                other
            ))),
        }
    }
}

/// Outcome of one placement call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub blocks_placed: u64,
    pub bounding_box: BoundingBox,
    pub origin_used: (i32, i32, i32),
}

/// Places structure scripts using measured dimensions instead of
/// origin-to-origin offsets.
///
/// Anchors map a target position to a script origin; adjacency and grid
/// layouts space structures base-to-base from their bounding boxes.
pub struct StructurePlacer<B: WorldBackend> {
    editor: WorldEditor<B>,
    analyzer: StructureAnalyzer,
}

impl<B: WorldBackend> StructurePlacer<B> {
    pub fn new(backend: B) -> Self {
        StructurePlacer {
            editor: WorldEditor::new(backend),
            analyzer: StructureAnalyzer::new(),
        }
    }

    pub fn analyzer(&self) -> &StructureAnalyzer {
        &self.analyzer
    }

    pub fn backend(&self) -> &B {
        self.editor.backend()
    }

    pub fn into_backend(self) -> B {
        self.editor.into_backend()
    }

    /// Place a script so that `anchor` lands on `position`.
    pub fn place_at(
        &mut self,
        script: &Script,
        position: (i32, i32, i32),
        anchor: Anchor,
    ) -> PlacementResult {
        let bbox = self.analyzer.bounding_box(script);
        let origin = origin_from_anchor(position, &bbox, anchor);
        let blocks_placed = self.execute_script(script, origin);
        PlacementResult {
            blocks_placed,
            bounding_box: bbox,
            origin_used: origin,
        }
    }

    /// Place a script next to a reference position, spaced base-to-base.
    ///
    /// With a reference script the offset covers the reference's measured
    /// extent; without one the reference is treated as a zero-size point.
    pub fn place_adjacent(
        &mut self,
        script: &Script,
        relative_to: (i32, i32, i32),
        direction: Direction,
        gap: i32,
        reference_script: Option<&Script>,
    ) -> PlacementResult {
        let bbox = self.analyzer.bounding_box(script);
        let ref_bbox = reference_script
            .map(|s| self.analyzer.bounding_box(s))
            .unwrap_or(BoundingBox::EMPTY);

        let origin = adjacent_origin(relative_to, &bbox, &ref_bbox, direction, gap);
        log::debug!(
            "adjacent placement {} of {:?}: origin {:?}",
            direction.as_str(),
            relative_to,
            origin
        );
        let blocks_placed = self.execute_script(script, origin);
        PlacementResult {
            blocks_placed,
            bounding_box: bbox,
            origin_used: origin,
        }
    }

    /// Place copies of a script in a `(cols, rows)` grid, row-major, with
    /// `spacing` clear blocks between neighbors in X and Z.
    pub fn place_grid(
        &mut self,
        script: &Script,
        start: (i32, i32, i32),
        grid_size: (u32, u32),
        spacing: (i32, i32),
        anchor: Anchor,
    ) -> Vec<PlacementResult> {
        let bbox = self.analyzer.bounding_box(script);
        let (cols, rows) = grid_size;
        let (x_spacing, z_spacing) = spacing;

        let mut results = Vec::with_capacity((cols as usize) * (rows as usize));
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let position = (
                    start.0 + col * (bbox.width() + x_spacing),
                    start.1,
                    start.2 + row * (bbox.depth() + z_spacing),
                );
                results.push(self.place_at(script, position, anchor));
            }
        }
        results
    }

    pub fn persist(&mut self) -> Result<()> {
        self.editor.persist()
    }

    pub fn release(&mut self) -> Result<()> {
        self.editor.release()
    }

    /// Replay a script at the given origin, best-effort: lines that fail to
    /// parse or execute are skipped without aborting the rest.
    ///
    /// Commands are rebased around the script's own base point first, so an
    /// absolute-coordinate structure lands at the computed origin instead
    /// of wherever it was authored.
    fn execute_script(&mut self, script: &Script, origin: (i32, i32, i32)) -> u64 {
        let base_point = self.analyzer.bounds(script).base_point();
        self.editor.set_origin(origin);

        let mut blocks_placed = 0u64;
        for line in script.lines() {
            let command = match self.editor.parser().parse_lenient(line) {
                Some(command) => command,
                None => continue,
            };
            let command = convert_command(&command, base_point);
            match self.editor.execute_command(&command) {
                Ok(count) => blocks_placed += count,
                Err(err) => {
                    log::warn!("skipping failed command {:?}: {}", line, err);
                }
            }
        }
        blocks_placed
    }
}

fn origin_from_anchor(
    position: (i32, i32, i32),
    bbox: &BoundingBox,
    anchor: Anchor,
) -> (i32, i32, i32) {
    let (x, y, z) = position;
    match anchor {
        Anchor::Corner => (x, y, z),
        Anchor::Center => (
            x - bbox.width() / 2,
            y - bbox.height() / 2,
            z - bbox.depth() / 2,
        ),
        Anchor::BaseCenter => (x - bbox.width() / 2, y, z - bbox.depth() / 2),
    }
}

fn adjacent_origin(
    relative_to: (i32, i32, i32),
    bbox: &BoundingBox,
    ref_bbox: &BoundingBox,
    direction: Direction,
    gap: i32,
) -> (i32, i32, i32) {
    let (x, y, z) = relative_to;
    match direction {
        // Positive directions step past the reference's extent; negative
        // directions step back by the new structure's own extent.
        Direction::East => (x + ref_bbox.width() + gap, y, z),
        Direction::West => (x - bbox.width() - gap, y, z),
        Direction::South => (x, y, z + ref_bbox.depth() + gap),
        Direction::North => (x, y, z - bbox.depth() - gap),
        Direction::Up => (x, y + ref_bbox.height() + gap, z),
        Direction::Down => (x, y - bbox.height() - gap, z),
    }
}
