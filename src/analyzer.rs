use crate::bounding_box::BoundingBox;
use crate::command::Command;
use crate::parser::CommandParser;
use crate::script::Script;
use serde::{Deserialize, Serialize};

/// Extent of a structure's lowest occupied absolute Y level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
    pub y_level: i32,
    pub block_count: u64,
}

impl Footprint {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn depth(&self) -> i32 {
        self.max_z - self.min_z + 1
    }
}

/// Extent and block count of a structure at one queried Y level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceInfo {
    pub y: i32,
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
    pub block_count: u64,
}

impl SliceInfo {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn depth(&self) -> i32 {
        self.max_z - self.min_z + 1
    }
}

/// Running min/max per axis over absolute coordinates only.
///
/// Axes fold independently: the x bound may come from a different command
/// than the y bound. An axis no absolute coordinate ever touched stays
/// unobserved and collapses to 0 in the resulting box.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct CoordinateBounds {
    min: [Option<i32>; 3],
    max: [Option<i32>; 3],
}

impl CoordinateBounds {
    pub(crate) fn observe_command(&mut self, command: &Command) {
        for pos in command.positions() {
            for (axis, coord) in [(0, pos.x), (1, pos.y), (2, pos.z)] {
                if !coord.relative {
                    self.observe(axis, coord.value);
                }
            }
        }
    }

    fn observe(&mut self, axis: usize, value: i32) {
        self.min[axis] = Some(self.min[axis].map_or(value, |m| m.min(value)));
        self.max[axis] = Some(self.max[axis].map_or(value, |m| m.max(value)));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.min.iter().all(|m| m.is_none())
    }

    pub(crate) fn to_bounding_box(self) -> BoundingBox {
        if self.is_empty() {
            return BoundingBox::EMPTY;
        }
        BoundingBox::new(
            self.min[0].unwrap_or(0),
            self.min[1].unwrap_or(0),
            self.min[2].unwrap_or(0),
            self.max[0].unwrap_or(0),
            self.max[1].unwrap_or(0),
            self.max[2].unwrap_or(0),
        )
    }

    /// Minimum observed coordinate per axis, 0 where unobserved.
    pub(crate) fn base_point(&self) -> (i32, i32, i32) {
        (
            self.min[0].unwrap_or(0),
            self.min[1].unwrap_or(0),
            self.min[2].unwrap_or(0),
        )
    }
}

/// Measures structure scripts: bounding box, base footprint, per-Y slices.
///
/// Analysis is best-effort by contract: unparseable lines and relative
/// coordinates are excluded from measurement, never reported as errors.
pub struct StructureAnalyzer {
    parser: CommandParser,
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureAnalyzer {
    pub fn new() -> Self {
        StructureAnalyzer {
            parser: CommandParser::new(),
        }
    }

    /// Minimal box containing every absolute coordinate the script touches.
    /// Returns the empty sentinel when none is observed.
    pub fn bounding_box(&self, script: &Script) -> BoundingBox {
        self.bounds(script).to_bounding_box()
    }

    pub(crate) fn bounds(&self, script: &Script) -> CoordinateBounds {
        let mut bounds = CoordinateBounds::default();
        for command in script.commands(&self.parser) {
            bounds.observe_command(&command);
        }
        bounds
    }

    /// Extent and block count at the structure's minimum absolute Y level.
    pub fn base_footprint(&self, script: &Script) -> Footprint {
        let commands: Vec<Command> = script.commands(&self.parser).collect();

        let min_y = commands
            .iter()
            .flat_map(|cmd| cmd.positions())
            .filter(|pos| !pos.y.relative)
            .map(|pos| pos.y.value)
            .min();

        let min_y = match min_y {
            Some(y) => y,
            None => {
                return Footprint {
                    min_x: 0,
                    max_x: 0,
                    min_z: 0,
                    max_z: 0,
                    y_level: 0,
                    block_count: 0,
                }
            }
        };

        let slice = slice_of_commands(&commands, min_y);
        Footprint {
            min_x: slice.min_x,
            max_x: slice.max_x,
            min_z: slice.min_z,
            max_z: slice.max_z,
            y_level: min_y,
            block_count: slice.block_count,
        }
    }

    /// Extent and estimated block count at an arbitrary Y level.
    pub fn slice_at_y(&self, script: &Script, y: i32) -> SliceInfo {
        let commands: Vec<Command> = script.commands(&self.parser).collect();
        slice_of_commands(&commands, y)
    }

    /// X extent at a Y level.
    pub fn width_at_y(&self, script: &Script, y: i32) -> i32 {
        self.slice_at_y(script, y).width()
    }

    /// Z extent at a Y level.
    pub fn depth_at_y(&self, script: &Script, y: i32) -> i32 {
        self.slice_at_y(script, y).depth()
    }

    /// Total structure height from the bounding box.
    pub fn height(&self, script: &Script) -> i32 {
        self.bounding_box(script).height()
    }
}

fn slice_of_commands(commands: &[Command], y: i32) -> SliceInfo {
    let mut min_x: Option<i32> = None;
    let mut max_x: Option<i32> = None;
    let mut min_z: Option<i32> = None;
    let mut max_z: Option<i32> = None;
    let mut block_count = 0u64;

    for command in commands {
        match command {
            Command::SetBlock { position, .. } => {
                if !position.y.relative && position.y.value == y {
                    if !position.x.relative {
                        min_x = Some(min_x.map_or(position.x.value, |m| m.min(position.x.value)));
                        max_x = Some(max_x.map_or(position.x.value, |m| m.max(position.x.value)));
                    }
                    if !position.z.relative {
                        min_z = Some(min_z.map_or(position.z.value, |m| m.min(position.z.value)));
                        max_z = Some(max_z.map_or(position.z.value, |m| m.max(position.z.value)));
                    }
                    block_count += 1;
                }
            }
            Command::Fill { pos1, pos2, .. } => {
                // The fill only has a fixed vertical extent when both
                // endpoint y's are absolute.
                if pos1.y.relative || pos2.y.relative {
                    continue;
                }
                let y_min = pos1.y.value.min(pos2.y.value);
                let y_max = pos1.y.value.max(pos2.y.value);
                if y < y_min || y > y_max {
                    continue;
                }

                if !pos1.x.relative && !pos2.x.relative {
                    let lo = pos1.x.value.min(pos2.x.value);
                    let hi = pos1.x.value.max(pos2.x.value);
                    min_x = Some(min_x.map_or(lo, |m| m.min(lo)));
                    max_x = Some(max_x.map_or(hi, |m| m.max(hi)));
                }
                if !pos1.z.relative && !pos2.z.relative {
                    let lo = pos1.z.value.min(pos2.z.value);
                    let hi = pos1.z.value.max(pos2.z.value);
                    min_z = Some(min_z.map_or(lo, |m| m.min(lo)));
                    max_z = Some(max_z.map_or(hi, |m| m.max(hi)));
                }

                // Horizontal cross-section area, counted once per queried
                // level; an estimate, not a mode-aware cell count.
                let x_range = (pos2.x.value - pos1.x.value).unsigned_abs() as u64 + 1;
                let z_range = (pos2.z.value - pos1.z.value).unsigned_abs() as u64 + 1;
                block_count += x_range * z_range;
            }
        }
    }

    match (min_x, max_x) {
        (Some(min_x), Some(max_x)) => SliceInfo {
            y,
            min_x,
            max_x,
            min_z: min_z.unwrap_or(0),
            max_z: max_z.unwrap_or(0),
            block_count,
        },
        _ => SliceInfo {
            y,
            min_x: 0,
            max_x: 0,
            min_z: 0,
            max_z: 0,
            block_count: 0,
        },
    }
}
