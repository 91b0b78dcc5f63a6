//! Command-language front-end and structure placement for Minecraft worlds.
//!
//! Parses `/setblock` and `/fill` command text into typed ASTs, measures
//! command scripts (bounding boxes, footprints, per-level slices), and
//! places scripts relative to anchors, neighboring structures, or grid
//! layouts through a narrow world-backend seam.

mod analyzer;
mod block_spec;
mod bounding_box;
mod command;
mod converter;
mod coordinate;
mod editor;
mod error;
mod parser;
mod placer;
mod script;
mod world;

pub use analyzer::{Footprint, SliceInfo, StructureAnalyzer};
pub use block_spec::{BlockSpec, StateValue, DEFAULT_NAMESPACE};
pub use bounding_box::BoundingBox;
pub use command::{Command, FillMode};
pub use converter::ScriptConverter;
pub use coordinate::{Coordinate, Position};
pub use editor::WorldEditor;
pub use error::{HolodeckError, Result};
pub use parser::CommandParser;
pub use placer::{Anchor, Direction, PlacementResult, StructurePlacer};
pub use script::Script;
pub use world::{MemoryWorld, WorldBackend};
