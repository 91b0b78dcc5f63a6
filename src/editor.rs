use crate::block_spec::BlockSpec;
use crate::command::{Command, FillMode};
use crate::error::Result;
use crate::parser::CommandParser;
use crate::world::WorldBackend;

/// Executes parsed commands against a world backend.
///
/// Relative coordinates resolve against the editor's origin. One command's
/// writes complete before the next command is resolved; there is no
/// internal retry.
pub struct WorldEditor<B: WorldBackend> {
    backend: B,
    origin: (i32, i32, i32),
    parser: CommandParser,
}

impl<B: WorldBackend> WorldEditor<B> {
    pub fn new(backend: B) -> Self {
        WorldEditor {
            backend,
            origin: (0, 0, 0),
            parser: CommandParser::new(),
        }
    }

    pub fn with_origin(backend: B, origin: (i32, i32, i32)) -> Self {
        WorldEditor {
            backend,
            origin,
            parser: CommandParser::new(),
        }
    }

    pub fn origin(&self) -> (i32, i32, i32) {
        self.origin
    }

    pub fn set_origin(&mut self, origin: (i32, i32, i32)) {
        self.origin = origin;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Parse and execute one command, returning the number of blocks
    /// written with the command's block.
    pub fn execute(&mut self, command: &str) -> Result<u64> {
        let ast = self.parser.parse(command)?;
        self.execute_command(&ast)
    }

    /// Execute a pre-parsed command.
    pub fn execute_command(&mut self, command: &Command) -> Result<u64> {
        match command {
            Command::SetBlock { position, block } => {
                let (x, y, z) = position.resolve(self.origin);
                self.backend.write_block(x, y, z, block)?;
                Ok(1)
            }
            Command::Fill {
                pos1,
                pos2,
                block,
                mode,
            } => {
                let p1 = pos1.resolve(self.origin);
                let p2 = pos2.resolve(self.origin);
                self.fill_region(p1, p2, block, *mode)
            }
        }
    }

    /// Fill an axis-aligned region. Endpoints may be given in any order.
    ///
    /// The returned count covers cells written with `block`; the air writes
    /// of hollow interiors are excluded.
    pub fn fill_region(
        &mut self,
        p1: (i32, i32, i32),
        p2: (i32, i32, i32),
        block: &BlockSpec,
        mode: FillMode,
    ) -> Result<u64> {
        let (min_x, max_x) = (p1.0.min(p2.0), p1.0.max(p2.0));
        let (min_y, max_y) = (p1.1.min(p2.1), p1.1.max(p2.1));
        let (min_z, max_z) = (p1.2.min(p2.2), p1.2.max(p2.2));
        let min = (min_x, min_y, min_z);
        let max = (max_x, max_y, max_z);

        match mode {
            // destroy has no drop semantics here; it writes like replace
            FillMode::Replace | FillMode::Destroy => self.fill_basic(min, max, block),
            FillMode::Hollow => self.fill_hollow(min, max, block),
            FillMode::Keep => self.fill_keep(min, max, block),
            FillMode::Outline => self.fill_outline(min, max, block),
        }
    }

    pub fn persist(&mut self) -> Result<()> {
        self.backend.persist()
    }

    pub fn release(&mut self) -> Result<()> {
        self.backend.release()
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn fill_basic(
        &mut self,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block: &BlockSpec,
    ) -> Result<u64> {
        let mut count = 0u64;
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    self.backend.write_block(x, y, z, block)?;
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    fn fill_hollow(
        &mut self,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block: &BlockSpec,
    ) -> Result<u64> {
        let air = BlockSpec::air();
        let mut count = 0u64;
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    let on_shell = x == min.0
                        || x == max.0
                        || y == min.1
                        || y == max.1
                        || z == min.2
                        || z == max.2;
                    if on_shell {
                        self.backend.write_block(x, y, z, block)?;
                        count += 1;
                    } else {
                        self.backend.write_block(x, y, z, &air)?;
                    }
                }
            }
        }
        Ok(count)
    }

    fn fill_keep(
        &mut self,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block: &BlockSpec,
    ) -> Result<u64> {
        let mut count = 0u64;
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    if self.backend.read_block(x, y, z)?.is_air() {
                        self.backend.write_block(x, y, z, block)?;
                        count += 1;
                    }
                }
            }
        }
        Ok(count)
    }

    /// Writes the 12 edges of the box: cells touching at least two min/max
    /// extremes. An axis collapsed to a single cell sits at both of its
    /// extremes, so degenerate boxes outline as solid shells. Face interiors
    /// and the inside are left untouched, and each edge cell is written
    /// exactly once.
    fn fill_outline(
        &mut self,
        min: (i32, i32, i32),
        max: (i32, i32, i32),
        block: &BlockSpec,
    ) -> Result<u64> {
        let mut count = 0u64;
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    let extremes = (x == min.0) as u8
                        + (x == max.0) as u8
                        + (y == min.1) as u8
                        + (y == max.1) as u8
                        + (z == min.2) as u8
                        + (z == max.2) as u8;
                    if extremes >= 2 {
                        self.backend.write_block(x, y, z, block)?;
                        count += 1;
                    }
                }
            }
        }
        Ok(count)
    }
}
