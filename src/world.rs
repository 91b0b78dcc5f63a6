use crate::block_spec::BlockSpec;
use crate::error::Result;
use rustc_hash::FxHashMap;

/// Narrow interface to a block-addressable world store.
///
/// The command layer only needs single-block reads and writes plus session
/// flush/close; region files, chunk formats, and interning strategies stay
/// behind this seam. Failures surface as
/// [`HolodeckError::WorldOperation`](crate::HolodeckError::WorldOperation).
pub trait WorldBackend {
    fn write_block(&mut self, x: i32, y: i32, z: i32, block: &BlockSpec) -> Result<()>;

    /// Current occupant of a cell; unset cells read as air.
    fn read_block(&self, x: i32, y: i32, z: i32) -> Result<BlockSpec>;

    /// Flush pending writes.
    fn persist(&mut self) -> Result<()>;

    /// Close the session. Further use is a caller error.
    fn release(&mut self) -> Result<()>;
}

/// In-memory sparse world keyed by absolute coordinates.
///
/// Block specs are interned in a palette so repeated writes of the same spec
/// share one entry; cells store palette indices. Air occupies slot 0.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    palette: Vec<BlockSpec>,
    palette_index: FxHashMap<BlockSpec, usize>,
    cells: FxHashMap<(i32, i32, i32), usize>,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorld {
    pub fn new() -> Self {
        let air = BlockSpec::air();
        let mut palette_index = FxHashMap::default();
        palette_index.insert(air.clone(), 0);
        MemoryWorld {
            palette: vec![air],
            palette_index,
            cells: FxHashMap::default(),
        }
    }

    fn get_or_insert_in_palette(&mut self, block: &BlockSpec) -> usize {
        match self.palette_index.get(block) {
            Some(&index) => index,
            None => {
                let index = self.palette.len();
                self.palette.push(block.clone());
                self.palette_index.insert(block.clone(), index);
                index
            }
        }
    }

    /// Number of cells holding a non-air block.
    pub fn block_count(&self) -> usize {
        self.cells.values().filter(|&&idx| idx != 0).count()
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> &BlockSpec {
        match self.cells.get(&(x, y, z)) {
            Some(&idx) => &self.palette[idx],
            None => &self.palette[0],
        }
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

impl WorldBackend for MemoryWorld {
    fn write_block(&mut self, x: i32, y: i32, z: i32, block: &BlockSpec) -> Result<()> {
        let index = self.get_or_insert_in_palette(block);
        self.cells.insert((x, y, z), index);
        Ok(())
    }

    fn read_block(&self, x: i32, y: i32, z: i32) -> Result<BlockSpec> {
        Ok(self.get(x, y, z).clone())
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}
