//! Draw-order planning.
//!
//! Colors with the most runs are drawn first so later, smaller colors paint
//! over them rather than being buried.

use tracing::debug;

use crate::instructions::{Instruction, InstructionStore, StoreError};
use crate::palette::PaletteCoord;

/// A palette coordinate and the number of runs stored for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedColor {
    pub coord: PaletteCoord,
    pub runs: usize,
}

/// Orders the keys of an instruction store for replay.
///
/// Keys are first placed in palette enumeration order, then stably sorted by
/// run count descending, so equal counts keep enumeration order. Every key
/// appears exactly once.
///
/// # Example
///
/// ```
/// use paint_quantize::{DrawOrderPlanner, InstructionStore, MemoryStore, PaletteCoord};
///
/// let mut store = MemoryStore::new();
/// store.put(PaletteCoord::new(0, 0), "[0,0,1];").unwrap();
/// store.put(PaletteCoord::new(0, 1), "[0,1,1];[1,0,2];").unwrap();
/// store.put(PaletteCoord::new(0, 2), "").unwrap();
///
/// let order = DrawOrderPlanner::new().plan(&store).unwrap();
/// assert_eq!(
///     order,
///     vec![PaletteCoord::new(0, 1), PaletteCoord::new(0, 0), PaletteCoord::new(0, 2)]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOrderPlanner;

impl DrawOrderPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Keys with their run counts, in draw order.
    pub fn plan_with_counts<S: InstructionStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<PlannedColor>, StoreError> {
        let mut keys = store.keys()?;
        keys.sort_by_key(|coord| coord.flat());

        let mut planned = Vec::with_capacity(keys.len());
        for coord in keys {
            let encoded = store.get(coord)?.unwrap_or_default();
            planned.push(PlannedColor {
                coord,
                runs: Instruction::count_encoded(&encoded),
            });
        }

        // Stable: ties keep enumeration order.
        planned.sort_by(|a, b| b.runs.cmp(&a.runs));
        debug!(colors = planned.len(), "planned draw order");
        Ok(planned)
    }

    /// Keys in draw order.
    pub fn plan<S: InstructionStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<PaletteCoord>, StoreError> {
        Ok(self
            .plan_with_counts(store)?
            .into_iter()
            .map(|planned| planned.coord)
            .collect())
    }
}
