//! Run-length compilation of an [`IndexGrid`] into per-color instructions.

use std::fmt;

use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use super::instruction::Instruction;
use super::store::{InstructionStore, StoreError};
use crate::cancel::CancelToken;
use crate::palette::{Palette, PaletteCoord};
use crate::quantize::IndexGrid;

/// Error type for instruction compilation.
#[derive(Debug)]
pub enum CompileError {
    /// The run was cancelled; the store was left untouched
    Cancelled,
    /// Writing to the instruction store failed
    Store(StoreError),
}

impl From<StoreError> for CompileError {
    fn from(err: StoreError) -> Self {
        CompileError::Store(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Cancelled => write!(f, "instruction compilation cancelled"),
            CompileError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Store(err) => Some(err),
            CompileError::Cancelled => None,
        }
    }
}

/// Maximal horizontal runs of `coord` in `grid`, row by row.
///
/// Runs never span rows. Rows are scanned top to bottom and each row left to
/// right, so the output is ordered by `(line, offset)`.
pub fn compile_color(grid: &IndexGrid, coord: PaletteCoord) -> Vec<Instruction> {
    let mut runs = Vec::new();
    for (y, row) in grid.rows().enumerate() {
        let mut start: Option<usize> = None;
        for (x, &cell) in row.iter().enumerate() {
            match (cell == coord, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push(Instruction::new(y as u32, s as u32, (x - s) as u32));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(Instruction::new(y as u32, s as u32, (row.len() - s) as u32));
        }
    }
    runs
}

/// Statistics of one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileSummary {
    /// Palette entries written (including unused ones).
    pub colors: usize,
    /// Palette entries with at least one run.
    pub used_colors: usize,
    /// Total number of runs.
    pub runs: usize,
}

/// One compiled palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColor {
    pub coord: PaletteCoord,
    pub runs: Vec<Instruction>,
}

impl CompiledColor {
    /// The stored form of `runs`.
    pub fn encoded(&self) -> String {
        Instruction::encode_sequence(&self.runs)
    }
}

/// Compiles a grid into one instruction sequence per palette coordinate.
///
/// Colors are compiled in parallel; results are returned, and written, in
/// palette enumeration order from a single thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionCompiler;

impl InstructionCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile every coordinate of `palette`, unused ones included.
    pub fn compile(
        &self,
        grid: &IndexGrid,
        palette: &Palette,
        cancel: &CancelToken,
    ) -> Result<Vec<CompiledColor>, CompileError> {
        let total = palette.len();
        let coords: Vec<PaletteCoord> = palette.coords().collect();

        coords
            .into_par_iter()
            .enumerate()
            .map(|(i, coord)| {
                if cancel.is_cancelled() {
                    return Err(CompileError::Cancelled);
                }
                let runs = compile_color(grid, coord);
                debug!(
                    color = %coord,
                    runs = runs.len(),
                    "compiled palette color {}/{}",
                    i + 1,
                    total
                );
                Ok(CompiledColor { coord, runs })
            })
            .collect()
    }

    /// Compile and replace the contents of `store`.
    ///
    /// Nothing is written unless every color compiled.
    pub fn compile_into<S: InstructionStore + ?Sized>(
        &self,
        grid: &IndexGrid,
        palette: &Palette,
        store: &mut S,
        cancel: &CancelToken,
    ) -> Result<CompileSummary, CompileError> {
        let compiled = self.compile(grid, palette, cancel)?;

        store.reset()?;
        let mut summary = CompileSummary::default();
        for color in &compiled {
            store.put(color.coord, &color.encoded())?;
            summary.colors += 1;
            summary.runs += color.runs.len();
            if !color.runs.is_empty() {
                summary.used_colors += 1;
            }
        }
        store.commit()?;

        info!(
            colors = summary.colors,
            used = summary.used_colors,
            runs = summary.runs,
            "instructions written"
        );
        Ok(summary)
    }
}
