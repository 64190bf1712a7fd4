//! Draw instructions
//!
//! A quantized grid is compiled into one run-length sequence per palette
//! coordinate and stored under the coordinate's `row,col` key.
//!
//! - [`Instruction`]: one horizontal run and its `[line,offset,length];` token
//! - [`InstructionCompiler`]: parallel per-color compilation
//! - [`InstructionStore`]: the storage seam, with [`MemoryStore`] in-process

mod compiler;
mod instruction;
mod store;

pub use compiler::{
    compile_color, CompileError, CompileSummary, CompiledColor, InstructionCompiler,
};
pub use instruction::{Instruction, ParseInstructionError};
pub use store::{InstructionStore, MemoryStore, StoreError};
