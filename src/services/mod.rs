pub mod instruction_store;
pub mod pipeline;

pub use instruction_store::JsonFileStore;
pub use pipeline::{CompilePipeline, RunReport};
