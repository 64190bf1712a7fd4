//! Assertion helpers for tests.

use std::path::Path;

use paint_quantize::{Instruction, InstructionStore, PaletteCoord};
use pretty_assertions::assert_eq;

/// Assert file exists and starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {}", path.display(), e));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the store's runs tile a `width` x `height` grid exactly once
pub fn assert_runs_cover_grid<S: InstructionStore>(store: &S, width: usize, height: usize) {
    let mut covered = vec![0u32; width * height];
    for key in store.keys().unwrap() {
        let encoded = store.get(key).unwrap().unwrap_or_default();
        for run in Instruction::parse_sequence(&encoded).unwrap() {
            assert!(
                (run.line as usize) < height && run.end() as usize <= width,
                "Run {} of {} is outside the {}x{} grid",
                run,
                key,
                width,
                height
            );
            for x in run.offset..run.end() {
                covered[run.line as usize * width + x as usize] += 1;
            }
        }
    }
    assert_eq!(covered, vec![1u32; width * height], "Every cell covered exactly once");
}

/// Decoded runs stored for `key`
pub fn runs_for<S: InstructionStore>(store: &S, key: PaletteCoord) -> Vec<Instruction> {
    let encoded = store
        .get(key)
        .unwrap()
        .unwrap_or_else(|| panic!("Missing key {key}"));
    Instruction::parse_sequence(&encoded).unwrap()
}
