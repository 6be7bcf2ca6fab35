/// Driver module - the seam between shader programs and the native graphics API

// Module declarations
pub mod graphics_driver;
pub mod shader_stage;
pub mod uniform;

// Re-export everything from graphics_driver.rs
pub use graphics_driver::*;

// Re-export from other modules
pub use shader_stage::*;
pub use uniform::*;

// Mock graphics driver for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_driver;
