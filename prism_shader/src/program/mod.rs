/// Program module - shader program build lifecycle and uniform uploads

// Module declarations
pub mod program_status;
pub mod shader_program;
pub mod source;

// Re-export everything from shader_program.rs
pub use shader_program::*;

// Re-export from other modules
pub use program_status::*;
pub use source::load_shader_source;
