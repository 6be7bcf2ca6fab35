/*!
# Prism Shader

Core traits and types for building GLSL shader programs.

This crate turns a pair of vertex/fragment sources into a linked program
handle and exposes typed uniform setters. The actual compiler and linker
live in the graphics driver, reached through the `GraphicsDriver` trait.
Backend implementations (OpenGL via `prism_shader_driver_gl`, ...) provide
concrete drivers.

## Architecture

- **GraphicsDriver**: native shader/program interface implemented by backends
- **ShaderProgram**: owns one linked program handle, released on drop
- **ProgramStatus**: `Usable` or `Unusable(diagnostics)` after the build
- **UniformValue**: typed uniform payload (`bool`, `int`, `float`, vectors, matrices)

Compile and link failures are reported through the logger (stderr by
default) and recorded in `ProgramStatus`; they never panic.
*/

// Internal modules
mod error;
pub mod log;
pub mod driver;
pub mod program;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{Error, Result};

    // Shader program
    pub use crate::program::{
        load_shader_source, DiagnosticTag, ProgramStatus, ShaderDiagnostic, ShaderProgram,
    };

    // Logging sub-module (macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{
            log, log_detailed, reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity,
            Logger,
        };
    }

    // Driver sub-module with the backend-facing types
    pub mod driver {
        pub use crate::driver::*;
    }
}

// Re-export math library at crate root
pub use glam;
