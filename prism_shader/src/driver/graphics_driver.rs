/// GraphicsDriver trait - native shader/program interface

use std::num::NonZeroU32;

use crate::driver::{ShaderStage, UniformKind, UniformValue};
use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Opaque handle of one compiled shader stage
///
/// Never zero. Only valid for the driver that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(NonZeroU32);

impl ShaderHandle {
    /// Wrap a raw driver id (`None` for 0)
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Wrap an id already known to be non-zero
    pub fn from_non_zero(id: NonZeroU32) -> Self {
        Self(id)
    }

    /// Raw driver id as `NonZeroU32`
    pub fn non_zero(self) -> NonZeroU32 {
        self.0
    }

    /// Raw driver id
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Opaque handle of a program object
///
/// Never zero. Only valid for the driver that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(NonZeroU32);

impl ProgramHandle {
    /// Wrap a raw driver id (`None` for 0)
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Wrap an id already known to be non-zero
    pub fn from_non_zero(id: NonZeroU32) -> Self {
        Self(id)
    }

    /// Raw driver id as `NonZeroU32`
    pub fn non_zero(self) -> NonZeroU32 {
        self.0
    }

    /// Raw driver id
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Location of a uniform variable inside one linked program
///
/// Resolved by name on every setter call; never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(u32);

impl UniformLocation {
    /// Wrap a raw driver location
    pub fn new(location: u32) -> Self {
        Self(location)
    }

    /// Raw driver location
    pub fn get(self) -> u32 {
        self.0
    }
}

// ============================================================================
// GraphicsDriver trait
// ============================================================================

/// Native shader compiler and program interface
///
/// Implemented by backend drivers (e.g., `GlDriver`). All calls go to a
/// single graphics context, so methods take `&self` and implementations are
/// not expected to be thread-safe.
pub trait GraphicsDriver {
    // ===== SHADER STAGES =====

    /// Allocate a shader object for one stage
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// Replace the source text of a shader object
    fn shader_source(&self, shader: ShaderHandle, source: &str);

    /// Request compilation of the submitted source
    fn compile_shader(&self, shader: ShaderHandle);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Compiler diagnostic log for the shader object
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// Release a shader object
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    /// Allocate a program object
    fn create_program(&self) -> Result<ProgramHandle>;

    /// Attach a compiled stage to a program
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Detach a stage from a program
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Request linking of all attached stages
    fn link_program(&self, program: ProgramHandle);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Linker diagnostic log for the program object
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Release a program object
    fn delete_program(&self, program: ProgramHandle);

    /// Make a program active for subsequent uniform uploads and draws
    ///
    /// `None` unbinds the current program.
    fn use_program(&self, program: Option<ProgramHandle>);

    // ===== UNIFORMS =====

    /// Resolve a uniform name in a linked program
    ///
    /// Returns `None` when the name is unknown or the program is not linked.
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Upload a value into the currently active program
    ///
    /// A `None` location is silently ignored.
    fn set_uniform(&self, location: Option<&UniformLocation>, value: &UniformValue);

    /// Read a uniform back from a program (driver query path)
    fn uniform_value(
        &self,
        program: ProgramHandle,
        location: &UniformLocation,
        kind: UniformKind,
    ) -> Option<UniformValue>;
}
