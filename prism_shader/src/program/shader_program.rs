/// ShaderProgram - linked vertex + fragment program with typed uniform setters
///
/// The program owns its driver handle and releases it exactly once on drop.
/// The intermediate stage objects never outlive construction.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::driver::{
    GraphicsDriver, ProgramHandle, ShaderHandle, ShaderStage, UniformKind, UniformValue,
};
use crate::error::{Error, Result};
use crate::program::source::load_shader_source;
use crate::program::{DiagnosticTag, ProgramStatus, ShaderDiagnostic};

const LOG_SOURCE: &str = "prism::ShaderProgram";

/// Linked shader program
///
/// Holds an `Rc` to the driver, so it is neither `Send` nor `Sync`: a
/// program stays on the thread that owns the graphics context.
///
/// # Example
///
/// ```no_run
/// use std::rc::Rc;
/// use prism_shader::prism::{ShaderProgram, driver::GraphicsDriver};
/// use prism_shader::glam::Mat4;
///
/// # fn run(driver: Rc<dyn GraphicsDriver>) -> prism_shader::prism::Result<()> {
/// let program = ShaderProgram::new(driver, "shaders/basic.vert", "shaders/basic.frag")?;
/// program.use_program();
/// program.set_mat4("u_model", &Mat4::IDENTITY);
/// # Ok(())
/// # }
/// ```
pub struct ShaderProgram {
    id: ProgramHandle,
    status: ProgramStatus,
    driver: Rc<dyn GraphicsDriver>,
}

impl ShaderProgram {
    /// Read, compile and link a program from two source files
    ///
    /// # Errors
    ///
    /// Returns `Error::IoError` if either file is unreadable (nothing is
    /// allocated in the driver in that case), or `Error::BackendError` if the
    /// driver cannot allocate a shader or program object.
    ///
    /// Compile and link failures are NOT errors here: they are logged and
    /// recorded in `status()`. Use `into_usable()` to make them fatal.
    pub fn new(
        driver: Rc<dyn GraphicsDriver>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex_source = load_shader_source(vertex_path)?;
        let fragment_source = load_shader_source(fragment_path)?;
        Self::from_sources(driver, &vertex_source, &fragment_source)
    }

    /// Compile and link a program from in-memory sources
    ///
    /// # Errors
    ///
    /// Returns `Error::BackendError` if the driver cannot allocate a shader or
    /// program object. Stages already allocated are released first.
    pub fn from_sources(
        driver: Rc<dyn GraphicsDriver>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let mut diagnostics = Vec::new();

        let vertex = compile_stage(driver.as_ref(), ShaderStage::Vertex, vertex_source, &mut diagnostics)?;
        let fragment = match compile_stage(driver.as_ref(), ShaderStage::Fragment, fragment_source, &mut diagnostics) {
            Ok(fragment) => fragment,
            Err(e) => {
                driver.delete_shader(vertex);
                return Err(e);
            }
        };

        let linked = link_stages(driver.as_ref(), &[vertex, fragment], &mut diagnostics);

        // Stages are released on every path; the program keeps what it needs.
        driver.delete_shader(vertex);
        driver.delete_shader(fragment);

        let id = linked?;
        let status = if diagnostics.is_empty() {
            crate::prism_debug!(LOG_SOURCE, "Program {} linked", id.get());
            ProgramStatus::Usable
        } else {
            crate::prism_warn!(
                LOG_SOURCE,
                "Program {} is unusable ({} diagnostic(s))",
                id.get(),
                diagnostics.len()
            );
            ProgramStatus::Unusable(diagnostics)
        };

        Ok(Self { id, status, driver })
    }

    /// Turn a failed build into an error
    ///
    /// # Errors
    ///
    /// `Error::CompileError` for the first failing stage, otherwise
    /// `Error::LinkError`. The program is released on error.
    pub fn into_usable(self) -> Result<Self> {
        if self.is_usable() {
            return Ok(self);
        }
        let error = match self.status.diagnostics().first() {
            Some(first) => match first.tag.stage() {
                Some(stage) => Error::CompileError { stage, log: first.log.clone() },
                None => Error::LinkError(first.log.clone()),
            },
            None => Error::LinkError(String::new()),
        };
        Err(error)
    }

    /// Driver handle of the program
    pub fn id(&self) -> ProgramHandle {
        self.id
    }

    /// Build outcome
    pub fn status(&self) -> &ProgramStatus {
        &self.status
    }

    /// Whether the program linked
    pub fn is_usable(&self) -> bool {
        self.status.is_usable()
    }

    /// Compile/link diagnostics (empty when usable)
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        self.status.diagnostics()
    }

    /// Make this program the active one
    ///
    /// Driver-side failures (e.g. binding an unlinked program) are not surfaced.
    pub fn use_program(&self) {
        self.driver.use_program(Some(self.id));
    }

    // ===== UNIFORM SETTERS =====

    /// Upload a uniform by name
    ///
    /// The location is resolved against this program on every call, but the
    /// value lands in the currently active program: call `use_program()`
    /// first. An unknown name is a silent no-op.
    pub fn set_uniform<T: Into<UniformValue>>(&self, name: &str, value: T) {
        let location = self.driver.uniform_location(self.id, name);
        if location.is_none() {
            crate::prism_trace!(LOG_SOURCE, "Uniform '{}' not found in program {}", name, self.id.get());
        }
        self.driver.set_uniform(location.as_ref(), &value.into());
    }

    /// Set a `bool` uniform
    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, value);
    }

    /// Set an `int` uniform
    pub fn set_int(&self, name: &str, value: i32) {
        self.set_uniform(name, value);
    }

    /// Set a `float` uniform
    pub fn set_float(&self, name: &str, value: f32) {
        self.set_uniform(name, value);
    }

    /// Set a `vec2` uniform
    pub fn set_vec2(&self, name: &str, value: Vec2) {
        self.set_uniform(name, value);
    }

    /// Set a `vec2` uniform from components
    pub fn set_vec2_xy(&self, name: &str, x: f32, y: f32) {
        self.set_uniform(name, Vec2::new(x, y));
    }

    /// Set a `vec3` uniform
    pub fn set_vec3(&self, name: &str, value: Vec3) {
        self.set_uniform(name, value);
    }

    /// Set a `vec3` uniform from components
    pub fn set_vec3_xyz(&self, name: &str, x: f32, y: f32, z: f32) {
        self.set_uniform(name, Vec3::new(x, y, z));
    }

    /// Set a `vec4` uniform
    pub fn set_vec4(&self, name: &str, value: Vec4) {
        self.set_uniform(name, value);
    }

    /// Set a `vec4` uniform from components
    pub fn set_vec4_xyzw(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        self.set_uniform(name, Vec4::new(x, y, z, w));
    }

    /// Set a `mat2` uniform
    pub fn set_mat2(&self, name: &str, value: &Mat2) {
        self.set_uniform(name, *value);
    }

    /// Set a `mat3` uniform
    pub fn set_mat3(&self, name: &str, value: &Mat3) {
        self.set_uniform(name, *value);
    }

    /// Set a `mat4` uniform
    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        self.set_uniform(name, *value);
    }

    /// Read a uniform back through the driver query interface
    ///
    /// Returns `None` if the name is unknown or the kind does not match.
    pub fn uniform_value(&self, name: &str, kind: UniformKind) -> Option<UniformValue> {
        let location = self.driver.uniform_location(self.id, name)?;
        self.driver.uniform_value(self.id, &location, kind)
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.id)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

// ============================================================================
// Build steps
// ============================================================================

/// Allocate, submit and compile one stage
///
/// A compile failure is recorded in `diagnostics` and the handle is still
/// returned, so the caller can release it.
fn compile_stage(
    driver: &dyn GraphicsDriver,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<ShaderDiagnostic>,
) -> Result<ShaderHandle> {
    let shader = driver.create_shader(stage).map_err(|e| {
        crate::prism_error!(LOG_SOURCE, "Failed to allocate {} shader: {}", stage.name(), e);
        e
    })?;
    driver.shader_source(shader, source);
    driver.compile_shader(shader);

    if !driver.shader_compile_status(shader) {
        report(diagnostics, ShaderDiagnostic::new(stage.into(), driver.shader_info_log(shader)));
    }
    Ok(shader)
}

/// Attach stages to a new program, link, then detach them again
fn link_stages(
    driver: &dyn GraphicsDriver,
    stages: &[ShaderHandle],
    diagnostics: &mut Vec<ShaderDiagnostic>,
) -> Result<ProgramHandle> {
    let program = driver.create_program().map_err(|e| {
        crate::prism_error!(LOG_SOURCE, "Failed to allocate program: {}", e);
        e
    })?;

    for &shader in stages {
        driver.attach_shader(program, shader);
    }
    driver.link_program(program);

    if !driver.program_link_status(program) {
        report(
            diagnostics,
            ShaderDiagnostic::new(DiagnosticTag::Program, driver.program_info_log(program)),
        );
    }

    for &shader in stages {
        driver.detach_shader(program, shader);
    }
    Ok(program)
}

fn report(diagnostics: &mut Vec<ShaderDiagnostic>, diagnostic: ShaderDiagnostic) {
    crate::prism_error!(LOG_SOURCE, "{}", diagnostic);
    diagnostics.push(diagnostic);
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
