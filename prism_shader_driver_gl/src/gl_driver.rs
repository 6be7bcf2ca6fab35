/// GlDriver - OpenGL implementation of the GraphicsDriver trait
///
/// Thin mapping from the core driver interface onto `glow` calls. Every
/// method assumes the wrapped context is current on the calling thread.

use glow::HasContext;
use prism_shader::prism::driver::{
    GraphicsDriver, ProgramHandle, ShaderHandle, ShaderStage, UniformKind, UniformLocation,
    UniformValue,
};
use prism_shader::prism::Result;
use prism_shader::{prism_bail, prism_info};

use crate::gl_config::GlDriverConfig;

const LOG_SOURCE: &str = "prism::gl";

/// OpenGL driver
pub struct GlDriver {
    /// glow context (function pointers of the current GL context)
    gl: glow::Context,
    /// Creation config
    config: GlDriverConfig,
}

impl GlDriver {
    /// Wrap an existing glow context
    ///
    /// The context must be current on this thread for the driver's lifetime.
    pub fn new(gl: glow::Context, config: GlDriverConfig) -> Self {
        #[cfg(feature = "gl-debug-output")]
        let gl = {
            let mut gl = gl;
            if config.debug_output {
                crate::gl_debug::install_debug_callback(&mut gl, &config.label);
            }
            gl
        };

        #[cfg(not(feature = "gl-debug-output"))]
        if config.debug_output {
            prism_shader::prism_debug!(
                LOG_SOURCE,
                "[{}] Debug output requested but the gl-debug-output feature is disabled",
                config.label
            );
        }

        let version = gl.version();
        prism_info!(
            LOG_SOURCE,
            "[{}] OpenGL{} {}.{} ({})",
            config.label,
            if version.is_embedded { " ES" } else { "" },
            version.major,
            version.minor,
            version.vendor_info
        );

        Self { gl, config }
    }

    /// Build the glow context from a proc-address loader, then wrap it
    ///
    /// # Safety
    ///
    /// A GL context must be current on this thread and `loader` must return
    /// function pointers belonging to it.
    pub unsafe fn from_loader_function<F>(loader: F, config: GlDriverConfig) -> Self
    where
        F: FnMut(&str) -> *const std::os::raw::c_void,
    {
        Self::new(glow::Context::from_loader_function(loader), config)
    }

    /// Underlying glow context (for draw calls made by the application)
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Creation config
    pub fn config(&self) -> &GlDriverConfig {
        &self.config
    }
}

impl GraphicsDriver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        match unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) } {
            Ok(shader) => Ok(shader_handle(shader)),
            Err(e) => prism_bail!(
                LOG_SOURCE,
                "[{}] Failed to create {} shader: {}",
                self.config.label,
                stage.name(),
                e
            ),
        }
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(native_shader(shader), source) }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(native_shader(shader)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(native_shader(shader)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(native_shader(shader)) }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(native_shader(shader)) }
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        match unsafe { self.gl.create_program() } {
            Ok(program) => Ok(program_handle(program)),
            Err(e) => prism_bail!(LOG_SOURCE, "[{}] Failed to create program: {}", self.config.label, e),
        }
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { self.gl.attach_shader(native_program(program), native_shader(shader)) }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { self.gl.detach_shader(native_program(program), native_shader(shader)) }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { self.gl.link_program(native_program(program)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(native_program(program)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(native_program(program)) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(native_program(program)) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(native_program)) }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(native_program(program), name) }.map(uniform_location)
    }

    fn set_uniform(&self, location: Option<&UniformLocation>, value: &UniformValue) {
        let Some(location) = location else {
            return;
        };
        let native = native_uniform_location(location);
        let loc = Some(&native);

        // Matrices are column-major on both sides, no transpose
        unsafe {
            match *value {
                UniformValue::Bool(v) => self.gl.uniform_1_i32(loc, i32::from(v)),
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(loc, v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Mat2(m) => self.gl.uniform_matrix_2_f32_slice(loc, false, &m.to_cols_array()),
                UniformValue::Mat3(m) => self.gl.uniform_matrix_3_f32_slice(loc, false, &m.to_cols_array()),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(loc, false, &m.to_cols_array()),
            }
        }
    }

    fn uniform_value(
        &self,
        program: ProgramHandle,
        location: &UniformLocation,
        kind: UniformKind,
    ) -> Option<UniformValue> {
        let program = native_program(program);
        let location = native_uniform_location(location);

        // GL cannot tell us the declared type here; the caller's kind decides the read width
        if kind.is_integer() {
            let mut components = [0i32; 1];
            unsafe { self.gl.get_uniform_i32(program, &location, &mut components) };
            UniformValue::from_i32_components(kind, &components)
        } else {
            let mut components = [0.0f32; 16];
            unsafe { self.gl.get_uniform_f32(program, &location, &mut components) };
            UniformValue::from_f32_components(kind, &components[..kind.component_count()])
        }
    }
}

// ============================================================================
// Conversions between core handles and glow native objects
// ============================================================================

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

pub(crate) fn native_shader(shader: ShaderHandle) -> glow::NativeShader {
    glow::NativeShader(shader.non_zero())
}

pub(crate) fn shader_handle(shader: glow::NativeShader) -> ShaderHandle {
    ShaderHandle::from_non_zero(shader.0)
}

pub(crate) fn native_program(program: ProgramHandle) -> glow::NativeProgram {
    glow::NativeProgram(program.non_zero())
}

pub(crate) fn program_handle(program: glow::NativeProgram) -> ProgramHandle {
    ProgramHandle::from_non_zero(program.0)
}

pub(crate) fn native_uniform_location(location: &UniformLocation) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(location.get())
}

pub(crate) fn uniform_location(location: glow::NativeUniformLocation) -> UniformLocation {
    UniformLocation::new(location.0)
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
