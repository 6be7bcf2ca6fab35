/*!
# Prism Shader - OpenGL Driver Backend

OpenGL implementation of the `prism_shader` driver interface.

This crate maps `GraphicsDriver` calls onto an OpenGL context through the
`glow` bindings. Context creation stays with the windowing layer: pass an
existing `glow::Context`, or a proc-address loader for the current context.

With the `gl-debug-output` feature, driver debug messages are forwarded to
the prism logger.

# Example

```no_run
use std::rc::Rc;
use prism_shader::prism::ShaderProgram;
use prism_shader_driver_gl::prism::{GlDriver, GlDriverConfig};

# fn run(gl: glow::Context) -> prism_shader::prism::Result<()> {
let driver = Rc::new(GlDriver::new(gl, GlDriverConfig::default()));
let program = ShaderProgram::new(driver, "shaders/basic.vert", "shaders/basic.frag")?
    .into_usable()?;
program.use_program();
# Ok(())
# }
```
*/

mod gl_config;
mod gl_driver;
#[cfg(any(feature = "gl-debug-output", test))]
mod gl_debug;

// Main prism namespace module
pub mod prism {
    pub use crate::gl_config::GlDriverConfig;
    pub use crate::gl_driver::GlDriver;
}
