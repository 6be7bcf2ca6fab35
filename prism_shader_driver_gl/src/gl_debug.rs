/// GL debug output - routes driver debug messages to the prism logger
///
/// Only installed when the `gl-debug-output` feature is enabled and the
/// config asks for it. Messages keep the driver's own text; the GL severity
/// picks the log level.

#[cfg(feature = "gl-debug-output")]
use glow::HasContext;
use prism_shader::prism::log::LogSeverity;

/// Log source used for driver debug messages
#[cfg(feature = "gl-debug-output")]
pub(crate) const DEBUG_LOG_SOURCE: &str = "prism::gl::debug";

/// Map a `GL_DEBUG_SEVERITY_*` value to a log level
pub(crate) fn debug_severity(severity: u32) -> LogSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        glow::DEBUG_SEVERITY_NOTIFICATION => LogSeverity::Trace,
        _ => LogSeverity::Debug,
    }
}

/// Short name of a `GL_DEBUG_SOURCE_*` value
pub(crate) fn debug_source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "WindowSystem",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "ShaderCompiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "ThirdParty",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

/// Short name of a `GL_DEBUG_TYPE_*` value
pub(crate) fn debug_type_name(kind: u32) -> &'static str {
    match kind {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        _ => "General",
    }
}

/// Format one debug message as it appears in the log
pub(crate) fn format_debug_message(label: &str, source: u32, kind: u32, id: u32, message: &str) -> String {
    format!(
        "[{}] [{}/{}] #{}: {}",
        label,
        debug_source_name(source),
        debug_type_name(kind),
        id,
        message
    )
}

/// Install the debug callback on a context
///
/// Returns `false` (and logs a warning) when the context has no debug
/// output support.
#[cfg(feature = "gl-debug-output")]
pub(crate) fn install_debug_callback(gl: &mut glow::Context, label: &str) -> bool {
    if !gl.supports_debug() {
        prism_shader::prism_warn!(
            DEBUG_LOG_SOURCE,
            "[{}] Debug output requested but not supported by this context",
            label
        );
        return false;
    }

    let label = label.to_string();
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        // Keeps messages on the calling thread, next to the GL call that caused them
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(move |source, kind, id, severity, message| {
            prism_shader::prism::log::log(
                debug_severity(severity),
                DEBUG_LOG_SOURCE,
                format_debug_message(&label, source, kind, id, message),
            );
        });
    }
    true
}
