pub mod macros;

/// Returns the version string reported by the binaries and sent in the
/// user agent of outgoing requests.
///
/// Release builds may set `CONTACTFORM_VERSION` at compile time to embed a
/// more specific version (e.g. a git describe string).
pub fn contactform_version() -> &'static str {
    option_env!("CONTACTFORM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
