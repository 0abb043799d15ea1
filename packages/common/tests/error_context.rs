//! Error kinds, context layering and conversions

use shavs_common::{bail, ensure, err, Error, ErrorKind, OptionExt, ResultExt};

fn parse_header(line: &str) -> shavs_common::Result<u32> {
    ensure!(line.starts_with('['), Malformed, "header must start with '[': {line}");
    line.trim_matches(|c| c == '[' || c == ']')
        .split('=')
        .nth(1)
        .map(str::trim)
        .ok_or_kind(ErrorKind::Malformed, "header has no '='")?
        .parse::<u32>()
        .map_err(|e| Error::with_source(ErrorKind::Malformed, e))
}

fn always_fails() -> shavs_common::Result<()> {
    bail!(Configuration, "vectors directory is not set")
}

#[test]
fn test_new_error_reports_kind() {
    let error = Error::not_found();
    assert_eq!(error.kind(), &ErrorKind::NotFound);
    assert!(error.get_context().is_none());
    assert_eq!(error.to_string(), "Not found");
}

#[test]
fn test_err_macro_formats_context() {
    let error = err!(Allocation, "vector table growth to {} entries failed", 40);
    assert_eq!(error.kind(), &ErrorKind::Allocation);
    assert_eq!(error.get_context(), Some("vector table growth to 40 entries failed"));

    let bare = err!(Internal);
    assert!(bare.get_context().is_none());
}

#[test]
fn test_ensure_and_option_ext() {
    assert_eq!(parse_header("[L = 32]").ok(), Some(32));

    let missing = parse_header("L = 32").err();
    assert_eq!(missing.map(|e| e.kind().clone()), Some(ErrorKind::Malformed));

    let no_equals = parse_header("[L 32]").err();
    assert_eq!(
        no_equals.as_ref().and_then(Error::get_context),
        Some("header has no '='")
    );
}

#[test]
fn test_bail_macro() {
    let error = always_fails().err();
    assert_eq!(error.map(|e| e.kind().clone()), Some(ErrorKind::Configuration));
}

#[test]
fn test_context_layers_keep_source() {
    let inner = Error::malformed().context("odd-length hex at line 7");
    let outer = inner.context("while parsing SHA256ShortMsg.rsp");

    assert_eq!(outer.kind(), &ErrorKind::Malformed);
    assert_eq!(outer.get_context(), Some("while parsing SHA256ShortMsg.rsp"));
    let rendered = outer.to_string();
    assert!(rendered.contains("while parsing SHA256ShortMsg.rsp"));
    assert!(rendered.contains("Caused by: Malformed vector file: odd-length hex at line 7"));
    assert!(std::error::Error::source(&outer).is_some());
}

#[test]
fn test_io_error_conversion_maps_not_found() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let result: Result<(), std::io::Error> = Err(io);
    let error = result.context("opening SHA224LongMsg.rsp").err();
    assert_eq!(error.map(|e| e.kind().clone()), Some(ErrorKind::NotFound));
}

#[cfg(feature = "full-backtrace")]
#[test]
fn test_backtrace_is_captured_at_creation() {
    let error = Error::malformed().context("MD is 31 bytes but the header declares [L = 32]");
    assert!(!error.backtrace().frames().is_empty());
}
