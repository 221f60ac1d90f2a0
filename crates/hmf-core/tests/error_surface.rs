use hmf_core::errors::{ErrorInfo, HmfError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "small_z.csv")
        .with_context("line", "3")
}

#[test]
fn invalid_argument_surface() {
    let err = HmfError::InvalidArgument(sample_info("hmf.unknown_box", "unknown box"));
    assert!(err.is_invalid_argument());
    assert_eq!(err.info().code, "hmf.unknown_box");
}

#[test]
fn not_found_surface() {
    let err = HmfError::NotFound(sample_info("hmf.table_missing", "missing table"));
    assert!(err.is_not_found());
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn parse_surface_renders_context_and_hint() {
    let err = HmfError::Parse(sample_info("hmf.parse", "bad row").with_hint("check delimiter"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("parse error: bad row (code: hmf.parse)"));
    assert!(rendered.contains("line=3, path=small_z.csv"));
    assert!(rendered.ends_with("| hint: check delimiter"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = HmfError::Io(ErrorInfo::new("hmf.read", "denied"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Io");
    assert_eq!(json["detail"]["code"], "hmf.read");
    let restored: HmfError = serde_json::from_value(json).unwrap();
    assert_eq!(restored, err);
}
