use std::io::Write;

use super::*;
use crate::template::Placeholder;

#[test]
fn parse_format_reads_template_and_label() {
    let yaml = r#"
output_format: "{flag} {name_cn} {custom_label}"
default_label: "路人"
"#;
    let Ok(cfg) = parse_format(yaml) else {
        panic!("expected format to parse");
    };
    assert_eq!(cfg.default_label, "路人");
    assert_eq!(cfg.set_label_command, DEFAULT_SET_LABEL_COMMAND);
    assert!(cfg
        .template
        .segments()
        .contains(&crate::Segment::Slot(Placeholder::CustomLabel)));
}

#[test]
fn parse_format_accepts_custom_command() {
    let yaml = r#"
output_format: "{coords}"
default_label: "x"
set_label_command: " set label "
"#;
    let Ok(cfg) = parse_format(yaml) else {
        panic!("expected format to parse");
    };
    assert_eq!(cfg.set_label_command, "set label");
}

#[test]
fn parse_format_rejects_empty_template() {
    let yaml = "output_format: \"  \"\ndefault_label: \"x\"\n";
    let err = parse_format(yaml).err();
    assert!(matches!(
        err,
        Some(FormatError::Invalid(ConfigError::Validation(ref m))) if m.contains("non-empty")
    ));
}

#[test]
fn parse_format_rejects_unknown_placeholder() {
    let yaml = "output_format: \"{flag} {weather}\"\ndefault_label: \"x\"\n";
    let err = parse_format(yaml).err();
    assert!(matches!(
        err,
        Some(FormatError::Invalid(ConfigError::Validation(ref m))) if m.contains("weather")
    ));
}

#[test]
fn parse_format_rejects_blank_command() {
    let yaml = "output_format: \"{cp}\"\ndefault_label: \"x\"\nset_label_command: \"\"\n";
    assert!(matches!(
        parse_format(yaml),
        Err(FormatError::Invalid(ConfigError::Validation(_)))
    ));
}

#[test]
fn load_format_reports_missing_file() {
    let err = load_format(Path::new("/nonexistent/format.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileIo { .. }));
}

#[test]
fn load_format_reports_yaml_errors_with_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "output_format: [unclosed").expect("write");
    let err = load_format(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FormatParse { .. }));
}

#[test]
fn load_format_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "output_format: \"{{shiny_symbol}}{{name_cn}}\"\ndefault_label: \"default\""
    )
    .expect("write");
    let cfg = load_format(file.path()).expect("format loads");
    assert_eq!(cfg.template.source(), "{shiny_symbol}{name_cn}");
    assert_eq!(cfg.default_label, "default");
}
