//! Error type tests
//!
//! Tests for `ThemeError` and its constructors.

#![allow(clippy::expect_used)]

use crate::error::{ExprError, ThemeError};
use crate::error::{archive, expr, fragment, input, resource, scan};
use miette::Diagnostic;
use std::error::Error;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = input::empty_name("out/.ReaperThemeZip");
    assert_eq!(
        err.to_string(),
        "The theme name cannot be empty: out/.ReaperThemeZip"
    );
}

#[test]
fn test_error_code() {
    let err = resource::duplicate("Theme/a.png", "/x/a.png", "/y/a.png");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("theme::resource::duplicate".to_string())
    );
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json")
        .expect_err("invalid JSON");
    let theme_err: ThemeError = json_err.into();
    assert!(matches!(theme_err, ThemeError::JsonFailed(_)));
    assert!(theme_err.to_string().starts_with("Failed to serialize report as JSON"));
    assert_eq!(
        theme_err.code().map(|c| c.to_string()),
        Some("theme::report::json_failed".to_string())
    );
}

test_error_contains!(
    test_invalid_extension,
    input::invalid_extension("theme.zip"),
    ".ReaperThemeZip",
    "theme.zip"
);

test_error_contains!(
    test_invalid_override,
    input::invalid_override("nodot", "missing section delimiter"),
    "nodot",
    "missing section delimiter"
);

test_error_contains!(
    test_scan_failed,
    scan::failed("/themes/missing", "No such file or directory"),
    "Failed to scan directory",
    "/themes/missing"
);

test_error_contains!(
    test_no_data_directories,
    scan::no_data_directories("/themes/empty"),
    "No data directory found"
);

test_error_contains!(
    test_orphaned_root_files,
    scan::orphaned_root_files("/themes/t", &["a.png".to_string(), "b.png".to_string()]),
    "containing the given root",
    "a.png, b.png"
);

test_error_contains!(
    test_fragment_parse_failed,
    fragment::parse_failed("/t/theme.ReaperTheme", 3, "line has no '=' delimiter"),
    "/t/theme.ReaperTheme",
    "line 3"
);

test_error_contains!(
    test_fragment_read_failed,
    fragment::read_failed("/t/rtconfig.txt", "permission denied"),
    "Failed to read file"
);

test_error_contains!(
    test_duplicate_resource_names_both_sources,
    resource::duplicate("Theme/a.png", "/x/a.png", "/y/a.png"),
    "Theme/a.png",
    "/x/a.png",
    "/y/a.png"
);

test_error_contains!(
    test_archive_write_failed,
    archive::write_failed("/out/T.ReaperThemeZip", "disk full"),
    "Failed to write archive"
);

#[test]
fn test_expression_failed_keeps_source() {
    let err = expr::failed(
        "REAPER.col_main_bg",
        "{{c(\"Bogus.key\")}}",
        ExprError::UnknownConstant {
            name: "Bogus.key".to_string(),
        },
    );
    let message = err.to_string();
    assert!(message.contains("REAPER.col_main_bg"));
    assert!(message.contains("unknown constant 'Bogus.key'"));
    assert!(err.source().is_some());
}

#[test]
fn test_expr_error_macro_messages_render_braces() {
    assert!(
        ExprError::UnterminatedMacro
            .to_string()
            .contains("'{{' without a closing '}}'")
    );
    assert_eq!(ExprError::EmptyMacro.to_string(), "empty macro '{{}}'");
}

#[test]
fn test_in_constant_chains_inner_error() {
    let err = ExprError::InConstant {
        name: "colors.accent".to_string(),
        source: Box::new(ExprError::DivisionByZero),
    };
    assert_eq!(
        err.to_string(),
        "in constant 'colors.accent': division by zero"
    );
}
