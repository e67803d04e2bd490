use ariadne::{Color, Label, Report, ReportKind, Source};
use gomin::{Finding, GominError};
use std::fs;

/// Format a GominError with fancy terminal output using Ariadne
pub fn format_error(error: &GominError) -> String {
    match error {
        GominError::Manifest(details) => {
            let mut output = Vec::new();
            let report = Report::build(ReportKind::Error, &details.source_id, details.span.start)
                .with_message(format!("Invalid go.mod: {}", details.message))
                .with_label(
                    Label::new((&details.source_id, details.span.start..details.span.end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        GominError::VersionMismatch { computed, declared } => {
            format_mismatch(computed, *declared).unwrap_or_else(|| format!("{}", error))
        }
        GominError::Load(errors) => {
            let mut result = format!("{} load error(s):\n", errors.len());
            for error in errors {
                result.push_str(&format!("  {}\n", error));
            }
            result
        }
        GominError::DependencyResolution { module, source } => {
            format!("Resolving dependency {} failed:\n{}", module, format_error(source))
        }
        other => format!("{}", other),
    }
}

/// Points at the construct that forced the computed version, when its
/// source file can be read.
fn format_mismatch(computed: &Finding, declared: u32) -> Option<String> {
    let evidence = computed.evidence.as_ref()?;
    let text = fs::read_to_string(&evidence.file).ok()?;
    let start = char_offset(&text, evidence.span.line, evidence.span.col)?;

    let mut output = Vec::new();
    Report::build(ReportKind::Error, &evidence.file, start)
        .with_message(format!(
            "go.mod declares go 1.{} but go 1.{} is needed",
            declared, computed.version
        ))
        .with_label(
            Label::new((&evidence.file, start..start + 1))
                .with_message(format!("{} (go 1.{})", evidence.description, computed.version))
                .with_color(Color::Red),
        )
        .with_help(format!("set `go 1.{}` in go.mod", computed.version))
        .finish()
        .write((&evidence.file, Source::from(text.as_str())), &mut output)
        .ok()?;
    Some(String::from_utf8_lossy(&output).to_string())
}

/// Character offset of a 1-based line and column.
fn char_offset(text: &str, line: usize, col: usize) -> Option<usize> {
    if line == 0 || col == 0 {
        return None;
    }
    let before: usize = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(|l| l.chars().count())
        .sum();
    Some(before + col - 1)
}
