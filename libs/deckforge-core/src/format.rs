//! Card face formatting.
//!
//! Turns a plain text field into a styled HTML fragment. Lines starting with
//! one of four fixed labels get a label-specific container; everything else
//! gets a generic one. The dispatch is a closed set, deliberately not
//! extensible.

/// Style rules embedded ahead of every formatted field.
const FIELD_STYLE: &str = "<style>\
.card-field { text-align: left; line-height: 1.5; }\
.card-field .label { font-weight: bold; margin-right: 4px; }\
.card-field .also-called { color: #8e44ad; }\
.card-field .definition { color: #2c3e50; }\
.card-field .example { color: #16a085; font-style: italic; }\
.card-field .usefulness { color: #c0392b; }\
.card-field .line { color: #2c3e50; }\
</style>";

/// Recognized line labels, matched case-sensitively at the start of a line.
const LABELS: [(&str, &str); 4] = [
    ("Also Called:", "also-called"),
    ("Definition:", "definition"),
    ("Example:", "example"),
    ("Usefulness:", "usefulness"),
];

/// Format one card face as a styled HTML fragment.
///
/// Pure and deterministic; any input produces valid output. Literal `\n`
/// escape sequences become real line breaks first (tolerates input where
/// newlines were escaped in transit), blank lines are dropped, and the
/// original characters are otherwise preserved verbatim inside the markup.
pub fn format_field(field: &str) -> String {
    let text = field.replace("\\n", "\n");
    let lines: Vec<String> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(format_line)
        .collect();
    format!(
        "{FIELD_STYLE}<div class=\"card-field\">{}</div>",
        lines.join("\n")
    )
}

fn format_line(line: &str) -> String {
    for (label, class) in LABELS {
        if let Some(rest) = line.strip_prefix(label) {
            return format!(
                "<div class=\"{class}\"><span class=\"label\">{label}</span>{rest}</div>"
            );
        }
    }
    format!("<div class=\"line\">{line}</div>")
}
