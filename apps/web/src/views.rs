//! Server-rendered HTML for the submission form.

use deckforge_core::InputFormat;

/// Values echoed back into the form so a failed submission keeps the user's
/// input intact.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub deck_name: String,
    pub input_text: String,
    pub input_format: String,
}

/// Render the submission form, optionally with an error banner.
pub fn render_form(values: &FormValues, error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ),
        None => String::new(),
    };

    let tuple_selected = if values.input_format == InputFormat::Tuple.as_str() {
        " selected"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Deckforge</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
label {{ display: block; margin-top: 1rem; }}
textarea {{ width: 100%; height: 12rem; }}
.error {{ color: #c0392b; border: 1px solid #c0392b; padding: 0.5rem; }}
</style>
</head>
<body>
<h1>Deckforge</h1>
<p>Paste card content below and download it as an Anki package.</p>
{banner}<form method="post" action="/" enctype="multipart/form-data">
<label>Deck name
<input type="text" name="deck_name" value="{deck_name}">
</label>
<label>Input format
<select name="input_format">
<option value="csv">CSV (Front,Back columns)</option>
<option value="tuple"{tuple_selected}>Tuple list</option>
</select>
</label>
<label>Card text
<textarea name="input_text">{input_text}</textarea>
</label>
<label>Or upload a file (UTF-8)
<input type="file" name="input_file">
</label>
<button type="submit">Create deck</button>
</form>
</body>
</html>
"#,
        deck_name = escape_html(&values.deck_name),
        input_text = escape_html(&values.input_text),
    )
}

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn submitted_values_are_echoed_back() {
        let values = FormValues {
            deck_name: "My Deck".to_string(),
            input_text: "Front,Back\nQ,A".to_string(),
            input_format: "csv".to_string(),
        };
        let html = render_form(&values, None);
        assert!(html.contains("value=\"My Deck\""));
        assert!(html.contains("Front,Back\nQ,A"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn error_banner_is_escaped() {
        let html = render_form(&FormValues::default(), Some("bad <input>"));
        assert!(html.contains("bad &lt;input&gt;"));
        assert!(!html.contains("bad <input>"));
    }

    #[test]
    fn tuple_selection_is_preserved() {
        let values = FormValues {
            input_format: "tuple".to_string(),
            ..FormValues::default()
        };
        let html = render_form(&values, None);
        assert!(html.contains("<option value=\"tuple\" selected>"));
    }
}
