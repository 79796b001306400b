//! Result rendering — what the letter pane shows for a given session state.
//!
//! Three states only: loading while a request is outstanding, empty when there
//! is no letter, populated with the generated text exactly as returned.

use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Generating Letter...";
pub const EMPTY_TITLE: &str = "No Letter Generated Yet";
pub const EMPTY_DESCRIPTION: &str = "Fill in your details and click \"Generate Letter\" to create your professional resignation letter.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LetterView {
    Loading {
        message: &'static str,
    },
    Empty {
        title: &'static str,
        description: &'static str,
    },
    /// Whitespace and line breaks are kept byte-for-byte.
    Populated {
        text: String,
    },
}

impl LetterView {
    pub fn loading() -> Self {
        LetterView::Loading {
            message: LOADING_MESSAGE,
        }
    }

    /// Loading wins over any stored letter.
    pub fn from_state(is_loading: bool, letter: Option<&str>) -> Self {
        if is_loading {
            return Self::loading();
        }
        match letter {
            Some(text) if !text.is_empty() => LetterView::Populated {
                text: text.to_string(),
            },
            _ => LetterView::Empty {
                title: EMPTY_TITLE,
                description: EMPTY_DESCRIPTION,
            },
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match self {
            LetterView::Populated { text } => Some(text),
            _ => None,
        }
    }

    /// HTML fragment for the letter pane. The populated text goes in a `<pre>`
    /// so the browser keeps its whitespace and renders it monospaced.
    pub fn to_html(&self) -> String {
        match self {
            LetterView::Loading { message } => format!(
                "<div class=\"letter letter-loading\" aria-busy=\"true\"><p>{}</p></div>",
                escape_html(message)
            ),
            LetterView::Empty { title, description } => format!(
                "<div class=\"letter letter-empty\"><h3>{}</h3><p>{}</p></div>",
                escape_html(title),
                escape_html(description)
            ),
            LetterView::Populated { text } => format!(
                "<pre id=\"letter-content\" class=\"letter letter-populated\">{}</pre>",
                escape_html(text)
            ),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
