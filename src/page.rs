//! Standalone HTML document wrapper

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Wraps converted markup in a complete HTML document
///
/// Provides DOCTYPE, charset, viewport and title around the fragment so the
/// result can be opened directly in a browser. The body is inserted as is,
/// without escaping.
///
/// # Arguments
///
/// * `title`: Document title text
/// * `body_html`: HTML fragment produced by the renderer
///
/// # Returns
///
/// Complete HTML document markup
pub fn document(title: &str, body_html: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                div class="remarkup" {
                    (PreEscaped(body_html))
                }
            }
        }
    }
}
