//! Task discussion rendering.
//!
//! Combines a task description and its comment thread into one HTML
//! fragment suitable for a single rich text field.

use crate::markup::MarkupRenderer;

/// Separator between the description and the first comment.
const DESCRIPTION_SEPARATOR: &str = "<br><br><hr><br>";

/// Comment author as known to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub real_name: String,
    pub user_name: String,
}

impl Author {
    pub fn new(real_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            real_name: real_name.into(),
            user_name: user_name.into(),
        }
    }
}

/// Single comment on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// None when the author could not be looked up.
    pub author: Option<Author>,
    /// Creation date, already formatted for display.
    pub posted: String,
    /// Comment body in remarkup.
    pub text: String,
}

impl Comment {
    pub fn new(author: Option<Author>, posted: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author,
            posted: posted.into(),
            text: text.into(),
        }
    }

    /// Attribution line shown above the comment body.
    pub fn header(&self) -> String {
        match &self.author {
            Some(author) => format!(
                "On {}, {} ({}) wrote:",
                self.posted, author.real_name, author.user_name
            ),
            None => format!("On {}, unknown user wrote:", self.posted),
        }
    }
}

/// Task description together with its comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discussion {
    pub description: String,
    /// Comments ordered newest first, as the server returns them.
    pub comments: Vec<Comment>,
}

impl Discussion {
    pub fn new(description: impl Into<String>, comments: Vec<Comment>) -> Self {
        Self {
            description: description.into(),
            comments,
        }
    }

    /// Renders description followed by comments in chronological order.
    ///
    /// Without comments the result is just the rendered description.
    ///
    /// # Arguments
    ///
    /// * `renderer`: Renderer used for the description and every comment
    ///
    /// # Examples
    ///
    /// ```
    /// use remarkup::{Comment, Discussion, MarkupRenderer};
    ///
    /// let renderer = MarkupRenderer::new("http://x.test");
    /// let discussion = Discussion::new(
    ///     "**Broken**",
    ///     vec![Comment::new(None, "2016-01-02", "Fixed")],
    /// );
    /// assert_eq!(
    ///     discussion.render(&renderer),
    ///     "<b>Broken</b><br><br><hr><br>On 2016-01-02, unknown user wrote:<br>Fixed<br><hr>"
    /// );
    /// ```
    pub fn render(&self, renderer: &MarkupRenderer) -> String {
        let mut html = renderer.render(&self.description);
        if self.comments.is_empty() {
            return html;
        }

        html.push_str(DESCRIPTION_SEPARATOR);
        for comment in self.comments.iter().rev() {
            html.push_str(&comment.header());
            html.push_str("<br>");
            html.push_str(&renderer.render(&comment.text));
            html.push_str("<br><hr>");
        }

        log::debug!(
            "rendered discussion with {} comments, {} bytes",
            self.comments.len(),
            html.len()
        );
        html
    }
}
