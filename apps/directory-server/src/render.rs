//! HTML rendering for the directory and profile pages.

use std::convert::Infallible;

use entities::{Note, User, UserSummary};
use futures_util::{Stream, StreamExt};
use notes_client::{ListError, NoteStream};

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the user directory.
pub fn directory_page(users: &[UserSummary]) -> String {
    let mut page = String::from("<html><body>");
    page.push_str("<h1>User Directory</h1><p>Select a user to view their notes</p>");
    page.push_str("<table>");
    page.push_str("<tr><th>User ID</th><th>User Name</th></tr>");
    for user in users {
        page.push_str(&format!(
            r#"<tr><td><a href="/user/{id}">{id}</a></td><td>{email}</td></tr>"#,
            id = user.id,
            email = escape(&user.email),
        ));
    }
    page.push_str("</table>");
    page.push_str("</body></html>");
    page
}

/// Renders the informational page for an unknown user.
pub fn no_such_user_page() -> String {
    "<html><body><h1>User Notes</h1><p>No such user.</p></body></html>".to_string()
}

fn note_row(note: &Note) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        note.id,
        escape(&note.created),
        escape(&note.content)
    )
}

fn profile_header(user: &User) -> String {
    format!(
        concat!(
            "<html><body><h1>User Notes</h1>",
            "<p>User: {}: {} {}</p>",
            r#"<form action="" method="post"><textarea name="note" rows="24" cols="80"></textarea>"#,
            r#"<p><input type="submit" value="Submit Note"/></p></form>"#,
            "<p>Notes</p><table>",
            "<tr><th>ID</th><th>Creation Time</th><th>Note</th></tr>",
        ),
        escape(&user.email),
        escape(&user.first_name),
        escape(&user.last_name),
    )
}

fn stream_fault(user: &User, error: &ListError) -> String {
    let action = match error {
        ListError::Decode(_) => "decode",
        ListError::Transport(_)
        | ListError::Rejected { .. }
        | ListError::UnreadableRejection { .. } => "read",
    };
    format!(
        "<p>Failed to {} notes for user {}: {}</p>",
        action,
        user.id,
        escape(&error.to_string())
    )
}

/// Renders a user's profile, emitting one table row per note as it arrives.
///
/// If `notes` yields an error, the rows already emitted stay, the table is
/// closed and a notice says the remaining notes could not be read.
pub fn profile_page(
    user: User,
    notes: NoteStream,
) -> impl Stream<Item = Result<String, Infallible>> + Send + 'static {
    async_stream::stream! {
        yield Ok(profile_header(&user));

        let mut notes = notes;
        let mut fault = None;
        let mut rows = 0usize;
        while let Some(item) = notes.next().await {
            match item {
                Ok(note) => {
                    rows += 1;
                    yield Ok(note_row(&note));
                }
                Err(e) => {
                    fault = Some(e);
                    break;
                }
            }
        }

        yield Ok("</table>".to_string());
        if let Some(e) = fault {
            tracing::warn!(user_id = user.id, rows, error = %e, "Note stream ended early");
            yield Ok(stream_fault(&user, &e));
        }
        yield Ok("</body></html>".to_string());
    }
}
