use crate::domain::ChatId;

/// A parsed, validated administrator instruction: `/reply <userId> <message...>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyDirective {
    pub target: ChatId,
    /// Everything after the id token, whitespace preserved. May be empty.
    pub body: String,
}

/// Why a piece of admin text is not a usable reply directive.
///
/// These are routing outcomes, not failures: each one maps to a corrective
/// hint sent back to the admin, and no delivery is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveError {
    /// Text does not start with `/reply` at all.
    NotADirective,
    /// `/reply` with fewer than three whitespace-delimited tokens.
    Malformed,
    /// Second token is not a numeric user id.
    InvalidId,
}

/// Parse admin text as a reply directive.
///
/// The text is split into at most 3 tokens on whitespace; the third token is
/// the raw remainder and is never trimmed, so embedded whitespace (and an
/// empty body) survive intact.
pub fn parse_reply(text: &str) -> Result<ReplyDirective, DirectiveError> {
    let mut parts = text.splitn(3, char::is_whitespace);

    let head = parts.next().unwrap_or("");
    let command = head.split('@').next().unwrap_or("");
    if command != "/reply" {
        return Err(DirectiveError::NotADirective);
    }

    let Some(id_token) = parts.next() else {
        return Err(DirectiveError::Malformed);
    };
    let Some(body) = parts.next() else {
        return Err(DirectiveError::Malformed);
    };

    let target = id_token
        .parse::<i64>()
        .map_err(|_| DirectiveError::InvalidId)?;

    Ok(ReplyDirective {
        target: ChatId(target),
        body: body.to_string(),
    })
}
