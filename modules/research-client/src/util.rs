/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Pull the JSON document out of a model reply.
///
/// The provider is told to return bare JSON but routinely wraps it in a
/// markdown fence, sometimes with prose around it. A fenced block wins over
/// the raw reply; otherwise the reply is returned trimmed and the caller's
/// JSON parser is the arbiter.
pub fn extract_json(reply: &str) -> &str {
    if let Some(fenced) = fenced_block(reply) {
        return fenced;
    }
    reply.trim()
}

fn fenced_block(reply: &str) -> Option<&str> {
    let open = reply.find("```")?;
    let after_ticks = &reply[open + 3..];
    // Skip an optional language tag on the opening fence line.
    let body_start = after_ticks.find('\n')? + 1;
    let body = &after_ticks[body_start..];
    let close = body.find("```")?;
    let block = body[..close].trim();
    if block.is_empty() {
        None
    } else {
        Some(block)
    }
}
