//! Parse raw header lines delivered by libcurl's header callback.

/// Status code from an HTTP status line (`HTTP/1.1 200 OK`, `HTTP/2 404`).
/// Returns `None` for ordinary header lines.
pub(crate) fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = std::str::from_utf8(line).ok()?.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.split_whitespace();
    parts.next()?;
    let code = parts.next()?;
    if code.len() != 3 {
        return None;
    }
    code.parse::<u32>().ok()
}

/// True for the empty line that ends a header block.
pub(crate) fn is_header_terminator(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}
