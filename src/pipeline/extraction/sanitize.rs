/// Clean assembled document text before value extraction.
///
/// Control characters are dropped (tabs become spaces so columns stay
/// apart), each line is trimmed and blank lines are removed. Printable
/// symbols such as `–`, `µ`, `×` and `^` survive because units and ranges
/// use them.
pub fn sanitize_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            '\n' => Some('\n'),
            '\r' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
