//! Line-oriented fragments (`rtconfig.txt`)

/// Remove comments and whitespace from line-oriented fragment text.
///
/// Everything from the first `;` that is not escaped with `\` to the end of the
/// line is dropped, each line is trimmed and lines left empty are removed.
/// Running this twice gives the same result as running it once.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| strip_line(line).trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line(line: &str) -> &str {
    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        match ch {
            ';' if !escaped => return &line[..index],
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    line
}
