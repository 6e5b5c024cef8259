/// Renders every line of job output as its own markdown paragraph.
///
/// Blank lines in the input are kept as empty paragraphs so the spacing the
/// job chose survives.
pub fn format_paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for line in text.lines() {
        out.push_str(line);
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_paragraphs;

    #[test]
    fn each_line_becomes_a_paragraph() {
        assert_eq!(format_paragraphs("a\nb"), "a\n\nb\n\n");
        assert_eq!(format_paragraphs("a\r\nb\n"), "a\n\nb\n\n");
    }

    #[test]
    fn empty_output_stays_empty() {
        assert_eq!(format_paragraphs(""), "");
    }
}
