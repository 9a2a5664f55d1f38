//! Plain-terminal rendering of question markup.
//!
//! Question text is lightweight markup aimed at a host renderer. For
//! the terminal we flatten it: breaks and table rows become newlines,
//! cells become column gaps, every other tag disappears.

/// Strip markup down to plain text.
pub fn render_text(markup: &str) -> String {
    let mut text = markup.to_string();
    for (from, to) in [
        ("<br>", "\n"),
        ("<br/>", "\n"),
        ("<br />", "\n"),
        ("</p>", "\n"),
        ("</tr>", "\n"),
        ("</th>", "  "),
        ("</td>", "  "),
    ] {
        text = text.replace(from, to);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    // collapse the blank runs left behind by stripped block tags
    let mut lines: Vec<&str> = Vec::new();
    let mut last_blank = true;
    for line in out.lines().map(str::trim_end) {
        let blank = line.trim().is_empty();
        if blank && last_blank {
            continue;
        }
        last_blank = blank;
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        assert_eq!(
            render_text("<p>Work out <b>6 × 14</b>. <span class=\"endmark\">[1]</span></p>"),
            "Work out 6 × 14. [1]"
        );
    }

    #[test]
    fn breaks_become_newlines() {
        assert_eq!(render_text("First line.<br>Second line."), "First line.\nSecond line.");
    }

    #[test]
    fn tables_flatten_to_rows() {
        let markup = "<table class=\"qtable\"><tr><th>Item</th><th class=\"num\">Cost</th></tr>\
                      <tr><td>Cap</td><td class=\"num\">£12</td></tr></table>";
        let text = render_text(markup);
        assert_eq!(text, "Item  Cost\nCap  £12");
    }

    #[test]
    fn blank_runs_collapse() {
        let text = render_text("<p>One.</p><p></p><p>Two.</p>");
        assert_eq!(text, "One.\n\nTwo.");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render_text("Work out: -5 + 8."), "Work out: -5 + 8.");
    }
}
