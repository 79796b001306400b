//! Line wrapping and pagination for monospace letter text.
//!
//! Hard line breaks in the letter are always kept, blank lines included.
//! A source line that fits the column width is emitted untouched; a longer one
//! is greedily word-wrapped at spaces. Runs of spaces between words survive
//! unless a break lands on them, and the leading indentation stays on the
//! first output line. Words wider than a whole line are split mid-word.

/// Wraps `text` to at most `columns` characters per line.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).replace('\t', "    "))
        .flat_map(|line| wrap_line(&line, columns))
        .collect()
}

/// Splits wrapped lines into pages of at most `lines_per_page` lines.
/// Always returns at least one page.
pub fn paginate(lines: Vec<String>, lines_per_page: usize) -> Vec<Vec<String>> {
    let lines_per_page = lines_per_page.max(1);
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines
        .chunks(lines_per_page)
        .map(|page| page.to_vec())
        .collect()
}

fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let body = line.trim_start_matches(' ');
    let words = words_with_gaps(body);

    // The indent shrinks until the first word fits beside it.
    let first_word_len = words.first().map_or(1, |(_, w)| w.chars().count().max(1));
    let indent_len = (line.len() - body.len()).min(columns.saturating_sub(first_word_len));

    let mut lines = Vec::new();
    let mut current = " ".repeat(indent_len);
    let mut current_len = indent_len;
    let mut has_word = false;

    for (gap, word) in words {
        let word_len = word.chars().count();

        if has_word && current_len + gap.len() + word_len <= columns {
            current.push_str(gap);
            current.push_str(word);
            current_len += gap.len() + word_len;
            continue;
        }

        // A break consumes the gap it lands on.
        if has_word {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len + word_len <= columns {
            current.push_str(word);
            current_len += word_len;
        } else {
            for c in word.chars() {
                if current_len >= columns {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += 1;
            }
        }
        has_word = true;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits on spaces, pairing each word with the exact run of spaces before it.
/// Trailing spaces are dropped.
fn words_with_gaps(body: &str) -> Vec<(&str, &str)> {
    let mut words = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        let word_start = rest.len() - rest.trim_start_matches(' ').len();
        let (gap, tail) = rest.split_at(word_start);
        if tail.is_empty() {
            break;
        }
        let word_end = tail.find(' ').unwrap_or(tail.len());
        let (word, remainder) = tail.split_at(word_end);
        words.push((gap, word));
        rest = remainder;
    }
    words
}
