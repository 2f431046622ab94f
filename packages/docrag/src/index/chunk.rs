/// Upper bound on chunk length in characters.
pub const MAX_CHUNK_CHARS: usize = 1200;

/// Split `text` into chunks no longer than [`MAX_CHUNK_CHARS`].
///
/// Paragraphs (blank-line separated) are packed greedily so chunk
/// boundaries land on paragraph breaks where possible. A single
/// paragraph longer than the bound is split hard on character count.
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        for piece in split_oversize(paragraph) {
            let needed = piece.chars().count();
            let current_len = current.chars().count();
            if !current.is_empty() && current_len + 2 + needed > MAX_CHUNK_CHARS {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_oversize(paragraph: &str) -> Vec<String> {
    if paragraph.chars().count() <= MAX_CHUNK_CHARS {
        return vec![paragraph.to_string()];
    }
    let chars: Vec<char> = paragraph.chars().collect();
    chars
        .chunks(MAX_CHUNK_CHARS)
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("hello world");
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn test_packs_paragraphs() {
        let text = format!("{}\n\n{}", "a".repeat(500), "b".repeat(500));
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("\n\n"));
    }

    #[test]
    fn test_splits_on_paragraph_boundary() {
        let text = format!("{}\n\n{}", "a".repeat(800), "b".repeat(800));
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
    }

    #[test]
    fn test_hard_splits_giant_paragraph() {
        let text = "x".repeat(MAX_CHUNK_CHARS * 2 + 100);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("").is_empty());
        assert!(chunk_text("\n\n\n\n").is_empty());
    }
}
