use leitor_core::page::WordToken;
use unicode_segmentation::UnicodeSegmentation;

/// A visible piece of a token on one line. A token broken by a newline
/// appears as several pieces sharing the same `token` ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    pub token: usize,
    pub col: u16,
    pub width: u16,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordLayout {
    pub lines: Vec<Vec<PlacedWord>>,
}

impl WordLayout {
    /// Piece under a body-relative cell.
    pub fn hit(&self, col: u16, row: u16) -> Option<&PlacedWord> {
        let line = self.lines.get(row as usize)?;
        line.iter().find(|w| col >= w.col && col < w.col + w.width)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Greedy left-to-right flow of tokens into lines of `width` cells. Blank
/// tokens (from doubled spaces) keep their extra space.
pub fn layout_words(tokens: &[WordToken], width: u16) -> WordLayout {
    let width = width.max(1);
    let mut lines: Vec<Vec<PlacedWord>> = vec![Vec::new()];
    let mut col: u16 = 0;

    for token in tokens {
        let pieces: Vec<&str> = token.text.split('\n').collect();
        let single = pieces.len() == 1;
        for (i, piece) in pieces.into_iter().enumerate() {
            if i > 0 {
                lines.push(Vec::new());
                col = 0;
            }
            let piece = piece.trim_end_matches('\r');
            if piece.is_empty() {
                if single && col > 0 && col < width {
                    col += 1;
                }
                continue;
            }
            let w = piece.graphemes(true).count().min(u16::MAX as usize) as u16;
            if col > 0 && col.saturating_add(w) > width {
                lines.push(Vec::new());
                col = 0;
            }
            if let Some(line) = lines.last_mut() {
                line.push(PlacedWord {
                    token: token.index,
                    col,
                    width: w.min(width),
                    text: piece.to_string(),
                });
            }
            col = col.saturating_add(w).saturating_add(1);
        }
    }

    WordLayout { lines }
}
