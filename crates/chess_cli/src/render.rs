//! Text rendering of the board, rank 8 at the top.

fn glyph(c: char) -> char {
    match c {
        'K' => '♔',
        'Q' => '♕',
        'R' => '♖',
        'B' => '♗',
        'N' => '♘',
        'P' => '♙',
        'k' => '♚',
        'q' => '♛',
        'r' => '♜',
        'b' => '♝',
        'n' => '♞',
        'p' => '♟',
        other => other,
    }
}

/// `view` is indexed `[row][column]` with row 0 = rank 1.
pub fn render_board(view: &[[Option<char>; 8]; 8], unicode: bool) -> String {
    let mut out = String::new();
    for (row, squares) in view.iter().enumerate().rev() {
        out.push_str(&format!("{} ", row + 1));
        let cells: Vec<String> = squares
            .iter()
            .map(|sq| match sq {
                Some(c) if unicode => glyph(*c).to_string(),
                Some(c) => c.to_string(),
                None => ".".to_string(),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}
