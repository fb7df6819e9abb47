//! Minimal 3×5 bitmap font.
//!
//! Each character is 5 rows of 3 dots, stored as one octal digit per row.
//! Used both to rasterize the particle silhouette and by the visualizer for
//! on-screen labels.

/// Glyph width in dots.
pub const GLYPH_W: usize = 3;
/// Glyph height in dots.
pub const GLYPH_H: usize = 5;
/// Horizontal advance per character in dots (glyph plus one dot of gap).
pub const ADVANCE: usize = GLYPH_W + 1;

/// Glyph for `c` packed as five octal digits, top row first; each digit is
/// one row of three dots with the left dot in the high bit.  Unknown
/// characters render as a centre dot.
const fn packed(c: char) -> u16 {
    match c {
        '0'       => 0o75557,
        '1'       => 0o26227,
        '2'       => 0o71747,
        '3'       => 0o71717,
        '4'       => 0o55711,
        '5'       => 0o74717,
        '6'       => 0o74757,
        '7'       => 0o71111,
        '8'       => 0o75757,
        '9'       => 0o75717,
        'a' | 'A' => 0o75755,
        'b' | 'B' => 0o65656,
        'c' | 'C' => 0o74447,
        'd' | 'D' => 0o65556,
        'e' | 'E' => 0o74747,
        'f' | 'F' => 0o74744,
        'g' | 'G' => 0o74557,
        'h' | 'H' => 0o55755,
        'i' | 'I' => 0o72227,
        'j' | 'J' => 0o11157,
        'k' | 'K' => 0o55655,
        'l' | 'L' => 0o44447,
        'm' | 'M' => 0o57555,
        'n' | 'N' => 0o75555,
        'o' | 'O' => 0o75557,
        'p' | 'P' => 0o75744,
        'q' | 'Q' => 0o75571,
        'r' | 'R' => 0o65655,
        's' | 'S' => 0o74717,
        't' | 'T' => 0o72222,
        'u' | 'U' => 0o55557,
        'v' | 'V' => 0o55522,
        'w' | 'W' => 0o55575,
        'x' | 'X' => 0o55255,
        'y' | 'Y' => 0o55722,
        'z' | 'Z' => 0o71247,
        '/'       => 0o11244,
        '-'       => 0o00700,
        '.'       => 0o00002,
        ','       => 0o00024,
        ':'       => 0o02020,
        '='       => 0o07070,
        '+'       => 0o02720,
        '!'       => 0o22202,
        '♥'       => 0o57720,
        ' '       => 0o00000,
        _         => 0o00200,
    }
}

/// Bit pattern for `c`, one row per entry.
pub fn glyph(c: char) -> [u8; GLYPH_H] {
    let code = packed(c);
    let mut rows = [0u8; GLYPH_H];
    for (i, row) in rows.iter_mut().enumerate() {
        *row = ((code >> (3 * (GLYPH_H - 1 - i))) & 0o7) as u8;
    }
    rows
}

/// True if dot (`col`, `row`) of `c` is lit.
pub fn dot(c: char, col: usize, row: usize) -> bool {
    col < GLYPH_W && row < GLYPH_H && glyph(c)[row] & (1 << (GLYPH_W - 1 - col)) != 0
}

/// Width of `text` in dots, without trailing gap.
pub fn text_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { n * ADVANCE - 1 }
}

/// Number of lit dots in `text`.
pub fn lit_dots(text: &str) -> usize {
    text.chars()
        .map(|c| glyph(c).iter().map(|row| row.count_ones() as usize).sum::<usize>())
        .sum()
}
