use std::fmt;

/// One 6-dot cell. Dot `n` (1..=6) is bit `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

/// Parse a dot list such as `"1245"` into a bit pattern.
const fn dots(s: &str) -> u8 {
    let bytes = s.as_bytes();
    let mut bits = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        bits |= 1 << (bytes[i] - b'1');
        i += 1;
    }
    bits
}

/// North American Braille Computer Code: one row per ASCII code from `' '`
/// to `'_'`, giving its dot pattern and the symbols it spells.
pub(crate) const NABCC: [(u8, u8, &str); 64] = [
    (b' ', dots(""), " "),
    (b'!', dots("2346"), "ホ"),
    (b'"', dots("5"), ""),
    (b'#', dots("3456"), ""),
    (b'$', dots("1246"), "ケ"),
    (b'%', dots("146"), "ク"),
    (b'&', dots("12346"), "ヘ"),
    (b'\'', dots("3"), "ワ'"),
    (b'(', dots("12356"), "ミ"),
    (b')', dots("23456"), "モ"),
    (b'*', dots("16"), "カ"),
    (b'+', dots("346"), "ユ"),
    (b',', dots("6"), ""),
    (b'-', dots("36"), "「」『』【】-"),
    (b'.', dots("46"), ""),
    (b'/', dots("34"), "ヤ"),
    (b'0', dots("356"), "ン\""),
    (b'1', dots("2"), "ッ,"),
    (b'2', dots("23"), "ヰ;"),
    (b'3', dots("25"), "ー:"),
    (b'4', dots("256"), "。."),
    (b'5', dots("26"), "?"),
    (b'6', dots("235"), "!"),
    (b'7', dots("2356"), "()"),
    (b'8', dots("236"), ""),
    (b'9', dots("35"), "ヲ"),
    (b':', dots("156"), "サ"),
    (b';', dots("56"), "、"),
    (b'<', dots("126"), "キ"),
    (b'=', dots("123456"), "メ"),
    (b'>', dots("345"), "ヨ"),
    (b'?', dots("1456"), "ス"),
    (b'@', dots("4"), ""),
    (b'A', dots("1"), "ア1A"),
    (b'B', dots("12"), "イ2B"),
    (b'C', dots("14"), "ウ3C"),
    (b'D', dots("145"), "ル4D"),
    (b'E', dots("15"), "ラ5E"),
    (b'F', dots("124"), "エ6F"),
    (b'G', dots("1245"), "レ7G"),
    (b'H', dots("125"), "リ8H"),
    (b'I', dots("24"), "オ9I"),
    (b'J', dots("245"), "ロ0J"),
    (b'K', dots("13"), "ナK"),
    (b'L', dots("123"), "ニL"),
    (b'M', dots("134"), "ヌM"),
    (b'N', dots("1345"), "ツN"),
    (b'O', dots("135"), "タO"),
    (b'P', dots("1234"), "ネP"),
    (b'Q', dots("12345"), "テQ"),
    (b'R', dots("1235"), "チR"),
    (b'S', dots("234"), "ノS"),
    (b'T', dots("2345"), "トT"),
    (b'U', dots("136"), "ハU"),
    (b'V', dots("1236"), "ヒV"),
    (b'W', dots("2456"), "ソW"),
    (b'X', dots("1346"), "フX"),
    (b'Y', dots("13456"), "ムY"),
    (b'Z', dots("1356"), "マZ"),
    (b'[', dots("246"), "コ"),
    (b'\\', dots("1256"), "シ"),
    (b']', dots("12456"), "セ"),
    (b'^', dots("45"), ""),
    (b'_', dots("456"), ""),
];

/// Inverse of [`NABCC`]: dot pattern to ASCII.
const ASCII_BY_BITS: [u8; 64] = {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < NABCC.len() {
        table[NABCC[i].1 as usize] = NABCC[i].0;
        i += 1;
    }
    table
};

impl Cell {
    pub const BLANK: Cell = Cell(0);

    /// Build a cell from its bit pattern. Bits above dot 6 are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Cell(bits & 0x3F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The cell spelled by a NABCC character (`' '..='_'`).
    pub fn from_ascii(c: char) -> Option<Self> {
        let code = u32::from(c).checked_sub(0x20)?;
        NABCC.get(code as usize).map(|&(_, bits, _)| Cell(bits))
    }

    pub fn to_ascii(self) -> char {
        char::from(ASCII_BY_BITS[self.0 as usize])
    }

    /// The matching pattern in the Unicode braille block.
    pub fn to_unicode(self) -> char {
        char::from_u32(0x2800 + u32::from(self.0)).unwrap_or('\u{2800}')
    }

    /// Raised dots in ascending order.
    pub fn dots(self) -> impl Iterator<Item = u8> {
        (1..=6).filter(move |d| self.0 & (1 << (d - 1)) != 0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii())
    }
}
