//! The baked ASCII font.
//!
//! 95 glyphs covering `' '..='~'`, each stored in its packed GPU form and
//! decoded once, at compile time, into [`Glyph`]s. The table is a plain
//! `static`: no lazy initialisation, no interior mutability, safe to read
//! from any thread.

use thiserror::Error;

use crate::glyph::Glyph;

/// First printable code point (space).
pub const ASCII_MIN: u32 = 0x20;
/// Last printable code point (tilde).
pub const ASCII_MAX: u32 = 0x7E;

/// Number of glyphs in the table.
pub const GLYPH_COUNT: usize = (ASCII_MAX - ASCII_MIN + 1) as usize;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphError {
    #[error("Code point {0:?} is outside the printable ASCII range")]
    CodepointOutOfRange(char),
}

/// Packed glyph codes, indexed by `code - ASCII_MIN`.
#[rustfmt::skip]
const PACKED: [u32; GLYPH_COUNT] = [
    0x0000_0000, 0x0842_1004, 0x14A5_0000, 0x15F5_2BEA, // ' ' '!' '"' '#'
    0xBC17_41E4, 0x0D64_1358, 0x1C1F_252E, 0x0842_0000, // '$' '%' '&' "'"
    0x8842_1088, 0x8842_1082, 0x09F2_2800, 0x0042_7C84, // '(' ')' '*' '+'
    0x4000_3188, 0x0000_7C00, 0x0000_018C, 0x1082_1042, // ',' '-' '.' '/'
    0x1D18_C62E, 0x10C5_2108, 0x1D18_383F, 0x1F06_422E, // '0' '1' '2' '3'
    0x3149_47F0, 0x3E17_C22E, 0x1C17_C62E, 0x3F04_2084, // '4' '5' '6' '7'
    0x1D17_462E, 0x1D18_FA0E, 0x00C6_018C, 0x58C0_3188, // '8' '9' ':' ';'
    0x0082_0888, 0x000F_83E0, 0x0022_2082, 0x1D08_3004, // '<' '=' '>' '?'
    0xA3DA_F42E, 0x1D18_FE31, 0x1F17_C62F, 0x1D10_862E, // '@' 'A' 'B' 'C'
    0x1F18_C62F, 0x3E17_843F, 0x3E10_BC21, 0x3C1E_C63E, // 'D' 'E' 'F' 'G'
    0x231F_C631, 0x3E42_109F, 0x3D08_422E, 0x2292_9D31, // 'H' 'I' 'J' 'K'
    0x0210_843F, 0x23BA_C631, 0x233A_E631, 0x1D18_C62E, // 'L' 'M' 'N' 'O'
    0x1F18_BC21, 0x1D18_D536, 0x1F18_BD31, 0x3C17_422E, // 'P' 'Q' 'R' 'S'
    0x3E42_1084, 0x2318_C62E, 0x2318_A944, 0x231A_D54A, // 'T' 'U' 'V' 'W'
    0x22A2_1151, 0x2315_1084, 0x3E82_083F, 0x8421_084E, // 'X' 'Y' 'Z' '['
    0x0422_1108, 0x9084_210E, 0x08A8_8000, 0x4000_001F, // '\\' ']' '^' '_'
    0x0444_0000, 0x00E8_7A3E, 0x02F8_C62F, 0x00E8_862E, // '`' 'a' 'b' 'c'
    0x21E8_C63E, 0x00E8_FC2E, 0x1D10_BC21, 0x7D18_FA0E, // 'd' 'e' 'f' 'g'
    0x02F8_C631, 0x1007_A108, 0xE2E8_03D0, 0x0314_9571, // 'h' 'i' 'j' 'k'
    0x0E42_1098, 0x00FA_D6B5, 0x00F8_C631, 0x00E8_C62E, // 'l' 'm' 'n' 'o'
    0x5F18_BC21, 0x7D18_FA10, 0x00F8_8421, 0x01E0_BA0F, // 'p' 'q' 'r' 's'
    0x02F0_862E, 0x0118_C63E, 0x0118_A944, 0x011A_D54A, // 't' 'u' 'v' 'w'
    0x0115_1151, 0x6318_FA0E, 0x01F4_105F, 0x8420_884C, // 'x' 'y' 'z' '{'
    0x8842_1084, 0x9088_2106, 0x0009_5520, // '|' '}' '~'
];

static BUILTIN: GlyphTable = GlyphTable::from_packed(&PACKED);

/// Whether `ch` has an entry in the font.
pub fn is_printable(ch: char) -> bool {
    (ASCII_MIN..=ASCII_MAX).contains(&(ch as u32))
}

/// Immutable mapping from printable ASCII to glyphs.
#[derive(Debug)]
pub struct GlyphTable {
    glyphs: [Glyph; GLYPH_COUNT],
}

impl GlyphTable {
    /// Decode a packed table into explicit glyphs.
    pub const fn from_packed(codes: &[u32; GLYPH_COUNT]) -> Self {
        let mut glyphs = [Glyph::BLANK; GLYPH_COUNT];
        let mut i = 0;
        while i < GLYPH_COUNT {
            glyphs[i] = Glyph::unpack(codes[i]);
            i += 1;
        }
        Self { glyphs }
    }

    /// The process-wide built-in font.
    pub fn builtin() -> &'static GlyphTable {
        &BUILTIN
    }

    /// Look up the glyph for `ch`.
    pub fn lookup(&self, ch: char) -> Result<Glyph, GlyphError> {
        if !is_printable(ch) {
            return Err(GlyphError::CodepointOutOfRange(ch));
        }
        Ok(self.glyphs[(ch as u32 - ASCII_MIN) as usize])
    }

    /// Look up `ch`, falling back to the blank glyph.
    ///
    /// The fallback is indistinguishable from a space once rendered.
    pub fn lookup_or_blank(&self, ch: char) -> Glyph {
        self.lookup(ch).unwrap_or(Glyph::BLANK)
    }

    /// Packed GPU code for `ch`, if printable.
    pub fn code(&self, ch: char) -> Option<u32> {
        self.lookup(ch).ok().map(Glyph::pack)
    }

    /// All glyphs in code-point order, paired with their character.
    pub fn iter(&self) -> impl Iterator<Item = (char, Glyph)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .filter_map(|(i, g)| char::from_u32(ASCII_MIN + i as u32).map(|ch| (ch, *g)))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::ShapeKind;

    #[test]
    fn test_table_has_95_entries() {
        let table = GlyphTable::builtin();
        assert_eq!(table.len(), 95);
        assert_eq!(table.iter().count(), 95);
        assert_eq!(table.iter().next().map(|(c, _)| c), Some(' '));
        assert_eq!(table.iter().last().map(|(c, _)| c), Some('~'));
    }

    #[test]
    fn test_every_printable_resolves() {
        let table = GlyphTable::builtin();
        for code in ASCII_MIN..=ASCII_MAX {
            let ch = char::from_u32(code).unwrap();
            assert!(table.lookup(ch).is_ok(), "{ch:?} should be in the table");
        }
    }

    #[test]
    fn test_lookup_is_stable() {
        let table = GlyphTable::builtin();
        for (ch, glyph) in table.iter() {
            assert_eq!(table.lookup(ch), Ok(glyph));
            assert_eq!(table.lookup(ch), table.lookup(ch));
        }
    }

    #[test]
    fn test_packed_codes_match_source_table() {
        let table = GlyphTable::builtin();
        assert_eq!(table.code(' '), Some(0x0000_0000));
        assert_eq!(table.code('A'), Some(0x1D18_FE31));
        assert_eq!(table.code('g'), Some(0x7D18_FA0E));
        assert_eq!(table.code('j'), Some(0xE2E8_03D0));
        assert_eq!(table.code('~'), Some(0x0009_5520));
        for (i, (ch, _)) in table.iter().enumerate() {
            assert_eq!(table.code(ch), Some(PACKED[i]));
        }
    }

    #[test]
    fn test_out_of_range() {
        let table = GlyphTable::builtin();
        assert_eq!(table.lookup('\x1F'), Err(GlyphError::CodepointOutOfRange('\x1F')));
        assert_eq!(table.lookup('\x7F'), Err(GlyphError::CodepointOutOfRange('\x7F')));
        assert!(table.lookup('é').is_err());
        assert_eq!(table.code('\n'), None);
    }

    #[test]
    fn test_lookup_or_blank() {
        let table = GlyphTable::builtin();
        assert_eq!(table.lookup_or_blank('\x01'), Glyph::BLANK);
        assert_eq!(table.lookup_or_blank(' '), Glyph::BLANK);
        assert_eq!(table.lookup_or_blank('A').pack(), 0x1D18_FE31);
    }

    #[test]
    fn test_shape_classes() {
        let table = GlyphTable::builtin();
        let shapes = |kind: ShapeKind| -> String {
            table
                .iter()
                .filter(|(_, g)| g.shape == kind)
                .map(|(c, _)| c)
                .collect()
        };
        assert_eq!(shapes(ShapeKind::Low), ",;_gpqy");
        assert_eq!(shapes(ShapeKind::Big), "$()@[]{|}");
        assert_eq!(shapes(ShapeKind::Roll), "j");
    }

    #[test]
    fn test_error_message() {
        let err = GlyphError::CodepointOutOfRange('\x01');
        assert!(err.to_string().contains("printable ASCII"));
    }

    #[test]
    fn test_is_printable() {
        assert!(is_printable(' '));
        assert!(is_printable('~'));
        assert!(!is_printable('\x7F'));
        assert!(!is_printable('\t'));
    }
}
