//! Glyph code model.
//!
//! On the GPU a glyph is a single `u32`: a 5-column pixel mask in the low
//! 30 bits and two shape bits on top. The shader never masks those top
//! bits; it compares the whole code against three magnitude thresholds,
//! so the flags are cumulative:
//!
//! ```text
//!   code >  0x4000_0000  →  low   (drawn one row below the baseline)
//!   code >  0x8000_0000  →  big   (7 rows instead of 6)
//!   code >  0xC000_0000  →  roll  (7th row wraps into the 6 addressable rows)
//! ```
//!
//! Host code works with [`Glyph`] instead and converts at the table
//! boundary with [`Glyph::unpack`] / [`Glyph::pack`].

/// Columns per glyph cell.
pub const GLYPH_COLUMNS: u32 = 5;

/// Addressable rows in a glyph mask.
pub const GLYPH_ROWS: u32 = 6;

/// Bits 0..=29 hold the pixel mask.
pub const MASK_BITS: u32 = 0x3FFF_FFFF;

const LOW_THRESHOLD: u32 = 0x4000_0000;
const BIG_THRESHOLD: u32 = 0x8000_0000;
const ROLL_THRESHOLD: u32 = 0xC000_0000;

/// Shape modifier carried in the two high bits of a glyph code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Regular 6-row cell sitting on the baseline.
    #[default]
    Normal,
    /// Shifted one row down (comma, underscore, `g`, `p`, ...).
    Low,
    /// Seven rows tall, shifted one row down (brackets, `$`, `|`, ...).
    Big,
    /// Seven rows, with the sample point rolled by four rows before the fold.
    Roll,
}

impl ShapeKind {
    /// Decode the shape from a packed code using the shader's thresholds.
    pub const fn from_code(code: u32) -> Self {
        if code > ROLL_THRESHOLD {
            ShapeKind::Roll
        } else if code > BIG_THRESHOLD {
            ShapeKind::Big
        } else if code > LOW_THRESHOLD {
            ShapeKind::Low
        } else {
            ShapeKind::Normal
        }
    }

    /// High two bits for this shape.
    pub const fn tag_bits(self) -> u32 {
        match self {
            ShapeKind::Normal => 0,
            ShapeKind::Low => 0x4000_0000,
            ShapeKind::Big => 0x8000_0000,
            ShapeKind::Roll => 0xC000_0000,
        }
    }

    /// Vertical offset in rows (0 or 1).
    pub const fn low(self) -> u32 {
        (!matches!(self, ShapeKind::Normal)) as u32
    }

    /// Extra rows above the regular six (0 or 1).
    pub const fn big(self) -> u32 {
        matches!(self, ShapeKind::Big | ShapeKind::Roll) as u32
    }

    /// Row roll applied by the rasterizer (0 or 1).
    pub const fn roll(self) -> u32 {
        matches!(self, ShapeKind::Roll) as u32
    }

    /// Rows covered by the cell: 6, or 7 for big and rolled glyphs.
    pub const fn rows(self) -> u32 {
        GLYPH_ROWS + self.big()
    }
}

/// A glyph in explicit form: pixel mask plus shape.
///
/// Mask bit `row * 5 + col` is pixel (`row`, `col`). Row 0 is the lowest
/// row of the cell in clip space, column 0 the leftmost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub mask: u32,
    pub shape: ShapeKind,
}

impl Glyph {
    /// The empty glyph. Packs to `0` and rasterizes fully blank.
    pub const BLANK: Glyph = Glyph {
        mask: 0,
        shape: ShapeKind::Normal,
    };

    /// Build a glyph, dropping any mask bits above bit 29.
    pub const fn new(mask: u32, shape: ShapeKind) -> Self {
        Self {
            mask: mask & MASK_BITS,
            shape,
        }
    }

    /// Split a packed code into mask and shape.
    ///
    /// A tagged code whose mask is zero sits exactly on a threshold and
    /// decodes as the next lower shape, as it does on the GPU.
    pub const fn unpack(code: u32) -> Self {
        Self {
            mask: code & MASK_BITS,
            shape: ShapeKind::from_code(code),
        }
    }

    /// Packed wire form for the GPU.
    pub const fn pack(self) -> u32 {
        (self.mask & MASK_BITS) | self.shape.tag_bits()
    }

    /// Mask bit for (`row`, `col`). Out-of-cell coordinates read as clear.
    pub const fn pixel(self, row: u32, col: u32) -> bool {
        if row >= GLYPH_ROWS || col >= GLYPH_COLUMNS {
            return false;
        }
        (self.mask >> (row * GLYPH_COLUMNS + col)) & 1 == 1
    }

    pub const fn is_blank(self) -> bool {
        self.mask == 0
    }
}

// ===================================================================
// Tests
// ===================================================================
