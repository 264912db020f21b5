use palette::{named, Srgb};

// ---------------------------------------------------------------------------
// Line palette
// ---------------------------------------------------------------------------

/// Fixed line colours, cycled by series insertion order.
pub const LINE_PALETTE: [Srgb<u8>; 7] = [
    named::RED,
    named::GREEN,
    named::BLUE,
    named::DARKCYAN,
    named::MAGENTA,
    named::GOLD,
    named::BLACK,
];

/// Colour of the `index`-th line of a chart.
pub fn line_color(index: usize) -> Srgb<u8> {
    LINE_PALETTE[index % LINE_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_palette() {
        assert_eq!(line_color(0), named::RED);
        assert_eq!(line_color(2), named::BLUE);
        assert_eq!(line_color(LINE_PALETTE.len()), line_color(0));
        assert_eq!(line_color(LINE_PALETTE.len() + 1), named::GREEN);
    }
}
