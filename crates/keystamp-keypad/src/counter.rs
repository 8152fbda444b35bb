//! Cycle counter sub-structure.
//!
//! Not part of the default keypad build: it has no fixed place in the module
//! yet, so callers stamp it at an origin of their choosing.

use keystamp_blueprint::{Legend, SliceStack};

/// Orientation of the counter: layers along +x, rows toward -z, columns down.
pub const COUNTER_ORIENTATION: &str = "Xzy";

const COUNTER_TEMPLATE: [[&str; 3]; 7] = [
    ["            ", "  ~~c~~c~   ", "    |  |    "],
    ["            ", " ~=--=--=   ", "    -  -    "],
    ["  x  x  x   ", "~=/  /  /   ", "            "],
    ["7 i  i  i   ", "=           ", "            "],
    ["~>x~>x>Cx>Cx", " ^  ^ ^| ^| ", " ~<~~<~<~~  "],
    ["--|--|--|--|", " -  - -- -- ", " ---------  "],
    ["  =  =  =  =", "            ", "            "],
];

pub fn counter_template() -> SliceStack {
    SliceStack::from_layers(COUNTER_TEMPLATE)
}

pub fn counter_legend() -> keystamp_blueprint::Result<Legend> {
    Legend::from_pairs([
        ('~', "wire ew"),
        ('|', "wire ns"),
        ('i', "torch"),
        ('/', "torch s"),
        ('7', "torch n"),
        ('^', "repeat s"),
        ('>', "repeat e"),
        ('<', "repeat w"),
        ('c', "compars w"),
        ('C', "compars e"),
        ('L', "lamp"),
        ('=', "data block"),
        ('-', "data slab"),
        ('x', "inst block"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystamp_blueprint::{plan, BlockPos, Orientation};

    #[test]
    fn legend_covers_template() {
        let legend = counter_legend().unwrap();
        assert!(counter_template().cells().all(|(_, ch)| legend.contains(ch)));
    }

    #[test]
    fn counter_plans_cleanly() {
        let o = Orientation::parse(COUNTER_ORIENTATION).unwrap();
        let placed = plan(
            &counter_legend().unwrap(),
            &counter_template(),
            BlockPos::new(0, 20, 16),
            &o,
        )
        .unwrap();
        assert_eq!(placed.len(), counter_template().filled_count());
        // layer 4, row 0, column 11: 'x' -> x + 4, z - 0, y - 11
        let last = placed
            .iter()
            .find(|p| p.pos == BlockPos::new(4, 9, 16))
            .unwrap();
        assert_eq!(last.cell.as_str(), "inst block");
    }
}
