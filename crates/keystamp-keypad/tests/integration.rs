//! Integration tests for full keypad builds.

use keystamp_blueprint::{stamp, BlockPos, BlueprintError, HostOp, Orientation, PlacementLog};
use keystamp_keypad::{
    build_cycle_counter, units, BitUnit, Keypad, KeypadConfig, KeypadError, KeypadReport,
    SequentialRouter, UNIT_ORIENTATION,
};

fn config(bits: u32) -> KeypadConfig {
    KeypadConfig {
        bits,
        ..KeypadConfig::default()
    }
}

fn build(bits: u32) -> (KeypadReport, PlacementLog, SequentialRouter) {
    let mut log = PlacementLog::new();
    let mut router = SequentialRouter::new(0, 1);
    let keypad = Keypad::allocate(&config(bits), &mut router).expect("allocate");
    let report = keypad.build(&mut log, &mut router).expect("build");
    (report, log, router)
}

fn has_cell(log: &PlacementLog, text: &str) -> bool {
    log.placements().any(|(_, cell)| cell.as_str() == text)
}

#[test]
fn four_bit_keypad() {
    let (report, _, _) = build(4);

    let bits: Vec<u32> = report.units.iter().map(|u| u.bit).collect();
    let tibs: Vec<u32> = report.units.iter().map(|u| u.tib).collect();
    assert_eq!(bits, vec![0, 2]);
    assert_eq!(tibs, vec![2, 0]);

    let bit0 = &report.units[0];
    assert!(bit0.first_bit && !bit0.booster && !bit0.edge_cut);
    let bit2 = &report.units[1];
    assert!(bit2.edge_cut && !bit2.booster && !bit2.first_bit);
}

#[test]
fn eight_bit_keypad_boosts_only_bit_four() {
    let (report, log, _) = build(8);
    assert_eq!(report.units.len(), 4);
    assert_eq!(report.boosted_bits(), vec![4]);

    // bit 4: tib 2, x = 7; booster at layer 2, row 0, column 5
    assert_eq!(log.cell_at(BlockPos::new(5, 4, 6)).unwrap().as_str(), "repeat e");
}

#[test]
fn patches_applied_once_each() {
    for bits in [2, 4, 6, 8, 16, 32] {
        let (report, _, _) = build(bits);
        assert_eq!(report.units.len() as u32, bits / 2);
        assert_eq!(report.units.iter().filter(|u| u.edge_cut).count(), 1);
        assert_eq!(report.units.iter().filter(|u| u.first_bit).count(), 1);
        assert!(report
            .units
            .iter()
            .all(|u| u.booster == (u.bit > 0 && u.bit % 4 == 0)));
    }
}

#[test]
fn edge_unit_signal_line_is_cut() {
    let (_, log, _) = build(4);
    // tib 0 at x = 1: layer 2 row 0 columns 0..2 are blanked
    assert!(log.cell_at(BlockPos::new(-1, 9, 6)).is_none());
    assert!(log.cell_at(BlockPos::new(-1, 8, 6)).is_none());
    // tib 2 at x = 7 keeps its line
    assert_eq!(log.cell_at(BlockPos::new(5, 9, 6)).unwrap().as_str(), "wire ew");
}

#[test]
fn bit_two_weight_signs() {
    let (_, log, _) = build(4);
    assert!(has_cell(&log, "birch_wall_sign[facing=south]|Bit 4|[+8]"));
    assert!(has_cell(&log, "birch_wall_sign[facing=south]|Bit 3|[+4]"));

    let unit = BitUnit::new(2, 4).unwrap();
    assert_eq!(unit.high_label(), ["Bit 4".to_string(), "[+8]".to_string()]);
    assert_eq!(unit.low_label(), ["Bit 3".to_string(), "[+4]".to_string()]);
}

#[test]
fn panel_openings() {
    let (report, log, _) = build(8);
    assert_eq!(report.openings, 3 * 8);
    for iz in 2..=4 {
        for ix in 0..24 {
            let open = log.cell_at(BlockPos::new(ix, 15, iz)).is_none();
            assert_eq!(open, ix % 6 == 2 || ix % 6 == 4, "ix={ix} iz={iz}");
        }
    }
}

#[test]
fn modules_share_the_bus() {
    let mut router = SequentialRouter::new(0, 2);
    let first = Keypad::allocate(&config(4), &mut router).unwrap();
    let second = Keypad::allocate(&config(8), &mut router).unwrap();
    assert_eq!(first.layout().x, 0);
    assert_eq!(second.layout().x, 18);
}

#[test]
fn clear_frame_then_build() {
    let mut log = PlacementLog::new();
    let mut router = SequentialRouter::new(0, 0);
    let keypad = Keypad::allocate(&config(4), &mut router).unwrap();
    keypad.clear(&mut log).unwrap();
    keypad.frame(&mut log).unwrap();
    keypad.build(&mut log, &mut router).unwrap();

    assert!(matches!(log.ops()[0], HostOp::Fill { .. }));
    assert!(matches!(log.ops()[1], HostOp::Frame { .. }));
    assert!(log.ops()[2..]
        .iter()
        .all(|op| matches!(op, HostOp::Place { .. })));
}

#[test]
fn mismatched_legend_places_nothing() {
    // the register legend has no sign characters
    let unit = BitUnit::new(2, 4).unwrap();
    let mut log = PlacementLog::new();
    let err = stamp(
        &unit.register_legend().unwrap(),
        &unit.input_stack().unwrap(),
        BlockPos::new(0, 10, 0),
        &Orientation::parse(UNIT_ORIENTATION).unwrap(),
        &mut log,
    )
    .unwrap_err();
    assert!(matches!(err, BlueprintError::UnmappedCharacter { ch: 's', .. }));
    assert!(log.is_empty());
}

#[test]
fn host_failure_stops_the_build() {
    let mut log = PlacementLog::new().fail_after(5);
    let mut router = SequentialRouter::new(0, 0);
    let keypad = Keypad::allocate(&config(4), &mut router).unwrap();
    let err = keypad.build(&mut log, &mut router).unwrap_err();
    assert!(matches!(err, KeypadError::Host(_)), "{err}");
    assert_eq!(log.len(), 5);
    assert!(router.branches().is_empty());
}

#[test]
fn host_failure_inside_a_unit_names_the_part() {
    let (report, _, _) = build(4);
    // fail on the first cell of the first input unit
    let limit = report.panel_cells + report.lever_cells;
    let mut log = PlacementLog::new().fail_after(limit);
    let mut router = SequentialRouter::new(0, 0);
    let keypad = Keypad::allocate(&config(4), &mut router).unwrap();
    let err = keypad.build(&mut log, &mut router).unwrap_err();
    match err {
        KeypadError::Blueprint { part, source } => {
            assert_eq!(part, "input unit for bit 0");
            assert!(matches!(source, BlueprintError::Host(_)));
        }
        other => panic!("expected blueprint error, got {other}"),
    }
    assert_eq!(log.len(), limit);
}

#[test]
fn builds_are_reproducible() {
    let (_, a, _) = build(8);
    let (_, b, _) = build(8);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());

    let (_, c, _) = build(6);
    assert_ne!(a.digest().unwrap(), c.digest().unwrap());
}

#[test]
fn cycle_counter_at_explicit_origin() {
    let (_, mut log, _) = build(8);
    let before = log.len();
    let placed = build_cycle_counter(&mut log, BlockPos::new(24, 9, 16)).unwrap();
    assert!(placed > 0);
    assert!(log.len() > before);
}

#[test]
fn unit_iteration_matches_report() {
    let (report, _, _) = build(16);
    let expected: Vec<u32> = units(16).map(|u| u.tib()).collect();
    let got: Vec<u32> = report.units.iter().map(|u| u.tib).collect();
    assert_eq!(got, expected);
}
