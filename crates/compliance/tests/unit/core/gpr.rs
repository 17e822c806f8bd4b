//! # General-Purpose Register Tests
//!
//! Tests for the general-purpose register file used by the host hart.

use rvtest_io_core::core::arch::gpr::Gpr;

#[test]
fn test_gpr_new_initializes_to_zero() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn test_gpr_x0_ignores_writes() {
    let mut gpr = Gpr::new();
    for value in [1u64, 0xFFFF_FFFF, 0x8000_0000] {
        gpr.write(0, value);
        assert_eq!(gpr.read(0), 0);
    }
}

#[test]
fn test_gpr_write_all_registers() {
    let mut gpr = Gpr::new();
    for i in 1..32 {
        let value = ((i as u64) << 32) | (i as u64);
        gpr.write(i, value);
        assert_eq!(gpr.read(i), value);
    }
}

#[test]
fn test_gpr_register_independence() {
    let mut gpr = Gpr::new();
    gpr.write(30, 7);
    gpr.write(31, 5);
    assert_eq!(gpr.read(30), 7);
    assert_eq!(gpr.read(31), 5);
    assert_eq!(gpr.read(29), 0);
}

#[test]
fn test_gpr_dump_has_abi_names() {
    let gpr = Gpr::new();
    let dump = gpr.dump();
    assert!(dump.starts_with("zero="));
    assert!(dump.contains("  ra="));
    assert!(dump.contains("  t6="));
}
