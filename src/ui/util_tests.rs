#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "1,234.56");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "1.50");
    assert_eq!(format_amount(dec!(5)), "5.00");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.5)), "-42.50");
    assert_eq!(format_amount(dec!(-99999.01)), "-99,999.01");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "1,234,567.89");
    assert_eq!(format_amount(dec!(10000000)), "10,000,000.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_and_exact() {
    assert_eq!(truncate("lunch", 10), "lunch");
    assert_eq!(truncate("lunch", 5), "lunch");
}

#[test]
fn test_truncate_long() {
    assert_eq!(truncate("lunch money", 5), "lunc…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("lunch", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..10 {
        scroll_down(&mut index, &mut scroll, 3, 2);
    }
    assert_eq!(index, 2);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_up_stops_at_zero() {
    let (mut index, mut scroll) = (2, 1);
    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_to_bottom_positions_page() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!(index, 9);
    assert_eq!(scroll, 6);
}

#[test]
fn test_scroll_to_top() {
    let (mut index, mut scroll) = (7, 5);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
