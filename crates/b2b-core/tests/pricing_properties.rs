//! Property tests for the order pricing engine: totals are non-negative,
//! deterministic, and allocate one order discount proportionally across
//! lines with different VAT rates.

use b2b_core::money::Money;
use b2b_core::pricing::{
    compute_discount_value, compute_grand_total, compute_subtotal, compute_vat_total,
    compute_vat_total_with, line_breakdown, OrderTotals, VatRounding,
};
use b2b_core::types::{DiscountRate, OrderItem, VatRate};
use proptest::prelude::*;

/// Polish VAT rates plus zero.
const VAT_RATES: [u32; 4] = [0, 500, 800, 2300];

fn item_strategy() -> impl Strategy<Value = OrderItem> {
    (1i64..=500, 0i64..=500_000, prop::sample::select(VAT_RATES.to_vec())).prop_map(
        |(qty, price, vat)| {
            OrderItem::new(
                "p",
                "SKU-1",
                "Item",
                qty,
                Money::from_cents(price),
                VatRate::from_bps(vat),
            )
        },
    )
}

fn items_strategy() -> impl Strategy<Value = Vec<OrderItem>> {
    prop::collection::vec(item_strategy(), 0..20)
}

/// Exact VAT at each line's own rate with no discount, rounded once.
fn undiscounted_vat(items: &[OrderItem]) -> Money {
    let exact: i128 = items
        .iter()
        .map(|i| i.line_gross().cents() as i128 * i.vat_rate_bps as i128)
        .sum();
    Money::from_cents(((2 * exact + 10_000) / 20_000) as i64)
}

proptest! {
    /// Without a discount, the grand total is subtotal plus VAT at each line's rate.
    #[test]
    fn prop_no_discount_total_is_subtotal_plus_line_vat(items in items_strategy()) {
        let subtotal = compute_subtotal(&items);
        let grand = compute_grand_total(&items, DiscountRate::zero());
        prop_assert_eq!(grand, subtotal + undiscounted_vat(&items));
    }

    /// Valid orders never produce negative figures, and the discount never
    /// exceeds the subtotal while it stays within 100%.
    #[test]
    fn prop_totals_are_non_negative(
        items in items_strategy(),
        discount_bps in 0i32..=10_000,
    ) {
        let totals = OrderTotals::compute(&items, DiscountRate::from_bps(discount_bps));

        prop_assert!(!totals.grand_total.is_negative());
        prop_assert!(!totals.vat.is_negative());
        prop_assert!(!totals.discount.is_negative());
        prop_assert!(totals.discount <= totals.subtotal);
        prop_assert!((totals.grand_total - (totals.net + totals.vat)).abs().cents() <= 1);

        let printed = OrderTotals::compute_with(
            &items,
            DiscountRate::from_bps(discount_bps),
            VatRounding::PerLine,
        );
        prop_assert_eq!(printed.grand_total, printed.net + printed.vat);
    }

    /// Any discount, including out-of-range ones, keeps the grand total ≥ 0.
    #[test]
    fn prop_grand_total_floor_holds_for_any_discount(
        items in items_strategy(),
        discount_bps in any::<i32>(),
    ) {
        let discount = DiscountRate::from_bps(discount_bps);
        prop_assert!(!compute_grand_total(&items, discount).is_negative());
        prop_assert!(!compute_discount_value(compute_subtotal(&items), discount).is_negative());
    }

    /// Recomputing from the same items yields identical results.
    #[test]
    fn prop_totals_are_idempotent(
        items in items_strategy(),
        discount_bps in 0i32..=10_000,
    ) {
        let discount = DiscountRate::from_bps(discount_bps);
        let first = OrderTotals::compute(&items, discount);
        let second = OrderTotals::compute(&items, discount);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.vat, compute_vat_total(&items, discount));
    }

    /// Two lines of equal value at 23% and 8% with a 10% discount:
    /// VAT = 0.9 × (line × 0.23 + line × 0.08) = line × 0.279, rounded once.
    #[test]
    fn prop_equal_lines_share_discount_proportionally(line_cents in 1i64..=10_000_000) {
        let items = vec![
            OrderItem::new("a", "A", "A", 1, Money::from_cents(line_cents), VatRate::from_bps(2300)),
            OrderItem::new("b", "B", "B", 1, Money::from_cents(line_cents), VatRate::from_bps(800)),
        ];

        // round_half_up(279 × line / 1000)
        let expected = (2 * 279 * line_cents + 1000) / 2000;

        let vat = compute_vat_total(&items, DiscountRate::from_bps(1000));
        prop_assert_eq!(vat.cents(), expected);
    }

    /// The two rounding policies stay within one grosz per line of each other.
    #[test]
    fn prop_rounding_policies_stay_close(
        items in items_strategy(),
        discount_bps in 0i32..=10_000,
    ) {
        let discount = DiscountRate::from_bps(discount_bps);
        let on_total = compute_vat_total_with(&items, discount, VatRounding::OnTotal);
        let per_line = compute_vat_total_with(&items, discount, VatRounding::PerLine);
        prop_assert!((on_total - per_line).abs().cents() <= items.len() as i64);
    }

    /// The invoice breakdown sums to the per-line VAT total, line for line in order.
    #[test]
    fn prop_breakdown_matches_per_line_policy(
        items in items_strategy(),
        discount_bps in 0i32..=10_000,
    ) {
        let discount = DiscountRate::from_bps(discount_bps);
        let lines = line_breakdown(&items, discount);
        prop_assert_eq!(lines.len(), items.len());

        let vat: Money = lines.iter().map(|l| l.vat).sum();
        prop_assert_eq!(vat, compute_vat_total_with(&items, discount, VatRounding::PerLine));
    }
}

#[test]
fn tiles_and_grout_scenario() {
    let items = vec![
        OrderItem::new("p1", "CER-001", "Płytka gres 60x60", 10, Money::from_cents(8999), VatRate::from_bps(2300)),
        OrderItem::new("p2", "CER-002", "Fuga elastyczna 2kg", 4, Money::from_cents(2450), VatRate::from_bps(2300)),
    ];
    let discount = DiscountRate::from_bps(500);

    // 997.90 - 49.895 = 948.005; × 0.23 = 218.04115; total 1166.04615
    assert_eq!(compute_subtotal(&items).cents(), 99790);
    assert_eq!(compute_vat_total(&items, discount).cents(), 21804);
    assert_eq!(compute_grand_total(&items, discount).cents(), 116605);
}

#[test]
fn empty_order_is_all_zero() {
    let items: Vec<OrderItem> = Vec::new();
    let discount = DiscountRate::from_bps(500);

    assert!(compute_subtotal(&items).is_zero());
    assert!(compute_discount_value(compute_subtotal(&items), discount).is_zero());
    assert!(compute_vat_total(&items, discount).is_zero());
    assert!(compute_grand_total(&items, discount).is_zero());
}
