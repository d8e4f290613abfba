//! # Pricing Module
//!
//! The order pricing engine: subtotal, discount, VAT and grand total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Pricing Pipeline                               │
//! │                                                                         │
//! │  items ──► subtotal = Σ qty × unit price                                │
//! │                 │                                                       │
//! │                 ├──► discount = subtotal × max(0, discount%)            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          net = max(0, subtotal - discount)                              │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          ratio = net / subtotal          (one shrink factor per order)  │
//! │                 │                                                       │
//! │     ┌───────────┼───────────┐                                           │
//! │     ▼           ▼           ▼                                           │
//! │   line₁×ratio  line₂×ratio  lineₙ×ratio   taxable base per line         │
//! │   × VAT₁       × VAT₂       × VATₙ        each line at its OWN rate     │
//! │     └───────────┼───────────┘                                           │
//! │                 ▼                                                       │
//! │          VAT = Σ line VAT                                               │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          grand total = net + VAT                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mixed VAT Rates
//! A single order-level discount is spread over all lines proportionally to
//! their value, and VAT is then taken per line at that line's rate. Applying
//! the discount to the total and guessing a blended rate gives wrong VAT for
//! orders mixing 23% and 8% goods.
//!
//! ## Exactness
//! Neither the discount nor the shrink factor is ever rounded or turned into
//! a float. With `keep = 10000 - discount bps`:
//!
//! ```text
//! net       = subtotal × keep / 10⁴
//! line VAT  = line × keep × vat bps / 10⁸
//! ```
//!
//! Both are evaluated exactly in `i128` and rounded half-up to the grosz
//! only where [`VatRounding`] says. The grand total is rounded once, from
//! the exact net plus VAT.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{div_round_half_up, Money, BPS_SCALE};
use crate::types::{DiscountRate, OrderItem};

/// Denominator of exact line VAT: one basis-point factor for the discount,
/// one for the VAT rate.
const EXACT_SCALE: i128 = BPS_SCALE * BPS_SCALE;

// =============================================================================
// Rounding Policy
// =============================================================================

/// Where VAT is rounded to the minor unit.
///
/// ## Policies
/// ```text
/// OnTotal:  VAT = round( Σ exact line VAT )     ← default
/// PerLine:  VAT = Σ round( exact line VAT )     ← matches printed invoice lines
/// ```
/// The two differ by at most one grosz per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VatRounding {
    /// Sum exact line VAT, round once.
    #[default]
    OnTotal,
    /// Round each line's VAT, then sum.
    PerLine,
}

// =============================================================================
// Engine Functions
// =============================================================================

/// Sum of `quantity × unit price` over all lines. Zero for no lines.
///
/// ## Example
/// ```rust
/// use b2b_core::pricing::compute_subtotal;
///
/// assert!(compute_subtotal(&[]).is_zero());
/// ```
pub fn compute_subtotal(items: &[OrderItem]) -> Money {
    items.iter().map(OrderItem::line_gross).sum()
}

/// Absolute discount for `subtotal` at `discount`, rounded half-up to the
/// grosz for display. Never negative.
///
/// Negative discount rates count as zero. A rate above 100% yields a value
/// larger than the subtotal; such orders are rejected by validation, not here.
/// The engine itself never uses this rounded amount.
///
/// ## Example
/// ```rust
/// use b2b_core::money::Money;
/// use b2b_core::pricing::compute_discount_value;
/// use b2b_core::types::DiscountRate;
///
/// // 49.895 → 49.90
/// let subtotal = Money::from_cents(99790);
/// assert_eq!(compute_discount_value(subtotal, DiscountRate::from_bps(500)).cents(), 4990);
/// assert!(compute_discount_value(subtotal, DiscountRate::from_bps(-500)).is_zero());
/// ```
pub fn compute_discount_value(subtotal: Money, discount: DiscountRate) -> Money {
    subtotal.percentage(discount.effective_bps()).non_negative()
}

/// Exact net after discount, scaled by [`EXACT_SCALE`]. Zero when the
/// subtotal is not positive.
fn exact_net(subtotal: Money, discount: DiscountRate) -> i128 {
    if !subtotal.is_positive() {
        return 0;
    }
    (subtotal.cents() as i128)
        .saturating_mul(discount.retained_bps() as i128)
        .saturating_mul(BPS_SCALE)
}

/// Exact VAT of one line after the discount, scaled by [`EXACT_SCALE`].
fn exact_line_vat(item: &OrderItem, discount: DiscountRate) -> i128 {
    (item.line_gross().cents() as i128)
        .saturating_mul(discount.retained_bps() as i128)
        .saturating_mul(item.vat_rate().bps() as i128)
}

/// Net after discount, rounded half-up to the grosz.
///
/// ## Example
/// ```rust
/// use b2b_core::money::Money;
/// use b2b_core::pricing::compute_net;
/// use b2b_core::types::DiscountRate;
///
/// // 997.90 × 0.95 = 948.005 → 948.01
/// let net = compute_net(Money::from_cents(99790), DiscountRate::from_bps(500));
/// assert_eq!(net.cents(), 94801);
/// ```
pub fn compute_net(subtotal: Money, discount: DiscountRate) -> Money {
    Money::from_i128_saturating(div_round_half_up(exact_net(subtotal, discount), EXACT_SCALE))
}

/// Total VAT after proportional discount allocation, rounded on the total.
///
/// See [`compute_vat_total_with`] for the algorithm.
pub fn compute_vat_total(items: &[OrderItem], discount: DiscountRate) -> Money {
    compute_vat_total_with(items, discount, VatRounding::OnTotal)
}

/// Total VAT after proportional discount allocation.
///
/// ## Algorithm
/// 1. `subtotal` of all lines; `0` if it is not positive
/// 2. `keep = max(0, 10000 - discount bps)`
/// 3. every line is shrunk by `keep / 10000`, the same as `net / subtotal`
/// 4. line VAT = shrunk line × line VAT rate
/// 5. sum, rounding per `rounding`
///
/// ## Example
/// ```rust
/// use b2b_core::money::Money;
/// use b2b_core::pricing::{compute_vat_total_with, VatRounding};
/// use b2b_core::types::{DiscountRate, OrderItem, VatRate};
///
/// // Two lines worth 100.00 each, 23% and 8%, 10% off
/// let items = vec![
///     OrderItem::new("a", "A", "A", 1, Money::from_cents(10000), VatRate::from_bps(2300)),
///     OrderItem::new("b", "B", "B", 1, Money::from_cents(10000), VatRate::from_bps(800)),
/// ];
/// let vat = compute_vat_total_with(&items, DiscountRate::from_bps(1000), VatRounding::OnTotal);
///
/// // 0.9 × (23.00 + 8.00) = 27.90
/// assert_eq!(vat.cents(), 2790);
/// ```
pub fn compute_vat_total_with(
    items: &[OrderItem],
    discount: DiscountRate,
    rounding: VatRounding,
) -> Money {
    if !compute_subtotal(items).is_positive() {
        return Money::zero();
    }

    match rounding {
        VatRounding::OnTotal => {
            let exact = items
                .iter()
                .map(|item| exact_line_vat(item, discount))
                .fold(0, i128::saturating_add);
            Money::from_i128_saturating(div_round_half_up(exact, EXACT_SCALE))
        }
        VatRounding::PerLine => items
            .iter()
            .map(|item| {
                Money::from_i128_saturating(div_round_half_up(
                    exact_line_vat(item, discount),
                    EXACT_SCALE,
                ))
            })
            .sum(),
    }
}

/// Payable amount: net after discount plus VAT. Never negative.
///
/// With no discount and only 0% lines this equals the subtotal.
///
/// ## Example
/// ```rust
/// use b2b_core::money::Money;
/// use b2b_core::pricing::compute_grand_total;
/// use b2b_core::types::{DiscountRate, OrderItem, VatRate};
///
/// let items = vec![
///     OrderItem::new("p1", "CER-001", "Płytka gres 60x60", 10, Money::from_cents(8999), VatRate::from_bps(2300)),
///     OrderItem::new("p2", "CER-002", "Fuga elastyczna 2kg", 4, Money::from_cents(2450), VatRate::from_bps(2300)),
/// ];
///
/// // 948.005 + 218.04115 = 1166.04615 → 1166.05
/// assert_eq!(compute_grand_total(&items, DiscountRate::from_bps(500)).cents(), 116605);
/// ```
pub fn compute_grand_total(items: &[OrderItem], discount: DiscountRate) -> Money {
    compute_grand_total_with(items, discount, VatRounding::OnTotal)
}

/// [`compute_grand_total`] with an explicit VAT rounding policy.
///
/// ## Rounding
/// - `OnTotal`: `round(exact net + exact VAT)`, a single rounding
/// - `PerLine`: `round(exact net) + Σ round(line VAT)`, the sum of the
///   printed invoice figures
pub fn compute_grand_total_with(
    items: &[OrderItem],
    discount: DiscountRate,
    rounding: VatRounding,
) -> Money {
    let subtotal = compute_subtotal(items);
    if !subtotal.is_positive() {
        return Money::zero();
    }

    match rounding {
        VatRounding::OnTotal => {
            let exact = items
                .iter()
                .map(|item| exact_line_vat(item, discount))
                .fold(exact_net(subtotal, discount), i128::saturating_add);
            Money::from_i128_saturating(div_round_half_up(exact, EXACT_SCALE))
        }
        VatRounding::PerLine => {
            compute_net(subtotal, discount) + compute_vat_total_with(items, discount, rounding)
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// All derived figures of one order, computed together.
///
/// Never persisted: build it from the order whenever it is needed.
///
/// Each field is rounded from the exact value on its own. Under
/// [`VatRounding::OnTotal`] the grand total may therefore differ from
/// `net + vat` by one grosz, and `subtotal - discount` from `net` likewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    /// Σ quantity × unit price.
    pub subtotal: Money,
    /// Absolute discount amount.
    pub discount: Money,
    /// Exact `subtotal × (1 - discount)`, floored at zero.
    pub net: Money,
    /// VAT after proportional discount allocation.
    pub vat: Money,
    /// Exact `net + vat`, rounded per the policy.
    pub grand_total: Money,
}

impl OrderTotals {
    /// Computes totals with the default [`VatRounding::OnTotal`] policy.
    pub fn compute(items: &[OrderItem], discount: DiscountRate) -> Self {
        Self::compute_with(items, discount, VatRounding::OnTotal)
    }

    /// Computes totals with an explicit VAT rounding policy.
    pub fn compute_with(items: &[OrderItem], discount: DiscountRate, rounding: VatRounding) -> Self {
        let subtotal = compute_subtotal(items);

        OrderTotals {
            subtotal,
            discount: compute_discount_value(subtotal, discount),
            net: compute_net(subtotal, discount),
            vat: compute_vat_total_with(items, discount, rounding),
            grand_total: compute_grand_total_with(items, discount, rounding),
        }
    }
}

// =============================================================================
// Line Breakdown
// =============================================================================

/// One line of an invoice-style breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineAllocation {
    pub sku: String,
    /// Line value before discount.
    pub gross: Money,
    /// Line share of the discounted net, rounded to the grosz.
    pub net: Money,
    /// Line VAT on that share, rounded to the grosz.
    pub vat: Money,
}

/// Per-line allocation of the order discount and VAT, in item order.
///
/// Each line is rounded on its own, so the line nets may differ from
/// [`OrderTotals::net`] by a grosz per line. Line VAT sums to the
/// [`VatRounding::PerLine`] total.
pub fn line_breakdown(items: &[OrderItem], discount: DiscountRate) -> Vec<LineAllocation> {
    let taxable = compute_subtotal(items).is_positive();

    items
        .iter()
        .map(|item| {
            let gross = item.line_gross();
            if !taxable {
                return LineAllocation {
                    sku: item.sku.clone(),
                    gross,
                    net: gross.non_negative(),
                    vat: Money::zero(),
                };
            }

            LineAllocation {
                sku: item.sku.clone(),
                gross,
                net: Money::from_i128_saturating(div_round_half_up(
                    (gross.cents() as i128).saturating_mul(discount.retained_bps() as i128),
                    BPS_SCALE,
                )),
                vat: Money::from_i128_saturating(div_round_half_up(
                    exact_line_vat(item, discount),
                    EXACT_SCALE,
                )),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VatRate;

    fn item(sku: &str, qty: i64, price_cents: i64, vat_bps: u32) -> OrderItem {
        OrderItem::new(
            sku.to_lowercase(),
            sku,
            format!("Product {}", sku),
            qty,
            Money::from_cents(price_cents),
            VatRate::from_bps(vat_bps),
        )
    }

    /// Lines of order ZAM-10241: tiles and grout, both at 23%.
    fn tiles_and_grout() -> Vec<OrderItem> {
        vec![item("CER-001", 10, 8999, 2300), item("CER-002", 4, 2450, 2300)]
    }

    /// A basket where the two rounding policies disagree by one grosz.
    fn odd_basket() -> Vec<OrderItem> {
        vec![
            item("A", 3, 333, 2300),
            item("B", 7, 101, 800),
            item("C", 2, 999, 500),
        ]
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(compute_subtotal(&tiles_and_grout()).cents(), 99790);
        assert!(compute_subtotal(&[]).is_zero());
    }

    #[test]
    fn test_discount_value() {
        let subtotal = Money::from_cents(99790);
        assert_eq!(compute_discount_value(subtotal, DiscountRate::from_bps(500)).cents(), 4990);
        assert!(compute_discount_value(subtotal, DiscountRate::zero()).is_zero());
        assert!(compute_discount_value(subtotal, DiscountRate::from_bps(-1000)).is_zero());
        assert_eq!(compute_discount_value(subtotal, DiscountRate::from_bps(10000)), subtotal);
    }

    #[test]
    fn test_discount_above_hundred_percent_is_not_capped() {
        let subtotal = Money::from_cents(1000);
        let discount = compute_discount_value(subtotal, DiscountRate::from_bps(15000));
        assert_eq!(discount.cents(), 1500);
        assert!(discount > subtotal);
    }

    #[test]
    fn test_dashboard_scenario_totals() {
        let totals = OrderTotals::compute(&tiles_and_grout(), DiscountRate::from_bps(500));

        // discount 49.895, net 948.005, VAT 218.04115, total 1166.04615
        assert_eq!(totals.subtotal.cents(), 99790);
        assert_eq!(totals.discount.cents(), 4990);
        assert_eq!(totals.net.cents(), 94801);
        assert_eq!(totals.vat.cents(), 21804);
        assert_eq!(totals.grand_total.cents(), 116605);
    }

    #[test]
    fn test_discount_is_not_rounded_before_vat() {
        let items = vec![item("A", 1, 9, 2300), item("B", 1, 9, 800)];
        // 0.9 × (0.0207 + 0.0072) = 0.02511 → 0.03
        assert_eq!(compute_vat_total(&items, DiscountRate::from_bps(1000)).cents(), 3);

        let items = vec![item("A", 1, 77, 2300), item("B", 1, 77, 800)];
        // 0.9 × 0.77 × 0.31 = 0.21483 → 0.21
        assert_eq!(compute_vat_total(&items, DiscountRate::from_bps(1000)).cents(), 21);
    }

    #[test]
    fn test_net_is_exact_then_rounded() {
        assert_eq!(compute_net(Money::from_cents(99790), DiscountRate::from_bps(500)).cents(), 94801);
        assert_eq!(compute_net(Money::from_cents(19080), DiscountRate::from_bps(300)).cents(), 18508);
        assert!(compute_net(Money::from_cents(1000), DiscountRate::from_bps(15000)).is_zero());
        assert!(compute_net(Money::from_cents(-1000), DiscountRate::zero()).is_zero());
    }

    #[test]
    fn test_single_reduced_rate_line() {
        let items = vec![item("CER-003", 8, 3900, 800)];
        let totals = OrderTotals::compute(&items, DiscountRate::zero());
        assert_eq!(totals.vat.cents(), 2496);
        assert_eq!(totals.grand_total.cents(), 33696);
    }

    #[test]
    fn test_small_discount_with_rounding() {
        let items = vec![item("CER-004", 12, 1590, 2300)];
        let totals = OrderTotals::compute(&items, DiscountRate::from_bps(300));
        // net 185.076, VAT 42.56844, total 227.64444
        assert_eq!(totals.discount.cents(), 572);
        assert_eq!(totals.net.cents(), 18508);
        assert_eq!(totals.vat.cents(), 4257);
        assert_eq!(totals.grand_total.cents(), 22764);

        // Printed figures add up under per-line rounding
        let printed = OrderTotals::compute_with(&items, DiscountRate::from_bps(300), VatRounding::PerLine);
        assert_eq!(printed.grand_total, printed.net + printed.vat);
        assert_eq!(printed.grand_total.cents(), 22765);
    }

    #[test]
    fn test_mixed_rates_allocate_discount_proportionally() {
        let items = vec![item("A", 1, 10000, 2300), item("B", 1, 10000, 800)];
        let vat = compute_vat_total(&items, DiscountRate::from_bps(1000));
        assert_eq!(vat.cents(), 2790);

        // A blended "discount the total, average the rate" approach would land
        // elsewhere whenever the lines differ in value.
        let skewed = vec![item("A", 3, 10000, 2300), item("B", 1, 10000, 800)];
        let vat = compute_vat_total(&skewed, DiscountRate::from_bps(1000));
        // 0.9 × (300.00 × 0.23 + 100.00 × 0.08) = 0.9 × 77.00 = 69.30
        assert_eq!(vat.cents(), 6930);
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let totals = OrderTotals::compute(&[], DiscountRate::from_bps(500));
        assert_eq!(totals, OrderTotals::default());
    }

    #[test]
    fn test_huge_lines_saturate_instead_of_overflowing() {
        let items = vec![item("A", 2, i64::MAX / 2, 0), item("B", 2, i64::MAX / 2, 0)];
        assert_eq!(compute_subtotal(&items).cents(), i64::MAX);

        let totals = OrderTotals::compute(&items, DiscountRate::zero());
        assert_eq!(totals.grand_total.cents(), i64::MAX);
        assert!(totals.vat.is_zero());
    }

    #[test]
    fn test_full_discount_leaves_nothing_to_tax() {
        let totals = OrderTotals::compute(&tiles_and_grout(), DiscountRate::from_bps(10000));
        assert!(totals.net.is_zero());
        assert!(totals.vat.is_zero());
        assert!(totals.grand_total.is_zero());
    }

    #[test]
    fn test_over_discount_floors_grand_total_at_zero() {
        let items = vec![item("A", 1, 1000, 2300)];
        let totals = OrderTotals::compute(&items, DiscountRate::from_bps(15000));
        assert_eq!(totals.discount.cents(), 1500);
        assert!(totals.net.is_zero());
        assert!(totals.vat.is_zero());
        assert!(totals.grand_total.is_zero());
    }

    #[test]
    fn test_zero_rated_lines_total_equals_subtotal() {
        let items = vec![item("A", 2, 1234, 0), item("B", 5, 999, 0)];
        let totals = OrderTotals::compute(&items, DiscountRate::zero());
        assert_eq!(totals.grand_total, totals.subtotal);
    }

    #[test]
    fn test_free_items_have_no_vat() {
        let items = vec![item("SAMPLE", 3, 0, 2300)];
        assert!(compute_vat_total(&items, DiscountRate::from_bps(500)).is_zero());
        assert!(compute_grand_total(&items, DiscountRate::from_bps(500)).is_zero());
    }

    #[test]
    fn test_rounding_policies_differ_by_a_grosz() {
        let discount = DiscountRate::from_bps(700);
        let on_total = compute_vat_total_with(&odd_basket(), discount, VatRounding::OnTotal);
        let per_line = compute_vat_total_with(&odd_basket(), discount, VatRounding::PerLine);

        assert_eq!(on_total.cents(), 359);
        assert_eq!(per_line.cents(), 360);
        assert_eq!(
            compute_grand_total_with(&odd_basket(), discount, VatRounding::PerLine).cents(),
            3805
        );
    }

    #[test]
    fn test_rounding_policies_agree_on_single_rate_orders() {
        let discount = DiscountRate::from_bps(500);
        assert_eq!(
            compute_vat_total_with(&tiles_and_grout(), discount, VatRounding::OnTotal),
            compute_vat_total_with(&tiles_and_grout(), discount, VatRounding::PerLine),
        );
    }

    #[test]
    fn test_line_breakdown_vat_matches_per_line_total() {
        let discount = DiscountRate::from_bps(700);
        let lines = line_breakdown(&odd_basket(), discount);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].sku, "A");
        assert_eq!(lines[0].gross.cents(), 999);

        let vat: Money = lines.iter().map(|l| l.vat).sum();
        assert_eq!(vat, compute_vat_total_with(&odd_basket(), discount, VatRounding::PerLine));
    }

    #[test]
    fn test_line_breakdown_net_close_to_order_net() {
        let discount = DiscountRate::from_bps(500);
        let lines = line_breakdown(&tiles_and_grout(), discount);
        let net: Money = lines.iter().map(|l| l.net).sum();
        let expected = OrderTotals::compute(&tiles_and_grout(), discount).net;

        assert!((net - expected).abs().cents() <= lines.len() as i64);
    }

    #[test]
    fn test_line_breakdown_without_value() {
        let lines = line_breakdown(&[item("SAMPLE", 1, 0, 2300)], DiscountRate::from_bps(500));
        assert!(lines[0].net.is_zero());
        assert!(lines[0].vat.is_zero());
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let totals = OrderTotals::compute(&tiles_and_grout(), DiscountRate::from_bps(500));
        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["grandTotal"], 116605);
        assert_eq!(json["vat"], 21804);
    }
}
