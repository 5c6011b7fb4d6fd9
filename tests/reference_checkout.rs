//! Checkout totals against the reference price table.
//!
//! Covers multi-buys (A, B, H, K, P, Q, V), self-referential free offers (F, U),
//! cross-SKU free offers (E -> B, N -> M, R -> Q) and the "any 3 of S, T, X, Y, Z for 45"
//! group offer.

use testresult::TestResult;

use till::{
    cart::Cart,
    checkout::{Checkout, INVALID_CART, checkout},
    receipt::ReceiptLine,
    rules::RuleTable,
    skus::{Sku, SkuId},
};

#[test]
fn empty_cart() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, ""), 0);

    Ok(())
}

#[test]
fn single_items() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "A"), 50);
    assert_eq!(checkout(&table, "B"), 30);
    assert_eq!(checkout(&table, "C"), 20);
    assert_eq!(checkout(&table, "D"), 15);
    assert_eq!(checkout(&table, "E"), 40);
    assert_eq!(checkout(&table, "ABCD"), 50 + 30 + 20 + 15);
    assert_eq!(checkout(&table, "ABCDE"), 155);

    Ok(())
}

#[test]
fn multi_buys_on_a() -> TestResult {
    let table = RuleTable::reference()?;

    let expected = [
        ("A", 50),
        ("AA", 100),
        ("AAA", 130),
        ("AAAA", 180),
        ("AAAAA", 200),
        ("AAAAAA", 250),
        ("AAAAAAA", 300),
        ("AAAAAAAA", 330),
        ("AAAAAAAAA", 380),
        ("AAAAAAAAAA", 400),
    ];

    for (cart, total) in expected {
        assert_eq!(checkout(&table, cart), total, "wrong total for {cart}");
    }

    Ok(())
}

#[test]
fn multi_buys_on_b() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "BB"), 45);
    assert_eq!(checkout(&table, "BBB"), 75);
    assert_eq!(checkout(&table, "BBBB"), 90);
    assert_eq!(checkout(&table, "ABABAA"), 130 + 45 + 50);

    Ok(())
}

#[test]
fn other_multi_buys() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "HHHHH"), 45);
    assert_eq!(checkout(&table, "HHHHHHHHHHHHHHHH"), 80 + 45 + 10);
    assert_eq!(checkout(&table, "KKK"), 120 + 70);
    assert_eq!(checkout(&table, "PPPPP"), 200);
    assert_eq!(checkout(&table, "QQQ"), 80);
    assert_eq!(checkout(&table, "VV"), 90);
    assert_eq!(checkout(&table, "VVV"), 130);
    assert_eq!(checkout(&table, "VVVVV"), 130 + 90);

    Ok(())
}

#[test]
fn buy_two_e_get_one_b_free() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "EE"), 80);
    assert_eq!(checkout(&table, "EEB"), 80);
    assert_eq!(checkout(&table, "EEEB"), 120);
    assert_eq!(checkout(&table, "EEBB"), 80 + 30);
    assert_eq!(checkout(&table, "EEBBB"), 80 + 45);
    assert_eq!(checkout(&table, "EEEEBB"), 160);
    assert_eq!(checkout(&table, "BEBEEE"), 160);

    Ok(())
}

#[test]
fn self_referential_free_offers() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "FF"), 20);
    assert_eq!(checkout(&table, "FFF"), 20);
    assert_eq!(checkout(&table, "FFFFFF"), 40);
    assert_eq!(checkout(&table, "UUU"), 120);
    assert_eq!(checkout(&table, "UUUU"), 120);

    Ok(())
}

#[test]
fn cross_sku_free_offers() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "NNNM"), 120);
    assert_eq!(checkout(&table, "RRRQ"), 150);
    assert_eq!(checkout(&table, "RRRQQQQ"), 150 + 80);

    Ok(())
}

#[test]
fn group_offer_groups_most_expensive_units() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "STX"), 45);
    assert_eq!(checkout(&table, "STXYSTX"), 2 * 45 + 17);
    assert_eq!(checkout(&table, "ZZZZ"), 45 + 21);
    assert_eq!(checkout(&table, "SXYZ"), 45 + 17);

    let mut cart = Cart::from_chars("STXYSTX");
    Checkout::new(&table).apply_discounts(&mut cart)?;

    let group = table.groups().first().ok_or("reference group missing")?;

    assert_eq!(cart.count(&group.sku()), 2);
    assert_eq!(cart.count_of(&Sku::from('Y')), 1);

    Ok(())
}

#[test]
fn mixed_carts() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(checkout(&table, "ABCDEABCDE"), 280);
    assert_eq!(checkout(&table, "CCADDEEBBA"), 280);
    assert_eq!(checkout(&table, "AAAAAEEBAAABB"), 455);
    assert_eq!(checkout(&table, "ABCDECBAABCABBAAAEEAA"), 665);

    Ok(())
}

#[test]
fn unknown_sku_rejects_whole_cart() -> TestResult {
    let table = RuleTable::reference()?;

    for cart in ["a", "-", "ABCa", "AxA", "AX1"] {
        assert_eq!(checkout(&table, cart), INVALID_CART, "{cart} was priced");
    }

    let err = Checkout::new(&table).total("A-").err().ok_or("expected error")?;

    assert_eq!(err.unknown_sku(), Some(&SkuId::from('-')));

    Ok(())
}

#[test]
fn checkout_has_no_hidden_state() -> TestResult {
    let table = RuleTable::reference()?;

    for _ in 0..3 {
        assert_eq!(checkout(&table, "STXYSTXEEB"), 2 * 45 + 17 + 80);
    }

    Ok(())
}

#[test]
fn best_price_matches_original_helpers() -> TestResult {
    let table = RuleTable::reference()?;

    assert_eq!(table.best_price(&SkuId::from('A'), 4)?, 130 + 50);
    assert_eq!(table.best_price(&SkuId::from('D'), 42)?, 42 * 15);
    assert_eq!(table.best_price(&SkuId::from('B'), 0)?, 0);

    Ok(())
}

#[test]
fn best_price_is_monotonic_for_multi_buys() -> TestResult {
    let table = RuleTable::reference()?;

    for sku in ['A', 'B', 'H', 'K', 'P', 'Q', 'V'] {
        let id = SkuId::from(sku);
        let mut previous = 0;

        for count in 0..=30 {
            let price = table.best_price(&id, count)?;

            assert!(price >= previous, "{sku} got cheaper at {count} units");

            previous = price;
        }
    }

    Ok(())
}

#[test]
fn receipt_totals_match_checkout() -> TestResult {
    let table = RuleTable::reference()?;
    let checkout = Checkout::new(&table);

    for cart in ["", "AAAAAEEBAAABB", "STXYSTX", "FFFUUUU"] {
        assert_eq!(checkout.receipt(cart)?.total(), checkout.total(cart)?);
    }

    let receipt = checkout.receipt("STXYSTX")?;
    let labels: Vec<&str> = receipt.lines().iter().map(ReceiptLine::label).collect();

    assert_eq!(labels, vec!["Y", "any 3 of S, T, X, Y, Z"]);
    assert_eq!(receipt.subtotal(), 2 * 20 + 2 * 20 + 2 * 17 + 17);

    Ok(())
}
