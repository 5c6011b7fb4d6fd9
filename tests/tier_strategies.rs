//! Greedy and exhaustive tier resolution through the public configuration surface.

use std::io::Write;

use testresult::TestResult;

use till::{
    checkout::Checkout,
    config::PricingConfig,
    rules::RuleTable,
    skus::{Sku, SkuId},
    solvers::TierStrategy,
};

/// Tiers where the largest offer is not the most efficient per unit.
const UNCURATED: &str = r#"
currency: EUR
strategy: exhaustive
prices:
  - { sku: "K", price: 10 }
offers:
  - { sku: "K", quantity: 4, price: 36 }
  - { sku: "K", quantity: 3, price: 24 }
"#;

#[test]
fn strategies_agree_on_reference_table() -> TestResult {
    let greedy = RuleTable::reference()?;
    let exhaustive = RuleTable::reference()?.with_strategy(TierStrategy::Exhaustive);

    for sku in 'A'..='Z' {
        let id = SkuId::from(sku);

        for count in 0..=25 {
            assert_eq!(
                greedy.best_price(&id, count)?,
                exhaustive.best_price(&id, count)?,
                "strategies disagree on {count} x {sku}"
            );
        }
    }

    Ok(())
}

#[test]
fn exhaustive_strategy_from_file() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(UNCURATED.as_bytes())?;

    let config = PricingConfig::from_path(file.path())?;
    let table = config.build()?;

    assert_eq!(table.strategy(), TierStrategy::Exhaustive);
    assert_eq!(Checkout::new(&table).total("KKKKKK")?, 48);

    let greedy = config.build()?.with_strategy(TierStrategy::Greedy);

    assert_eq!(Checkout::new(&greedy).total("KKKKKK")?, 56);

    Ok(())
}

#[test]
fn exhaustive_strategy_prices_huge_quantities() -> TestResult {
    let mut table = RuleTable::new().with_strategy(TierStrategy::Exhaustive);
    table.register_unit_price(Sku::from('A'), 1)?;

    assert_eq!(table.best_price(&SkuId::from('A'), 1 << 44)?, 1 << 44);

    let reference = RuleTable::reference()?;
    let exhaustive = RuleTable::reference()?.with_strategy(TierStrategy::Exhaustive);
    let id = SkuId::from('H');

    assert_eq!(
        exhaustive.best_price(&id, 10_000_000_003)?,
        reference.best_price(&id, 10_000_000_003)?
    );

    Ok(())
}
