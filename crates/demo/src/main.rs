use anyhow::Context;

use storefront_inventory::{Catalog, Item};
use storefront_sales::Order;

fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let mut catalog = Catalog::new();
    let keyboard = catalog.insert(Item::new("Mechanical Keyboard", 120.0, 10, Some(0.25))?)?;
    let cable = catalog.insert(Item::new("USB-C Cable", 15.0, 40, None)?)?;

    let mut order = Order::new(1)?;
    order.add_product(&mut catalog, keyboard, 2)?;
    order.add_product(&mut catalog, cable, 3)?;
    order.remove_product(&mut catalog, cable, 1)?;

    catalog
        .item_mut(cable)?
        .set_discount(5.0)
        .context("repricing cable")?;

    if let Err(err) = order.add_product(&mut catalog, keyboard, 50) {
        tracing::info!(%err, "oversized reservation refused");
    }

    order.finalize()?;
    println!("{}", order.summary(&catalog)?);

    Ok(())
}
