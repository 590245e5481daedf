use std::{sync::Arc, time::Duration};

use clap::Args;
use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use gelateria::{
    fixtures,
    money::format_brl,
    products::ProductId,
    status::{DELIVERY_ESTIMATE_MINUTES, OrderStatus},
};
use gelateria_app::{
    chef::ChefClient, config::ChefSettings, events::StorefrontEvent, storefront::Storefront,
};

#[derive(Debug, Args)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    chef: ChefSettings,
}

/// Scripted end-to-end session: fill the cart, build a named sundae,
/// check out, then follow the order until it leaves for delivery.
pub(crate) async fn run(args: DemoArgs) -> Result<(), String> {
    let catalog =
        fixtures::builtin_menu().map_err(|error| format!("failed to load menu: {error}"))?;

    let chef = Arc::new(ChefClient::new(args.chef.into_chef_config()));
    let mut storefront = Storefront::new(catalog, chef);
    let mut events = storefront.subscribe();

    for id in [1, 1, 4] {
        storefront
            .add_to_cart(ProductId(id))
            .map_err(|error| error.to_string())?;
    }

    storefront.open_sundae_builder();
    storefront
        .request_magic_name()
        .await
        .map_err(|error| error.to_string())?;

    println!("Sundae batizado: {}", storefront.draft().display_name());
    println!("  {}", storefront.draft().description());

    storefront
        .add_sundae_to_cart()
        .map_err(|error| error.to_string())?;

    print_cart(&storefront)?;

    let estimate = storefront
        .checkout(Timestamp::now())
        .await
        .map_err(|error| error.to_string())?;

    let offset = Duration::from_secs(DELIVERY_ESTIMATE_MINUTES.unsigned_abs() * 60);
    println!(
        "Entrega estimada: {estimate} (em {})",
        offset.human(Truncate::Minute)
    );

    while let Ok(event) = events.recv().await {
        println!("• {}", event.message());

        if event == StorefrontEvent::StatusChanged(OrderStatus::OutForDelivery) {
            break;
        }
    }

    Ok(())
}

fn print_cart(storefront: &Storefront) -> Result<(), String> {
    let mut builder = Builder::default();
    builder.push_record(["Item", "Qtd", "Unitário", "Total"]);

    for line in storefront.cart().items() {
        builder.push_record([
            line.name().to_string(),
            line.quantity().to_string(),
            format_brl(line.unit_price()),
            format_brl(&line.line_total()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    let total = storefront
        .cart()
        .total()
        .map_err(|error| error.to_string())?;

    println!("{table}");
    println!(
        "{} itens — Total {}",
        storefront.cart().item_count(),
        format_brl(&total)
    );

    Ok(())
}
