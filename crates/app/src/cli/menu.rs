use clap::Args;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use gelateria::{fixtures, money::format_brl, products::Product};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only show products carrying this tag (e.g. vegan, bestseller, topping)
    #[arg(long)]
    filter: Option<String>,
}

pub(crate) fn run(args: &MenuArgs) -> Result<(), String> {
    let catalog =
        fixtures::builtin_menu().map_err(|error| format!("failed to load menu: {error}"))?;

    let products: Vec<&Product> = match args.filter.as_deref() {
        Some(tag) => catalog.filter(tag),
        None => catalog.iter().collect(),
    };

    let mut builder = Builder::default();
    builder.push_record(["Produto", "Descrição", "Selos", "Preço"]);

    for product in products {
        builder.push_record([
            product.name.clone(),
            product.description.clone(),
            product.badges.join(", "),
            format_brl(&product.price),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    println!("{table}");

    Ok(())
}
