use crate::cmd::seeded_rng;
use crate::reports;
use clap::Args;
use mechswitch::catalog::SwitchCatalog;
use mechswitch::error::MsResult;

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Only show switches whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub fn run(args: CatalogArgs) -> MsResult<()> {
    let mut rng = seeded_rng(args.seed);
    let catalog = SwitchCatalog::new(&mut rng);

    let needle = args.filter.as_deref().map(str::to_lowercase);
    let rows: Vec<(usize, _)> = catalog
        .iter()
        .enumerate()
        .filter(|(_, s)| match &needle {
            Some(n) => s.name.to_lowercase().contains(n),
            None => true,
        })
        .collect();

    println!("\n📚 === SWITCH CATALOG ({} of {}) ===", rows.len(), catalog.len());
    reports::print_catalog(&rows);
    Ok(())
}
