use crate::exit_codes;
use fairway_core::{Catalog, FairwayConfig, BYPASS_LANG};

pub fn run(cfg: &FairwayConfig) -> i32 {
    print!("{}", render(&cfg.catalog));
    exit_codes::SUCCESS
}

fn render(catalog: &Catalog) -> String {
    let mut out = String::from("holes:\n");
    for hole in &catalog.holes {
        out.push_str(&format!("  {}\n", hole));
    }
    for hole in &catalog.experimental_holes {
        out.push_str(&format!("  {} (experimental)\n", hole));
    }
    out.push_str("langs:\n");
    for lang in &catalog.langs {
        out.push_str(&format!("  {}\n", lang));
    }
    out.push_str(&format!("  {} (unranked)\n", BYPASS_LANG));
    out
}
