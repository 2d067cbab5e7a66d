// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use bd_locations::{export_csv, load_default, load_from_path, LocationQuery};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("divisions") => cmd_divisions(),
        Some("districts") => cmd_districts(&args[2..]),
        Some("thanas") => cmd_thanas(&args[2..]),
        Some("areas") => cmd_areas(&args[2..]),
        Some("export") => cmd_export(&args[2..]),
        Some("validate") => cmd_validate(&args[2..]),
        Some("info") => cmd_info(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
        None => run_ui_mode(),
    }
}

fn print_usage() {
    eprintln!("Usage: bd-locations [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  divisions                          List all divisions");
    eprintln!("  districts <division>               List districts in a division");
    eprintln!("  thanas <division> <district>       List thanas in a district");
    eprintln!("  areas <division> <district> <thana>  List areas in a thana");
    eprintln!("  export <out.csv>                   Export the flattened taxonomy as CSV");
    eprintln!("  validate [path]                    Validate a dataset file (default: embedded)");
    eprintln!("  info                               Dataset version, fingerprint, counts");
    eprintln!();
    eprintln!("With no command, launches the interactive browser (requires 'tui' feature).");
}

fn cmd_divisions() -> Result<()> {
    let taxonomy = load_default()?;
    for division in LocationQuery::new(&taxonomy).divisions() {
        println!("{}", division);
    }
    Ok(())
}

fn cmd_districts(args: &[String]) -> Result<()> {
    let [division] = args else {
        bail!("usage: bd-locations districts <division>");
    };

    let taxonomy = load_default()?;
    for district in LocationQuery::new(&taxonomy).districts(division) {
        println!("{}", district);
    }
    Ok(())
}

fn cmd_thanas(args: &[String]) -> Result<()> {
    let [division, district] = args else {
        bail!("usage: bd-locations thanas <division> <district>");
    };

    let taxonomy = load_default()?;
    for thana in LocationQuery::new(&taxonomy).thanas(division, district) {
        println!("{}", thana);
    }
    Ok(())
}

fn cmd_areas(args: &[String]) -> Result<()> {
    let [division, district, thana] = args else {
        bail!("usage: bd-locations areas <division> <district> <thana>");
    };

    let taxonomy = load_default()?;
    for area in LocationQuery::new(&taxonomy).areas(division, district, thana) {
        println!("{} ({})", area.name, area.area_type.as_str());
    }
    Ok(())
}

fn cmd_export(args: &[String]) -> Result<()> {
    let [out_path] = args else {
        bail!("usage: bd-locations export <out.csv>");
    };

    let taxonomy = load_default()?;

    println!("📤 Exporting flattened taxonomy...");
    let rows = export_csv(&taxonomy, Path::new(out_path))?;
    println!("✓ Wrote {} rows to {}", rows, out_path);

    Ok(())
}

fn cmd_validate(args: &[String]) -> Result<()> {
    // The loaders already validate; getting a taxonomy back means it passed.
    let taxonomy = match args.first() {
        Some(path) => {
            println!("🔍 Validating dataset: {}", path);
            load_from_path(Path::new(path))?
        }
        None => {
            println!("🔍 Validating embedded dataset...");
            load_default()?
        }
    };

    println!(
        "✓ Dataset {} OK: {} divisions, {} districts, {} thanas",
        taxonomy.version,
        taxonomy.divisions.len(),
        taxonomy.district_count(),
        taxonomy.thana_count()
    );

    Ok(())
}

fn cmd_info() -> Result<()> {
    let taxonomy = load_default()?;

    println!("🗺️  Bangladesh Location Taxonomy");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Dataset version: {}", taxonomy.version);
    println!("Published:       {}", taxonomy.published);
    println!("Fingerprint:     {}", taxonomy.fingerprint());
    println!("Divisions:       {}", taxonomy.divisions.len());
    println!("Districts:       {}", taxonomy.district_count());
    println!("Thanas:          {}", taxonomy.thana_count());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🗺️  Loading location browser...\n");

    let taxonomy = load_default()?;

    println!(
        "✓ Dataset {} loaded: {} divisions, {} districts, {} thanas",
        taxonomy.version,
        taxonomy.divisions.len(),
        taxonomy.district_count(),
        taxonomy.thana_count()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(taxonomy);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin bd-locations-server --features server");
    print_usage();
    std::process::exit(1);
}
