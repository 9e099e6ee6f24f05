// SetKit CLI binary

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use setkit_lib::catalog::{loader, CatalogSnapshot, LensType};
use setkit_lib::compare;
use setkit_lib::compat::{self, CompatibilityResult};
use setkit_lib::config::{self, SetkitConfig};
use setkit_lib::package::{export, store, validate_package, Package, PackageItem};
use setkit_lib::recommend::{self, Aesthetic, CameraFormat, FocalNeed, RecommendationRequest};
use setkit_lib::search::{self, AccessoryQuery, CameraQuery, LensQuery};
use setkit_lib::SetkitError;

#[derive(Parser)]
#[command(name = "setkit")]
#[command(about = "SetKit - film equipment catalog and package builder", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.setkit/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog data directory (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search lenses
    Lenses {
        /// Text in manufacturer, name or focal length
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        mount: Option<String>,
        /// prime, zoom or special
        #[arg(long = "type")]
        lens_type: Option<LensType>,
        /// Slowest acceptable T-stop
        #[arg(long)]
        max_aperture: Option<f64>,
    },

    /// Compare up to three lenses side by side
    Compare {
        /// Catalog lens ids
        #[arg(required = true, num_args = 1..=3)]
        ids: Vec<String>,
    },

    /// Search cameras
    Cameras {
        text: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        mount: Option<String>,
        /// Crop class, e.g. S35 or FF
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Search accessories
    Accessories {
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Check one lens or accessory against a camera
    Compat {
        #[arg(long)]
        camera: String,
        #[arg(long, conflicts_with = "accessory", required_unless_present = "accessory")]
        lens: Option<String>,
        #[arg(long)]
        accessory: Option<String>,
    },

    /// List every lens (or accessory) that works with a camera
    Compatible {
        #[arg(long)]
        camera: String,
        /// List accessories instead of lenses
        #[arg(long)]
        accessories: bool,
    },

    /// Recommend lenses for a shoot
    Recommend {
        /// 16mm, S35, FF or 65mm
        #[arg(long)]
        format: CameraFormat,
        /// anamorphic, vintage, clean-modern or neutral
        #[arg(long, default_value = "neutral")]
        aesthetic: Aesthetic,
        /// wide, standard, portrait, telephoto, zoom or any
        #[arg(long, default_value = "any")]
        focal: FocalNeed,
    },

    /// Validate a package against its first camera
    Validate {
        /// Package or template JSON file
        file: Option<PathBuf>,
        /// Catalog camera ids to add
        #[arg(long)]
        camera: Vec<String>,
        /// Catalog lens ids to add
        #[arg(long)]
        lens: Vec<String>,
        /// Catalog accessory ids to add
        #[arg(long)]
        accessory: Vec<String>,
        /// Save the assembled package as a template
        #[arg(long)]
        save_as: Option<String>,
    },

    /// Export a package as a plain-text list
    Export {
        /// Package or template JSON file
        file: PathBuf,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List saved package templates
    Templates {
        /// Delete the named template instead of listing
        #[arg(long)]
        delete: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Lenses { text, category, manufacturer, mount, lens_type, max_aperture } => {
            let query = LensQuery { text, category, manufacturer, mount, lens_type, max_aperture };
            cmd_lenses(&config, &query)
        }
        Commands::Compare { ids } => cmd_compare(&config, &ids),
        Commands::Cameras { text, brand, mount, sensor } => {
            cmd_cameras(&config, &CameraQuery { text, brand, mount, sensor })
        }
        Commands::Accessories { text, category } => {
            cmd_accessories(&config, &AccessoryQuery { category, text })
        }
        Commands::Compat { camera, lens, accessory } => cmd_compat(&config, &camera, lens, accessory),
        Commands::Compatible { camera, accessories } => cmd_compatible(&config, &camera, accessories),
        Commands::Recommend { format, aesthetic, focal } => {
            cmd_recommend(&config, RecommendationRequest { format, aesthetic, focal_need: focal })
        }
        Commands::Validate { file, camera, lens, accessory, save_as } => {
            cmd_validate(&config, file, &camera, &lens, &accessory, save_as)
        }
        Commands::Export { file, output } => cmd_export(&file, output),
        Commands::Templates { delete } => cmd_templates(&config, delete),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_lenses(config: &SetkitConfig, query: &LensQuery) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let lenses = search::search_lenses(&snapshot.lenses, query);

    println!("{} lenses ({} total)", lenses.len(), snapshot.lenses.len());
    println!();
    if lenses.is_empty() {
        println!("No lenses found matching your criteria");
        return Ok(());
    }

    println!(
        "{:<18}  {:<28}  {:>10}  {:>6}  {:<8}  {:<7}  {}",
        "Manufacturer", "Name", "Focal", "T", "Mount", "Type", "Category"
    );
    println!("{}", "-".repeat(104));
    for lens in lenses {
        println!(
            "{:<18}  {:<28}  {:>10}  {:>6}  {:<8}  {:<7}  {}",
            truncate(&lens.manufacturer, 18),
            truncate(&lens.name, 28),
            or_dash(&lens.focal_length),
            or_dash(&lens.max_aperture),
            or_dash(&lens.mount),
            lens.lens_type.as_str(),
            lens.category
        );
    }

    Ok(())
}

fn cmd_compare(config: &SetkitConfig, ids: &[String]) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let comparison = compare::compare(&snapshot, ids)?;

    if comparison.is_empty() {
        println!("Select lenses to compare");
        return Ok(());
    }

    print!("{:<16}", "Specification");
    for i in 1..=comparison.lenses.len() {
        print!("  {:<24}", format!("Lens {}", i));
    }
    println!();
    println!("{}", "-".repeat(16 + 26 * comparison.lenses.len()));
    for row in &comparison.rows {
        print!("{:<16}", row.label);
        for value in &row.values {
            print!("  {:<24}", truncate(value, 24));
        }
        println!();
    }

    Ok(())
}

fn cmd_cameras(config: &SetkitConfig, query: &CameraQuery) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let cameras = search::search_cameras(&snapshot.cameras, query);

    println!("{} cameras", cameras.len());
    println!();
    if cameras.is_empty() {
        println!("No cameras found matching your criteria");
        return Ok(());
    }

    println!("{:<20}  {:<12}  {:<26}  {:<6}  {}", "ID", "Brand", "Model", "Mount", "Sensor");
    println!("{}", "-".repeat(80));
    for camera in cameras {
        println!(
            "{:<20}  {:<12}  {:<26}  {:<6}  {}",
            truncate(&camera.id, 20),
            truncate(&camera.brand, 12),
            truncate(&camera.model, 26),
            or_dash(&camera.native_mount),
            camera.primary_sensor().unwrap_or("-")
        );
    }

    Ok(())
}

fn cmd_accessories(config: &SetkitConfig, query: &AccessoryQuery) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let accessories = search::search_accessories(&snapshot.accessories, query);

    println!("{} items", accessories.len());
    println!();
    if accessories.is_empty() {
        println!("No accessories found");
        return Ok(());
    }

    println!("{:<20}  {:<16}  {:<26}  {}", "ID", "Brand", "Model", "Category");
    println!("{}", "-".repeat(80));
    for acc in accessories {
        println!(
            "{:<20}  {:<16}  {:<26}  {}",
            truncate(&acc.id, 20),
            truncate(&acc.brand, 16),
            truncate(&acc.model, 26),
            acc.category.replace('_', " ")
        );
    }

    Ok(())
}

fn cmd_compat(
    config: &SetkitConfig,
    camera_id: &str,
    lens_id: Option<String>,
    accessory_id: Option<String>,
) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let camera = snapshot
        .camera(camera_id)
        .ok_or_else(|| SetkitError::CameraNotFound(camera_id.to_string()))?;

    let (label, result) = if let Some(id) = lens_id {
        let lens = snapshot.lens(&id).ok_or(SetkitError::LensNotFound(id))?;
        let result = compat::resolve_lens_compatibility(Some(lens), Some(camera), &snapshot.adapter_rules);
        (lens.display_name(), result)
    } else if let Some(id) = accessory_id {
        let acc = snapshot.accessory(&id).ok_or(SetkitError::AccessoryNotFound(id))?;
        let result = compat::resolve_accessory_compatibility(Some(acc), Some(camera), &snapshot.compatibility_matrix);
        (acc.display_name(), result)
    } else {
        anyhow::bail!("Pass --lens or --accessory");
    };

    println!("{} on {}", label, camera.display_name());
    match result {
        Some(result) => print_result(&result),
        None => println!("  Cannot evaluate"),
    }

    Ok(())
}

fn cmd_compatible(config: &SetkitConfig, camera_id: &str, accessories: bool) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let camera = snapshot
        .camera(camera_id)
        .ok_or_else(|| SetkitError::CameraNotFound(camera_id.to_string()))?;

    println!("Compatible with {} ({} mount)", camera.display_name(), camera.native_mount);
    println!();

    if accessories {
        let found = compat::compatible_accessories(&snapshot, camera);
        for tagged in &found {
            println!("  {:<40}  {}", truncate(&tagged.item.display_name(), 40), tagged.compatibility.message);
        }
        println!();
        println!("{} of {} accessories", found.len(), snapshot.accessories.len());
    } else {
        let found = compat::compatible_lenses(&snapshot, camera);
        for tagged in &found {
            println!("  {:<40}  {}", truncate(&tagged.item.display_name(), 40), tagged.compatibility.message);
        }
        println!();
        println!("{} of {} lenses", found.len(), snapshot.lenses.len());
    }

    Ok(())
}

fn cmd_recommend(config: &SetkitConfig, request: RecommendationRequest) -> Result<()> {
    let snapshot = load_catalog(config)?;
    let rec = recommend::recommend(&snapshot.lenses, &request);

    if rec.lenses.is_empty() {
        println!("No Recommendations Found");
        println!("No lenses match your criteria. Try adjusting your selections.");
    } else {
        println!(
            "{} recommended lenses ({}, {} aesthetic, {} focal length):",
            rec.lenses.len(),
            request.format.as_str(),
            request.aesthetic.as_str(),
            request.focal_need.as_str()
        );
        println!();
        for lens in &rec.lenses {
            println!("  {:<44}  T{:<5}  {}", truncate(&lens.display_name(), 44), or_dash(&lens.max_aperture), lens.category);
        }
    }

    println!();
    println!("Filter steps:");
    for step in &rec.steps {
        println!("  • {}", step);
    }

    Ok(())
}

fn cmd_validate(
    config: &SetkitConfig,
    file: Option<PathBuf>,
    camera_ids: &[String],
    lens_ids: &[String],
    accessory_ids: &[String],
    save_as: Option<String>,
) -> Result<()> {
    let snapshot = load_catalog(config)?;

    let mut package = match file {
        Some(path) => read_package(&path)?,
        None => Package::new(),
    };

    for id in camera_ids {
        let camera = snapshot.camera(id).ok_or_else(|| SetkitError::CameraNotFound(id.clone()))?;
        add_reporting(&mut package, PackageItem::Camera(camera.clone()));
    }
    for id in lens_ids {
        let lens = snapshot.lens(id).ok_or_else(|| SetkitError::LensNotFound(id.clone()))?;
        add_reporting(&mut package, PackageItem::Lens(lens.clone()));
    }
    for id in accessory_ids {
        let acc = snapshot.accessory(id).ok_or_else(|| SetkitError::AccessoryNotFound(id.clone()))?;
        add_reporting(&mut package, PackageItem::Accessory(acc.clone()));
    }

    println!("Package: {} items", package.len());
    for item in package.items() {
        println!("  [{}] {}", item.item_type(), item.label());
    }
    println!();

    let report = validate_package(package.items(), &snapshot);
    if report.is_clean() {
        println!("No compatibility issues");
    }
    if !report.errors.is_empty() {
        println!("⚠ Compatibility Errors:");
        for err in &report.errors {
            println!("  - {}", err);
        }
    }
    if !report.warnings.is_empty() {
        println!("⚠ Compatibility Warnings:");
        for warn in &report.warnings {
            println!("  - {}", warn);
        }
    }

    if let Some(name) = save_as {
        let path = store::save_template(&config.templates_path(), &name, &package)?;
        println!();
        println!("Saved template '{}' to {}", name, path.display());
    }

    Ok(())
}

fn cmd_export(file: &Path, output: Option<PathBuf>) -> Result<()> {
    let package = read_package(file)?;

    match output {
        Some(path) => {
            export::write_export(&package, &path)?;
            println!("Exported {} items to {}", package.len(), path.display());
        }
        None => print!("{}", export::export_text(&package)?),
    }

    Ok(())
}

fn cmd_templates(config: &SetkitConfig, delete: Option<String>) -> Result<()> {
    let dir = config.templates_path();

    if let Some(name) = delete {
        if store::delete_template(&dir, &name)? {
            println!("Deleted template '{}'", name);
        } else {
            println!("No template named '{}'", name);
        }
        return Ok(());
    }

    let templates = store::list_templates(&dir);
    if templates.is_empty() {
        println!("No saved templates in {}", dir.display());
        return Ok(());
    }

    println!("{:<30}  {:>6}  {}", "Name", "Items", "Saved");
    println!("{}", "-".repeat(60));
    for t in templates {
        println!("{:<30}  {:>6}  {}", truncate(&t.name, 30), t.item_count, t.saved_at.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}

// --- Helper Functions ---

fn load_catalog(config: &SetkitConfig) -> Result<CatalogSnapshot> {
    loader::load_snapshot(config)
        .with_context(|| format!("loading catalog from {}", config.data_dir.display()))
}

/// Accept a saved template or a bare JSON array of items
fn read_package(path: &Path) -> Result<Package> {
    if let Ok(template) = store::read_template(path) {
        return Ok(template.items);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let items: Vec<PackageItem> = serde_json::from_str(&content)
        .with_context(|| format!("parsing package {}", path.display()))?;
    Ok(Package::from_items(items))
}

fn add_reporting(package: &mut Package, item: PackageItem) {
    let label = item.label();
    if !package.add(item) {
        println!("Already in package: {}", label);
    }
}

fn print_result(result: &CompatibilityResult) {
    println!("  Status:  {}", result.status.as_str());
    println!("  {}", result.message);
    if let Some(adapter) = &result.adapter {
        println!("  Adapter: {}", adapter);
    }
    if let Some(reason) = &result.reason {
        println!("  Reason:  {}", reason);
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
