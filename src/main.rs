//! Keyboard Signature CLI
//!
//! Usage:
//!   keyboard-signature draw <NAME> [OPTIONS]
//!   keyboard-signature layouts
//!   keyboard-signature claim <NAME> --store <FILE> --owner-id <ID> --username <NAME>
//!   keyboard-signature lookup <NAME> --store <FILE>
//!   keyboard-signature list --store <FILE> [--owner-id <ID>]
//!
//! SVG goes to stdout unless `-o` is given; logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info, warn, Level};

use keyboard_signature::claim::{
    claim_signature, ClaimRecord, ClaimStore, Identity, JsonFileClaimStore, StaticIdentity,
};
use keyboard_signature::{
    png_data_uri, resolve_layout, CurveType, DashPattern, KeyboardLayout, Preset, Rgb, Signature,
    SignatureOptions, SvgConfig,
};

#[derive(Parser)]
#[command(name = "keyboard-signature", version)]
#[command(about = "Draw a name by tracing its letters across a keyboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(global = true, short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a signature
    Draw {
        name: String,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the available keyboard layouts
    Layouts,
    /// Claim a signature for an owner
    Claim {
        name: String,
        /// JSON file holding the claims
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        owner_id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        avatar: Option<String>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Show the claim for a name
    Lookup {
        name: String,
        #[arg(long)]
        store: PathBuf,
    },
    /// List claims, newest first
    List {
        #[arg(long)]
        store: PathBuf,
        /// Only claims held by this owner
        #[arg(long)]
        owner_id: Option<String>,
    },
}

#[derive(Args)]
struct StyleArgs {
    /// Keyboard layout (qwerty, colemak, dvorak, azerty, abcdef, arabic)
    #[arg(short, long)]
    layout: Option<KeyboardLayout>,

    /// Include the number row
    #[arg(long)]
    numbers: bool,

    /// Curve type (linear, catmull-rom, quadratic-bezier, cubic-bezier, simple-curve)
    #[arg(short, long)]
    curve: Option<CurveType>,

    /// Solid stroke color
    #[arg(long, conflicts_with = "gradient")]
    color: Option<Rgb>,

    /// Gradient stroke from START to END
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    gradient: Option<Vec<Rgb>>,

    /// Stroke width (1-8)
    #[arg(short, long)]
    width: Option<f64>,

    /// Dash pattern (solid, dashed, dotted)
    #[arg(long)]
    dash: Option<DashPattern>,

    /// Add a glow around the stroke
    #[arg(long)]
    glow: bool,

    /// Preset file (TOML) applied before the other flags
    #[arg(short, long)]
    preset: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// Draw the keyboard under the signature
    #[arg(short, long)]
    keyboard: bool,

    /// Write a PNG image to FILE
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Print the PNG as a data URI
    #[arg(long)]
    data_uri: bool,

    /// Write the SVG to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Draw {
            name,
            style,
            output,
        } => draw(&name, &style, &output),
        Commands::Layouts => print_layouts(),
        Commands::Claim {
            name,
            store,
            owner_id,
            username,
            avatar,
            style,
        } => {
            let options = build_options(&style);
            let mut owner = Identity::new(owner_id, username);
            if let Some(url) = avatar {
                owner = owner.with_avatar(url);
            }
            let store = JsonFileClaimStore::open(store);
            let record = claim_signature(&store, &StaticIdentity::new(owner), &name, &options)
                .unwrap_or_else(|e| {
                    error!("Could not claim '{}': {}", name, e);
                    process::exit(1);
                });
            print_record(&record);
        }
        Commands::Lookup { name, store } => {
            let store = JsonFileClaimStore::open(store);
            match store.find(&name) {
                Ok(Some(record)) => print_record(&record),
                Ok(None) => {
                    error!("'{}' has not been claimed", name);
                    process::exit(1);
                }
                Err(e) => {
                    error!("Lookup failed: {}", e);
                    process::exit(1);
                }
            }
        }
        Commands::List { store, owner_id } => {
            let store = JsonFileClaimStore::open(store);
            let claims = match &owner_id {
                Some(id) => store.claims_by_owner(id),
                None => store.list(),
            }
            .unwrap_or_else(|e| {
                error!("Could not read claims: {}", e);
                process::exit(1);
            });
            if claims.is_empty() {
                info!("No claims found");
            }
            for claim in claims {
                println!("{}\t{}\t@{}", claim.id, claim.name, claim.owner.username);
            }
        }
    }
}

/// Start from the preset (or defaults) and apply the flags on top
fn build_options(style: &StyleArgs) -> SignatureOptions {
    let mut options = match &style.preset {
        Some(path) => match Preset::from_file(path) {
            Ok(preset) => {
                debug!("Loaded preset {:?} from {}", preset.name, path.display());
                preset.options
            }
            Err(e) => {
                error!("Error loading preset '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => SignatureOptions::default(),
    };

    if let Some(layout) = style.layout {
        options.layout = layout;
    }
    if style.numbers {
        options.include_numbers = true;
    }
    if let Some(curve) = style.curve {
        options.curve = curve;
    }
    if let Some(color) = style.color {
        options.stroke = options.stroke.with_color(color);
    }
    if let Some([start, end]) = style.gradient.as_deref() {
        options.stroke = options.stroke.with_gradient(*start, *end);
    }
    if let Some(width) = style.width {
        options.stroke = options.stroke.with_width(width);
    }
    if let Some(dash) = style.dash {
        options.stroke = options.stroke.with_dash(dash);
    }
    if style.glow {
        options.stroke = options.stroke.with_glow(true);
    }
    options
}

fn draw(name: &str, style: &StyleArgs, output: &OutputArgs) {
    let options = build_options(style);
    let signature = Signature::new(name, &options);

    if signature.is_empty() {
        warn!(
            "Nothing to draw: no character of '{}' is on the {} layout",
            name, options.layout
        );
        return;
    }

    if output.png.is_some() || output.data_uri {
        let png = match signature.to_png() {
            Ok(Some(png)) => png,
            Ok(None) => return,
            Err(e) => {
                error!("Error rendering PNG: {}", e);
                process::exit(1);
            }
        };
        if let Some(path) = &output.png {
            write_file(path, &png);
        }
        if output.data_uri {
            println!("{}", png_data_uri(&png));
        }
    }

    let wants_svg = output.output.is_some() || (output.png.is_none() && !output.data_uri);
    if !wants_svg {
        return;
    }

    let config = SvgConfig::new()
        .with_keyboard(output.keyboard)
        .with_standalone(output.output.is_some());
    let Some(svg) = signature.to_svg_with_config(&config) else {
        return;
    };
    match &output.output {
        Some(path) => write_file(path, svg.as_bytes()),
        None => println!("{}", svg),
    }
}

fn write_file(path: &Path, contents: &[u8]) {
    if let Err(e) = fs::write(path, contents) {
        error!("Error writing '{}': {}", path.display(), e);
        process::exit(1);
    }
    info!("Wrote {} ({} bytes)", path.display(), contents.len());
}

fn print_layouts() {
    for layout in KeyboardLayout::ALL {
        println!(
            "{:<8} {:>3} keys ({} with numbers)",
            layout.name(),
            resolve_layout(layout, false).len(),
            resolve_layout(layout, true).len()
        );
    }
}

fn print_record(record: &ClaimRecord) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Error serializing claim: {}", e);
            process::exit(1);
        }
    }
}
