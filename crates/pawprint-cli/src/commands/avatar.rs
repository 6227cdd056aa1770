//! Avatar commands

use super::Context;
use pawprint_core::{Category, DEFAULT_BACKGROUND, LayerPlacement, Profile, Rgb};
use pawprint_raster::ansi::to_ansi;
use pawprint_raster::{AvatarExporter, SpriteSheet, compose_avatar};
use pawprint_store::{ProfileRepository, ProfileSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::time::Duration;
use tracing::info;

fn load_profile(ctx: &Context) -> Profile {
    ProfileRepository::new(ctx.store()).load().0
}

fn print_layers(ctx: &Context, profile: &Profile, display_width: u32) {
    let geometry = ctx.config.geometry;
    for category in Category::DRAW_ORDER {
        match geometry.placement(profile.selection.get(category), display_width) {
            LayerPlacement::Hidden => println!("  {:<10}  -", category),
            LayerPlacement::Visible {
                index,
                background_size: (w, h),
                position: (x, y),
            } => println!(
                "  {:<10} {:>3}   background-size {}x{}  position {}px {}px",
                category, index, w, h, x, y
            ),
        }
    }
}

pub async fn show(
    ctx: &Context,
    width: Option<u32>,
    preview: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_profile(ctx);
    let display_width = width.unwrap_or(ctx.config.display_width);

    println!("{} ({}px)", profile.display_nick(), display_width);
    print_layers(ctx, &profile, display_width);

    if preview {
        let sheet = SpriteSheet::load_bounded(
            &ctx.config.sheet_path,
            ctx.config.geometry,
            ctx.config.export_timeout(),
        )
        .await?;
        let avatar = compose_avatar(&sheet, &profile.selection);

        let background = profile
            .theme()
            .resolve()
            .and_then(|vars| Rgb::from_hex(&vars.bg_1).ok())
            .unwrap_or(DEFAULT_BACKGROUND);
        let columns = (display_width / 8).max(8);

        println!();
        print!("{}", to_ansi(&avatar.frame, columns, background.to_array()));
    }

    Ok(())
}

pub fn options(ctx: &Context, only: Option<Category>) {
    let profile = load_profile(ctx);
    let total = ctx.config.geometry.total();

    let categories: Vec<Category> = match only {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        let range = category.range();
        println!("{} [{}..{})", category, range.start, range.end());

        let row: Vec<String> = profile
            .selection
            .options(category, total)
            .into_iter()
            .map(|entry| {
                if entry.selected {
                    format!("[{}]", entry.index)
                } else {
                    format!(" {} ", entry.index)
                }
            })
            .collect();
        println!("  {}", row.join(" "));
    }
}

pub async fn select(ctx: &Context, frame: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ProfileSession::open(ctx.store(), ctx.config.debounce());
    let category = session.select_frame(frame).await?;
    session.close().await;

    println!("{} -> {}", category, frame);
    Ok(())
}

pub async fn set(
    ctx: &Context,
    category: Category,
    frame: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ProfileSession::open(ctx.store(), ctx.config.debounce());
    session.set(category, frame).await?;
    session.close().await;

    println!("{} -> {}", category, frame);
    Ok(())
}

pub async fn clear(ctx: &Context, category: Category) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ProfileSession::open(ctx.store(), ctx.config.debounce());
    session.clear(category).await?;
    session.close().await;

    println!("{} cleared", category);
    Ok(())
}

pub async fn random(ctx: &Context, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = ProfileSession::open(ctx.store(), ctx.config.debounce());
    session.randomize(&mut rng).await?;
    let profile = session.close().await;

    print_layers(ctx, &profile, ctx.config.display_width);
    Ok(())
}

pub async fn export(
    ctx: &Context,
    output: &Path,
    timeout_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_profile(ctx);
    let timeout = timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.export_timeout());

    info!(sheet = %ctx.config.sheet_path.display(), ?timeout, "Exporting avatar");
    let exporter = AvatarExporter::new(&ctx.config.sheet_path, ctx.config.geometry).with_timeout(timeout);
    let avatar = exporter.export(&profile.selection, output).await?;

    let (w, h) = avatar.frame.dimensions();
    let layers: Vec<String> = avatar.layers.iter().map(|c| c.to_string()).collect();
    println!("Wrote {} ({}x{}): {}", output.display(), w, h, layers.join(", "));
    Ok(())
}
