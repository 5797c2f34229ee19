use std::path::Path;

use anyhow::Result;

use retitle::{document, Config, Suggester};

use super::{is_pdf, original_name};

/// Walk one document through the pipeline, printing each decision.
pub async fn cmd_inspect(file: &Path, config: &Config) -> Result<()> {
    if !is_pdf(file) {
        println!("⚠️  {} does not look like a PDF; analyzing anyway", file.display());
    }

    let suggester = Suggester::from_config(config);
    let validator = suggester.validator();
    let name = original_name(file);
    let source = document::open(file, config).await;

    println!("📄 {}", file.display());

    let declared = match source.declared_title().await {
        Ok(title) => title,
        Err(e) => {
            println!("   ⚠️  Metadata unavailable: {e}");
            None
        }
    };
    println!("\n🏷️  Declared title: {declared:?}");
    match validator.check(declared.as_deref()) {
        Ok(()) => println!("   ✓ accepted"),
        Err(rejection) => println!("   ✗ {rejection}"),
    }

    let fragments = match source.first_page_fragments().await {
        Ok(fragments) => fragments,
        Err(e) => {
            println!("   ⚠️  Page text unavailable: {e}");
            Vec::new()
        }
    };
    println!("\n📐 First page: {} fragments", fragments.len());
    for fragment in &fragments {
        println!(
            "   {:>6.1}pt  y={:>7.1}  {}{:?}",
            fragment.glyph_height,
            fragment.vertical_position,
            if fragment.ends_line { "⏎ " } else { "  " },
            fragment.text
        );
    }

    let inferred = suggester.inferrer().infer(&fragments);
    println!(
        "\n🔎 Inferred title (band {:.0}%): {inferred:?}",
        suggester.inferrer().height_tolerance() * 100.0
    );
    match validator.check(inferred.as_deref()) {
        Ok(()) => println!("   ✓ accepted"),
        Err(rejection) => println!("   ✗ {rejection}"),
    }

    let suggestion = suggester.resolve(declared.as_deref(), &fragments, &name);
    println!(
        "\n✨ Suggestion: {}.pdf  [{}]",
        suggestion.filename, suggestion.origin
    );

    Ok(())
}
