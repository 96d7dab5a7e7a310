//! Geocode command: build office records, then drive the batch
//! orchestrator with a progress bar and Ctrl-C cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::style;
use esgboard_core::config::LayeredConfig;
use esgboard_core::office::build_offices;
use esgboard_core::tabular::decode_path;
use esgboard_geocode::{BatchGeocoder, GeocodeCache, NominatimGeocoder};

use crate::cli::GeocodeArgs;
use crate::{output, progress};

pub async fn execute(args: GeocodeArgs, config: LayeredConfig) -> Result<()> {
    let rows = decode_path(&args.source)?;
    let offices = build_offices(&rows);
    if offices.is_empty() {
        println!("{} no offices to geocode", style("!").yellow());
        return Ok(());
    }

    let cache_path = args
        .cache
        .unwrap_or_else(|| config.cache_path.value.clone());
    let cache = GeocodeCache::load(&cache_path);
    println!(
        "{} cache at {} ({} entries)",
        style("·").dim(),
        cache_path.display(),
        cache.len()
    );

    let client = NominatimGeocoder::new(
        config.geocoder_base_url.value.clone(),
        config.geocoder_user_agent.value.clone(),
    );

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    let total = offices.len() as u64;
    let bar = progress::geocode_bar(total);

    let mut geocoder = BatchGeocoder::new(client, cache).with_pacing(
        Duration::from_millis(config.rate_limit_ms.value),
        Duration::from_secs(config.lookup_timeout_secs.value),
    );
    let resolved = geocoder
        .run(
            offices,
            |fraction| progress::advance_to(&bar, fraction, total),
            cancel.as_ref(),
        )
        .await;

    if cancel.load(Ordering::Relaxed) {
        bar.abandon_with_message("cancelled".to_string());
    } else {
        bar.finish();
    }

    output::print_offices(&resolved);

    if let Some(path) = &args.json {
        output::write_json(&resolved, path)?;
    }
    Ok(())
}
