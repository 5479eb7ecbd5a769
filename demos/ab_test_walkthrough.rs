//! A/B Test Walkthrough
//!
//! Creates a two-variant caption test, feeds it metrics in two rounds and
//! prints the results after each round.
//!
//! Run with: cargo run --example ab_test_walkthrough
//! Verbose:  RUST_LOG=trueno_ab=debug cargo run --example ab_test_walkthrough

use anyhow::Result;
use trueno_ab::experiment::{MetricsPatch, NewVariant, TargetMetric};
use trueno_ab::store::KvRepository;
use trueno_ab::{CreateExperiment, ExperimentEngine, Outcome};

const OWNER: &str = "agent-42";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Trueno-AB Walkthrough ===\n");

    let engine = ExperimentEngine::new(KvRepository::in_memory());

    // -------------------------------------------------------------------------
    // 1. Create the test
    // -------------------------------------------------------------------------
    println!("1. Creating A/B test...");

    let request = CreateExperiment::new(
        "Open house caption",
        "instagram",
        TargetMetric::Likes,
        vec![
            NewVariant::new("Question hook", "Ever wondered what $450k buys downtown?"),
            NewVariant::new("Plain listing", "New listing: 2 bed, 2 bath, open house Sunday."),
        ],
    )
    .description("Hook vs plain caption for the Maple St listing")
    .minimum_sample_size(100);

    let experiment = engine.create_experiment(OWNER, request).await?;
    let experiment_id = experiment.experiment_id().to_string();
    let variant_ids: Vec<String> = experiment
        .variants()
        .iter()
        .map(|v| v.id().to_string())
        .collect();

    println!("   Test ID: {experiment_id}");
    for variant in experiment.variants() {
        println!("   Variant {} -> {}", variant.name(), variant.id());
    }

    // -------------------------------------------------------------------------
    // 2. First round: not enough samples yet
    // -------------------------------------------------------------------------
    println!("\n2. First metrics round (60 views each)...");

    for (id, likes) in variant_ids.iter().zip([9, 4]) {
        let patch = MetricsPatch::new().views(60).likes(likes).reach(55);
        engine
            .track_variant_metrics(OWNER, &experiment_id, id, &patch)
            .await?;
    }

    let results = engine.get_results(OWNER, &experiment_id, true).await?;
    println!("   Recommendation: {}", results.recommended_action);

    // -------------------------------------------------------------------------
    // 3. Second round: counters overwrite, they do not accumulate
    // -------------------------------------------------------------------------
    println!("\n3. Second metrics round (400 views each)...");

    for (id, likes) in variant_ids.iter().zip([72, 31]) {
        let patch = MetricsPatch::new().views(400).likes(likes).reach(380);
        engine
            .track_variant_metrics(OWNER, &experiment_id, id, &patch)
            .await?;
    }

    let results = engine.get_results(OWNER, &experiment_id, true).await?;
    for variant in &results.variants {
        println!(
            "   {:<14} rate {:.3}  CI [{:.3}, {:.3}]{}",
            variant.name,
            variant.conversion_rate,
            variant.confidence_interval.lower,
            variant.confidence_interval.upper,
            if variant.is_winner { "  <- winner" } else { "" }
        );
    }
    if let Some(p) = results.p_value {
        println!("   p-value: {p:.5}");
    }
    if let Some(d) = results.effect_size {
        println!("   Cohen's d: {d:.3}");
    }
    println!("   Recommendation: {}", results.recommended_action);

    // -------------------------------------------------------------------------
    // 4. Envelope output, as a host would return it
    // -------------------------------------------------------------------------
    println!("\n4. Results envelope:");
    let outcome = Outcome::from(trueno_ab::Result::Ok(results));
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    let missing: Outcome<_> = engine
        .get_results(OWNER, "does-not-exist", true)
        .await
        .into();
    println!("{}", serde_json::to_string_pretty(&missing)?);

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}
