use plan_exec::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const REQUEST: &str = "Get all bookings from lodgify and email them to blabal@gmail.com";

fn print_transcript(title: &str, messages: &[LlmMessage]) -> anyhow::Result<()> {
    println!("{}", title);
    for message in messages {
        println!("\n----");
        println!("{}", serde_json::to_string(message)?);
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = PipelineConfig::from_env()?;
    let gateway = OpenAIGateway::with_config(OpenAIConfig::from_env()?)?;
    let broker = LlmBroker::new(config.model.clone(), Arc::new(gateway))
        .with_config(config.completion.clone())
        .with_max_turns(config.max_turns);

    let pipeline = PlanExecutePipeline::new(broker, Arc::new(ToolRegistry::standard()));
    let outcome = pipeline.run(REQUEST).await?;

    print_transcript("Planning", &outcome.planning)?;

    println!("Execution functions:");
    for descriptor in &outcome.descriptors {
        println!("{}", serde_json::to_string(descriptor)?);
    }
    println!();

    print_transcript("Execution", &outcome.execution)?;

    Ok(())
}
