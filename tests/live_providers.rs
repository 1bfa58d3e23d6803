// These hit the hosted providers and need OPENAI_API_KEY / HUGGINGFACEHUB_API_TOKEN.
// cargo test --test live_providers -- --ignored
mod common;
use common::*;

async fn classify_dog_and_rock(model: &str) -> anyhow::Result<()> {
    let procedure = ClassificationProcedure::builder(mammal())
        .model(model)
        .logger_name("live_providers")
        .init()?;

    let dog = procedure.classify("dog", "a domesticated canine").await?;
    println!("{dog}");
    assert!(!dog.rationale.trim().is_empty());

    let rock = procedure.classify("rock", "a mineral mass").await?;
    println!("{rock}");
    assert!(!rock.rationale.trim().is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn openai_chat_integration_test() -> anyhow::Result<()> {
    classify_dog_and_rock("gpt-3.5-turbo").await?;
    classify_dog_and_rock("gpt-4").await
}

#[tokio::test]
#[serial]
#[ignore]
async fn openai_completion_integration_test() -> anyhow::Result<()> {
    classify_dog_and_rock("text-curie-001").await
}

#[tokio::test]
#[serial]
#[ignore]
async fn hugging_face_integration_test() -> anyhow::Result<()> {
    classify_dog_and_rock("google/flan-t5-xxl").await?;
    classify_dog_and_rock("meta-llama/Llama-2-70b-chat-hf").await
}
